fn main() {
    println!("cargo:rerun-if-changed=proto/authentication_verification.proto");

    if std::env::var_os("PROTOC").is_none() {
        let protoc = protoc_bin_vendored::protoc_bin_path().expect("failed to locate vendored protoc");
        // SAFETY: the build script is single threaded.
        unsafe { std::env::set_var("PROTOC", protoc) };
    }

    tonic_build::configure()
        .build_server(false)
        .build_client(true)
        .compile_protos(&["proto/authentication_verification.proto"], &["proto"])
        .expect("failed to compile authentication verification proto");
}
