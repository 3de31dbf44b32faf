pub mod authentication_verification {
    tonic::include_proto!("authentication_verification");
}
