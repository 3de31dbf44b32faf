pub mod gateway_trust_iam_authentication_facade_impl;
pub mod grpc_iam_authentication_facade_impl;
