pub mod authorization_middleware;
pub mod authorized_request;
