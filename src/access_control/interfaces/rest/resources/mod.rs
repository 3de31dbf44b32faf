pub mod access_control_error_response_resource;
pub mod profile_resource;
