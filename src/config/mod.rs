pub mod app_config;
pub mod authorization_config;
