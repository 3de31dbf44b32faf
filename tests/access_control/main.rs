
mod authorization_config_tests;
mod permission_resolver_tests;
mod profile_endpoint_tests;
mod tenant_grant_resolver_tests;
