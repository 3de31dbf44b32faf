pub mod permission_resolver;
pub mod tenant_grant_resolver;
