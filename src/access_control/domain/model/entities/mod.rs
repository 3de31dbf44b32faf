pub mod authorization_decision;
pub mod principal;
pub mod role_permission_table;
pub mod tenant_role_convention;
