pub mod operation_name;
pub mod permission;
pub mod principal_id;
pub mod role_name;
pub mod tenant_id;
pub mod permission_set;
pub mod tenant_scope;
pub mod tenant_selection;
