use crate::access_control::domain::model::{
    enums::access_control_domain_error::AccessControlDomainError,
    value_objects::tenant_id::TenantId,
};

use super::role_permission_table::RolePermissionTable;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TenantGrant {
    AllTenants,
    Tenant(TenantId),
}

/// How tenant roles are spelled in group memberships, plus the optional
/// custom attribute that lists directly assigned tenants.
#[derive(Clone, Debug)]
pub struct TenantRoleConvention {
    prefix: String,
    all_tenants_role: String,
    tenant_attribute: Option<String>,
}

impl TenantRoleConvention {
    pub fn new(
        prefix: String,
        all_tenants_role: String,
        tenant_attribute: Option<String>,
        role_table: &RolePermissionTable,
    ) -> Result<Self, AccessControlDomainError> {
        let prefix = prefix.trim().to_string();
        let all_tenants_role = all_tenants_role.trim().to_string();

        if prefix.is_empty() {
            return Err(AccessControlDomainError::InvalidConfiguration(
                "tenant role prefix is empty".to_string(),
            ));
        }
        if all_tenants_role.is_empty() {
            return Err(AccessControlDomainError::InvalidConfiguration(
                "all-tenants role is empty".to_string(),
            ));
        }

        for role in role_table.role_names() {
            if role.value() == all_tenants_role || role.value().starts_with(&prefix) {
                return Err(AccessControlDomainError::InvalidConfiguration(format!(
                    "permission role '{role}' collides with the tenant role naming convention"
                )));
            }
        }

        Ok(Self {
            prefix,
            all_tenants_role,
            tenant_attribute: tenant_attribute
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
        })
    }

    /// `None` when the group is not a tenant role. A prefixed group naming an
    /// invalid tenant id is not a grant either.
    pub fn classify(&self, group: &str) -> Option<TenantGrant> {
        if group == self.all_tenants_role {
            return Some(TenantGrant::AllTenants);
        }

        let tenant = group.strip_prefix(&self.prefix)?;
        TenantId::new(tenant.to_string())
            .ok()
            .map(TenantGrant::Tenant)
    }

    pub fn is_tenant_role(&self, group: &str) -> bool {
        group == self.all_tenants_role || group.starts_with(&self.prefix)
    }

    pub fn tenant_attribute(&self) -> Option<&str> {
        self.tenant_attribute.as_deref()
    }
}
