use std::{collections::BTreeSet, sync::Arc};

use serde_json::Value;

use crate::access_control::domain::model::{
    entities::{
        principal::Principal,
        tenant_role_convention::{TenantGrant, TenantRoleConvention},
    },
    enums::{access_control_domain_error::AccessControlDomainError, principal_tier::PrincipalTier},
    value_objects::{
        tenant_id::TenantId, tenant_scope::TenantScope, tenant_selection::TenantSelection,
    },
};

#[derive(Default)]
struct CollectedGrants {
    all_tenants: bool,
    tenants: BTreeSet<TenantId>,
}

impl CollectedGrants {
    fn is_empty(&self) -> bool {
        !self.all_tenants && self.tenants.is_empty()
    }
}

/// Derives where a caller may act from its tenant roles and the optional
/// tenant selection.
pub struct TenantGrantResolver {
    convention: Arc<TenantRoleConvention>,
}

impl TenantGrantResolver {
    pub fn new(convention: Arc<TenantRoleConvention>) -> Self {
        Self { convention }
    }

    pub fn resolve(
        &self,
        principal: &Principal,
        tier: PrincipalTier,
        selection: Option<&TenantSelection>,
    ) -> Result<TenantScope, AccessControlDomainError> {
        // The only place tenant scope is bypassed.
        if tier == PrincipalTier::FullAccess {
            return Ok(TenantScope::AllTenants);
        }

        let grants = self.collect_grants(principal);

        if grants.is_empty() {
            return match (tier, selection) {
                (PrincipalTier::BasicOnly, None) => Ok(TenantScope::SelfScopeOnly),
                (PrincipalTier::BasicOnly, Some(_)) => {
                    Err(AccessControlDomainError::TenantSelectionOutOfScope)
                }
                _ => Err(AccessControlDomainError::NoTenantAccess),
            };
        }

        let selected = match selection {
            None => None,
            Some(selection) => Some(
                selection
                    .tenant_id()
                    .ok_or(AccessControlDomainError::TenantSelectionOutOfScope)?,
            ),
        };

        match selected {
            Some(tenant) if grants.all_tenants || grants.tenants.contains(&tenant) => {
                Ok(TenantScope::single(tenant))
            }
            Some(_) => Err(AccessControlDomainError::TenantSelectionOutOfScope),
            None if grants.all_tenants => Ok(TenantScope::AllTenants),
            None => TenantScope::tenants(grants.tenants),
        }
    }

    fn collect_grants(&self, principal: &Principal) -> CollectedGrants {
        let mut grants = CollectedGrants::default();

        for group in principal.groups() {
            match self.convention.classify(group) {
                Some(TenantGrant::AllTenants) => grants.all_tenants = true,
                Some(TenantGrant::Tenant(tenant)) => {
                    grants.tenants.insert(tenant);
                }
                None => {}
            }
        }

        if let Some(attribute) = self.convention.tenant_attribute() {
            grants
                .tenants
                .extend(assigned_tenants(principal.attribute(attribute)));
        }

        grants
    }
}

/// Tenants listed in a custom attribute, either as a JSON array of strings or
/// as a comma separated string. Invalid entries are skipped.
fn assigned_tenants(value: Option<&Value>) -> Vec<TenantId> {
    let raw: Vec<&str> = match value {
        Some(Value::String(list)) => list.split(',').collect(),
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };

    raw.into_iter()
        .map(str::trim)
        .filter(|tenant| !tenant.is_empty())
        .filter_map(|tenant| TenantId::new(tenant.to_string()).ok())
        .collect()
}
