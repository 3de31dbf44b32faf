use std::collections::BTreeSet;

use crate::access_control::domain::model::enums::access_control_domain_error::AccessControlDomainError;

use super::tenant_id::TenantId;

pub const ALL_TENANTS_KEYWORD: &str = "all";
pub const SELF_SCOPE_KEYWORD: &str = "selfonly";
/// Rendered when a decision carries no scope.
pub const NO_SCOPE_KEYWORD: &str = "none";

/// Words the audit rendering reserves. No tenant may be named after one.
pub const SCOPE_KEYWORDS: [&str; 3] = [ALL_TENANTS_KEYWORD, SELF_SCOPE_KEYWORD, NO_SCOPE_KEYWORD];

/// Where a request may act. `Tenants` is never empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TenantScope {
    AllTenants,
    Tenants(BTreeSet<TenantId>),
    SelfScopeOnly,
}

impl TenantScope {
    pub fn tenants(tenants: BTreeSet<TenantId>) -> Result<Self, AccessControlDomainError> {
        if tenants.is_empty() {
            return Err(AccessControlDomainError::NoTenantAccess);
        }
        Ok(Self::Tenants(tenants))
    }

    pub fn single(tenant: TenantId) -> Self {
        Self::Tenants(BTreeSet::from([tenant]))
    }

    pub fn admits(&self, tenant: &TenantId) -> bool {
        match self {
            Self::AllTenants => true,
            Self::Tenants(tenants) => tenants.contains(tenant),
            Self::SelfScopeOnly => false,
        }
    }

    /// Audit rendering: `all`, `selfonly`, or a comma separated tenant list.
    pub fn render(&self) -> String {
        match self {
            Self::AllTenants => ALL_TENANTS_KEYWORD.to_string(),
            Self::SelfScopeOnly => SELF_SCOPE_KEYWORD.to_string(),
            Self::Tenants(tenants) => tenants
                .iter()
                .map(TenantId::value)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    pub fn parse(rendered: &str) -> Result<Self, AccessControlDomainError> {
        match rendered {
            ALL_TENANTS_KEYWORD => Ok(Self::AllTenants),
            SELF_SCOPE_KEYWORD => Ok(Self::SelfScopeOnly),
            list => {
                let tenants = list
                    .split(',')
                    .map(|tenant| TenantId::new(tenant.to_string()))
                    .collect::<Result<BTreeSet<_>, _>>()?;
                Self::tenants(tenants)
            }
        }
    }
}
