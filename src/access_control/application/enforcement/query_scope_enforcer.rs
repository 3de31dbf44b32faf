//! Tenant scope enforcement for data access.
//!
//! Tenant-partitioned repositories accept a [`TenantFilter`] on every call,
//! and a filter can only be produced here, from an allowed decision. Code
//! that never passed the gate therefore has no way to reach tenant data.

use std::collections::BTreeSet;

use crate::access_control::domain::model::{
    entities::authorization_decision::AuthorizationDecision,
    enums::access_control_domain_error::AccessControlDomainError,
    value_objects::{
        principal_id::PrincipalId, tenant_id::TenantId, tenant_scope::TenantScope,
    },
};

/// Rows that belong to exactly one tenant.
pub trait TenantOwned {
    fn tenant_id(&self) -> &TenantId;
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum TenantFilterKind {
    AllTenants,
    Tenants(BTreeSet<TenantId>),
}

/// Proof that a data access was scoped by the enforcer. Not constructible
/// outside this module.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TenantFilter {
    kind: TenantFilterKind,
}

impl TenantFilter {
    pub fn admits(&self, tenant: &TenantId) -> bool {
        match &self.kind {
            TenantFilterKind::AllTenants => true,
            TenantFilterKind::Tenants(tenants) => tenants.contains(tenant),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self.kind, TenantFilterKind::AllTenants)
    }

    /// Explicit tenant list for query binding; `None` when unrestricted.
    pub fn tenant_ids(&self) -> Option<Vec<String>> {
        match &self.kind {
            TenantFilterKind::AllTenants => None,
            TenantFilterKind::Tenants(tenants) => {
                Some(tenants.iter().map(|t| t.value().to_string()).collect())
            }
        }
    }
}

/// Write target chosen by the enforcer, together with the filter that
/// authorises writing to it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TenantWriteTarget {
    tenant_id: TenantId,
    filter: TenantFilter,
}

impl TenantWriteTarget {
    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }
    pub fn filter(&self) -> &TenantFilter {
        &self.filter
    }
}

#[derive(Clone, Debug)]
pub struct QueryScopeEnforcer {
    principal_id: PrincipalId,
    scope: TenantScope,
}

impl QueryScopeEnforcer {
    /// Fails with `EnforcementGap` for a denied decision: business logic must
    /// never hold one.
    pub fn for_decision(decision: &AuthorizationDecision) -> Result<Self, AccessControlDomainError> {
        let scope = decision.ensure_allowed().map_err(|_| {
            enforcement_gap(
                decision.principal_id(),
                "data access attempted with a denied authorization decision",
            )
        })?;

        Ok(Self {
            principal_id: decision.principal_id().clone(),
            scope: scope.clone(),
        })
    }

    pub fn principal_id(&self) -> &PrincipalId {
        &self.principal_id
    }

    pub fn scope(&self) -> &TenantScope {
        &self.scope
    }

    /// Filter covering every tenant the request may read.
    pub fn scope_read(&self) -> Result<TenantFilter, AccessControlDomainError> {
        match &self.scope {
            TenantScope::AllTenants => Ok(TenantFilter {
                kind: TenantFilterKind::AllTenants,
            }),
            TenantScope::Tenants(tenants) => Ok(TenantFilter {
                kind: TenantFilterKind::Tenants(tenants.clone()),
            }),
            TenantScope::SelfScopeOnly => Err(enforcement_gap(
                &self.principal_id,
                "tenant-partitioned access attempted with a self-only scope",
            )),
        }
    }

    /// Filter for an operation that names one tenant. Naming a tenant outside
    /// the scope is an enforcement gap.
    pub fn scope_tenant(&self, tenant: &TenantId) -> Result<TenantFilter, AccessControlDomainError> {
        if !self.scope.admits(tenant) {
            return Err(enforcement_gap(
                &self.principal_id,
                "operation named a tenant outside the granted scope",
            ));
        }

        Ok(TenantFilter {
            kind: TenantFilterKind::Tenants(BTreeSet::from([tenant.clone()])),
        })
    }

    /// Single tenant a write lands in. The scope must name exactly one tenant
    /// unless a selection narrowed it already.
    pub fn scope_write(&self) -> Result<TenantWriteTarget, AccessControlDomainError> {
        match &self.scope {
            TenantScope::Tenants(tenants) if tenants.len() == 1 => {
                let tenant = tenants.iter().next().cloned().ok_or_else(|| {
                    enforcement_gap(&self.principal_id, "empty tenant scope")
                })?;
                let filter = self.scope_tenant(&tenant)?;
                Ok(TenantWriteTarget {
                    tenant_id: tenant,
                    filter,
                })
            }
            TenantScope::Tenants(_) | TenantScope::AllTenants => {
                Err(AccessControlDomainError::TenantSelectionRequired)
            }
            TenantScope::SelfScopeOnly => Err(enforcement_gap(
                &self.principal_id,
                "tenant-partitioned write attempted with a self-only scope",
            )),
        }
    }

    /// Post-query check: every row a repository returned must be admitted by
    /// the filter it was given.
    pub fn verify_rows<T: TenantOwned>(
        &self,
        filter: &TenantFilter,
        rows: Vec<T>,
    ) -> Result<Vec<T>, AccessControlDomainError> {
        if let Some(row) = rows
            .iter()
            .find(|row| !filter.admits(row.tenant_id()) || !self.scope.admits(row.tenant_id()))
        {
            tracing::error!(
                principal_id = %self.principal_id,
                row_tenant = %row.tenant_id(),
                "repository returned a row outside the tenant filter"
            );
            return Err(AccessControlDomainError::EnforcementGap(
                "repository returned a row outside the tenant filter".to_string(),
            ));
        }

        Ok(rows)
    }
}

/// Logs loudly and builds the error. Enforcement gaps are defects.
pub fn enforcement_gap(principal_id: &PrincipalId, detail: &str) -> AccessControlDomainError {
    tracing::error!(principal_id = %principal_id, detail, "tenant scope enforcement gap");
    AccessControlDomainError::EnforcementGap(detail.to_string())
}
