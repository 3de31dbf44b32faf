use std::collections::BTreeSet;

use crate::access_control::domain::model::{
    entities::principal::Principal,
    enums::access_control_domain_error::AccessControlDomainError,
    value_objects::{
        operation_name::OperationName, permission::Permission,
        tenant_selection::TenantSelection,
    },
};

#[derive(Clone, Debug)]
pub struct EvaluateAuthorizationQuery {
    principal: Principal,
    operation: OperationName,
    requested_permissions: BTreeSet<Permission>,
    tenant_selection: Option<TenantSelection>,
    request_id: Option<String>,
}

pub struct EvaluateAuthorizationQueryParts {
    pub principal: Principal,
    pub operation: String,
    pub requested_permissions: Vec<String>,
    pub tenant_selection: Option<String>,
    pub request_id: Option<String>,
}

impl EvaluateAuthorizationQuery {
    pub fn new(parts: EvaluateAuthorizationQueryParts) -> Result<Self, AccessControlDomainError> {
        let requested_permissions = parts
            .requested_permissions
            .into_iter()
            .map(Permission::new)
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(Self {
            principal: parts.principal,
            operation: OperationName::new(parts.operation)?,
            requested_permissions,
            tenant_selection: TenantSelection::from_header(parts.tenant_selection.as_deref()),
            request_id: parts
                .request_id
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty()),
        })
    }

    pub fn from_validated(
        principal: Principal,
        operation: OperationName,
        requested_permissions: BTreeSet<Permission>,
        tenant_selection: Option<TenantSelection>,
        request_id: Option<String>,
    ) -> Self {
        Self {
            principal,
            operation,
            requested_permissions,
            tenant_selection,
            request_id,
        }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }
    pub fn operation(&self) -> &OperationName {
        &self.operation
    }
    pub fn requested_permissions(&self) -> &BTreeSet<Permission> {
        &self.requested_permissions
    }
    pub fn tenant_selection(&self) -> Option<&TenantSelection> {
        self.tenant_selection.as_ref()
    }
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }
}
