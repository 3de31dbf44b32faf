use crate::access_control::domain::model::{
    enums::{
        access_control_domain_error::AccessControlDomainError,
        authorization_stage::AuthorizationStage, decision_effect::DecisionEffect,
        denial_reason::DenialReason,
    },
    value_objects::{
        operation_name::OperationName, permission_set::PermissionSet, principal_id::PrincipalId,
        tenant_scope::TenantScope,
    },
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DecisionOutcome {
    Allowed,
    Denied(DenialReason),
}

/// Result of one gate evaluation. Fields are private so a decision cannot be
/// altered once the gate has returned it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthorizationDecision {
    principal_id: PrincipalId,
    operation: OperationName,
    outcome: DecisionOutcome,
    granted_permissions: PermissionSet,
    scope: Option<TenantScope>,
    decided_after: AuthorizationStage,
}

impl AuthorizationDecision {
    pub(crate) fn allowed(
        principal_id: PrincipalId,
        operation: OperationName,
        granted_permissions: PermissionSet,
        scope: TenantScope,
    ) -> Self {
        Self {
            principal_id,
            operation,
            outcome: DecisionOutcome::Allowed,
            granted_permissions,
            scope: Some(scope),
            decided_after: AuthorizationStage::TenantScopeResolved,
        }
    }

    pub(crate) fn denied(
        principal_id: PrincipalId,
        operation: OperationName,
        reason: DenialReason,
        granted_permissions: PermissionSet,
        decided_after: AuthorizationStage,
    ) -> Self {
        Self {
            principal_id,
            operation,
            outcome: DecisionOutcome::Denied(reason),
            granted_permissions,
            scope: None,
            decided_after,
        }
    }

    pub fn principal_id(&self) -> &PrincipalId {
        &self.principal_id
    }
    pub fn operation(&self) -> &OperationName {
        &self.operation
    }
    pub fn outcome(&self) -> &DecisionOutcome {
        &self.outcome
    }
    pub fn granted_permissions(&self) -> &PermissionSet {
        &self.granted_permissions
    }
    pub fn scope(&self) -> Option<&TenantScope> {
        self.scope.as_ref()
    }
    /// Last stage the evaluation completed before reaching its outcome.
    pub fn decided_after(&self) -> AuthorizationStage {
        self.decided_after
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self.outcome, DecisionOutcome::Allowed)
    }

    pub fn effect(&self) -> DecisionEffect {
        match self.outcome {
            DecisionOutcome::Allowed => DecisionEffect::Allow,
            DecisionOutcome::Denied(_) => DecisionEffect::Deny,
        }
    }

    pub fn denial_reason(&self) -> Option<DenialReason> {
        match self.outcome {
            DecisionOutcome::Allowed => None,
            DecisionOutcome::Denied(reason) => Some(reason),
        }
    }

    /// The resolved scope of an allowed decision, or the matching error.
    pub fn ensure_allowed(&self) -> Result<&TenantScope, AccessControlDomainError> {
        match (&self.outcome, &self.scope) {
            (DecisionOutcome::Allowed, Some(scope)) => Ok(scope),
            (DecisionOutcome::Denied(reason), _) => Err((*reason).into()),
            (DecisionOutcome::Allowed, None) => Err(AccessControlDomainError::EnforcementGap(
                "allowed decision without a tenant scope".to_string(),
            )),
        }
    }
}
