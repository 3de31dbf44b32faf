use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::access_control::domain::model::{
    entities::authorization_decision::AuthorizationDecision,
    enums::{
        access_control_domain_error::AccessControlDomainError, decision_effect::DecisionEffect,
        denial_reason::DenialReason,
    },
    value_objects::tenant_scope::{NO_SCOPE_KEYWORD, TenantScope},
};

/// Append-only audit record of one authorization decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationDecisionAuditedEvent {
    pub event_id: Uuid,
    pub principal_id: String,
    pub operation: String,
    pub effect: DecisionEffect,
    pub reason: Option<DenialReason>,
    pub scope: Option<TenantScope>,
    pub request_id: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl AuthorizationDecisionAuditedEvent {
    pub fn from_decision(
        decision: &AuthorizationDecision,
        request_id: Option<&str>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            principal_id: decision.principal_id().value().to_string(),
            operation: decision.operation().value().to_string(),
            effect: decision.effect(),
            reason: decision.denial_reason(),
            scope: decision.scope().cloned(),
            request_id: request_id.map(str::to_string),
            occurred_at,
        }
    }

    pub fn rendered_scope(&self) -> String {
        self.scope
            .as_ref()
            .map_or_else(|| NO_SCOPE_KEYWORD.to_string(), TenantScope::render)
    }

    pub fn parse_scope(rendered: &str) -> Result<Option<TenantScope>, AccessControlDomainError> {
        if rendered == NO_SCOPE_KEYWORD {
            return Ok(None);
        }
        TenantScope::parse(rendered)
            .map(Some)
            .map_err(|_| AccessControlDomainError::InfrastructureError(
                "invalid scope stored".to_string(),
            ))
    }
}
