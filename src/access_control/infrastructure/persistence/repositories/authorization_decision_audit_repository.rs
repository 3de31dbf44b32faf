use async_trait::async_trait;

use crate::access_control::domain::model::{
    enums::access_control_domain_error::AccessControlDomainError,
    events::authorization_decision_audited_event::AuthorizationDecisionAuditedEvent,
    value_objects::principal_id::PrincipalId,
};

/// Append-only store of authorization decisions. There is no update or
/// delete operation.
#[async_trait]
pub trait AuthorizationDecisionAuditRepository: Send + Sync {
    async fn save_decision(
        &self,
        event: &AuthorizationDecisionAuditedEvent,
    ) -> Result<(), AccessControlDomainError>;

    /// Most recent first.
    async fn find_decisions_by_principal(
        &self,
        principal_id: &PrincipalId,
        limit: u32,
    ) -> Result<Vec<AuthorizationDecisionAuditedEvent>, AccessControlDomainError>;
}
