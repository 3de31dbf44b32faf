use crate::access_control::domain::model::events::authorization_decision_audited_event::AuthorizationDecisionAuditedEvent;

/// Fire-and-forget sink for decisions. Implementations must return
/// immediately and must never fail the caller.
pub trait AuthorizationAuditRecorder: Send + Sync {
    fn record(&self, event: AuthorizationDecisionAuditedEvent);
}
