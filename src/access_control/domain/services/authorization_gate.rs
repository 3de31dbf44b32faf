use crate::access_control::domain::model::{
    entities::authorization_decision::AuthorizationDecision,
    enums::denial_reason::DenialReason,
    queries::evaluate_authorization_query::EvaluateAuthorizationQuery,
    value_objects::operation_name::OperationName,
};

/// A request whose credential failed before a principal existed.
#[derive(Clone, Debug)]
pub struct CredentialRejection {
    pub operation: OperationName,
    pub reason: DenialReason,
    pub request_id: Option<String>,
}

/// The single checkpoint every request passes before business logic runs.
///
/// Evaluation is synchronous and free of I/O; every decision it returns has
/// already been handed to the audit recorder.
pub trait AuthorizationGate: Send + Sync {
    fn evaluate(&self, query: &EvaluateAuthorizationQuery) -> AuthorizationDecision;

    fn reject_credential(&self, rejection: CredentialRejection) -> AuthorizationDecision;
}
