use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::access_control::domain::model::enums::access_control_domain_error::AccessControlDomainError;

/// Denial body. Never names the missing permission or tenant.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AccessControlErrorResponseResource {
    pub reason_code: String,
    pub message: String,
}

pub fn map_domain_error(
    error: AccessControlDomainError,
) -> (StatusCode, Json<AccessControlErrorResponseResource>) {
    let status = match &error {
        AccessControlDomainError::MalformedCredential(_)
        | AccessControlDomainError::ExpiredCredential
        | AccessControlDomainError::UntrustedCredential(_) => StatusCode::UNAUTHORIZED,
        AccessControlDomainError::IdentityProviderUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        AccessControlDomainError::InsufficientPermission
        | AccessControlDomainError::NoTenantAccess
        | AccessControlDomainError::TenantSelectionOutOfScope => StatusCode::FORBIDDEN,
        AccessControlDomainError::InvalidTenantId
        | AccessControlDomainError::InvalidPrincipalId
        | AccessControlDomainError::InvalidRoleName
        | AccessControlDomainError::InvalidPermission
        | AccessControlDomainError::InvalidOperationName
        | AccessControlDomainError::TenantSelectionRequired => StatusCode::BAD_REQUEST,
        AccessControlDomainError::InvalidConfiguration(_)
        | AccessControlDomainError::EnforcementGap(_)
        | AccessControlDomainError::InfrastructureError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let message = match &error {
        AccessControlDomainError::InvalidConfiguration(_)
        | AccessControlDomainError::InfrastructureError(_) => "internal error".to_string(),
        other => other.to_string(),
    };

    (
        status,
        Json(AccessControlErrorResponseResource {
            reason_code: error.reason_code().to_string(),
            message,
        }),
    )
}
