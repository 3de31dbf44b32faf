use thiserror::Error;

use crate::access_control::domain::model::enums::denial_reason::DenialReason;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessControlDomainError {
    #[error("tenant id is invalid")]
    InvalidTenantId,

    #[error("principal id is invalid")]
    InvalidPrincipalId,

    #[error("role name is invalid")]
    InvalidRoleName,

    #[error("permission is invalid")]
    InvalidPermission,

    #[error("operation name is invalid")]
    InvalidOperationName,

    #[error("invalid authorization configuration: {0}")]
    InvalidConfiguration(String),

    // The detail is for logs only; Display stays generic.
    #[error("credential is malformed")]
    MalformedCredential(&'static str),

    #[error("credential has expired")]
    ExpiredCredential,

    #[error("credential is not trusted")]
    UntrustedCredential(String),

    #[error("identity provider is unavailable")]
    IdentityProviderUnavailable(String),

    #[error("insufficient permission")]
    InsufficientPermission,

    #[error("no tenant access")]
    NoTenantAccess,

    #[error("tenant selection is out of scope")]
    TenantSelectionOutOfScope,

    #[error("a tenant selection is required for this operation")]
    TenantSelectionRequired,

    #[error("tenant scope enforcement gap")]
    EnforcementGap(String),

    #[error("infrastructure error: {0}")]
    InfrastructureError(String),
}

impl AccessControlDomainError {
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::InvalidTenantId => "invalid_tenant_id",
            Self::InvalidPrincipalId => "invalid_principal_id",
            Self::InvalidRoleName => "invalid_role_name",
            Self::InvalidPermission => "invalid_permission",
            Self::InvalidOperationName => "invalid_operation_name",
            Self::InvalidConfiguration(_) => "invalid_configuration",
            Self::MalformedCredential(_) => DenialReason::MalformedCredential.as_str(),
            Self::ExpiredCredential => DenialReason::ExpiredCredential.as_str(),
            Self::UntrustedCredential(_) => DenialReason::UntrustedCredential.as_str(),
            Self::IdentityProviderUnavailable(_) => {
                DenialReason::IdentityProviderUnavailable.as_str()
            }
            Self::InsufficientPermission => DenialReason::InsufficientPermission.as_str(),
            Self::NoTenantAccess => DenialReason::NoTenantAccess.as_str(),
            Self::TenantSelectionOutOfScope => DenialReason::TenantSelectionOutOfScope.as_str(),
            Self::TenantSelectionRequired => "tenant_selection_required",
            Self::EnforcementGap(_) => "enforcement_gap",
            Self::InfrastructureError(_) => "infrastructure_error",
        }
    }

    /// The denial this error stands for, when it is a request-level denial
    /// rather than a defect or a configuration problem.
    pub fn denial_reason(&self) -> Option<DenialReason> {
        match self {
            Self::MalformedCredential(_) => Some(DenialReason::MalformedCredential),
            Self::ExpiredCredential => Some(DenialReason::ExpiredCredential),
            Self::UntrustedCredential(_) => Some(DenialReason::UntrustedCredential),
            Self::IdentityProviderUnavailable(_) => {
                Some(DenialReason::IdentityProviderUnavailable)
            }
            Self::InsufficientPermission => Some(DenialReason::InsufficientPermission),
            Self::NoTenantAccess => Some(DenialReason::NoTenantAccess),
            Self::TenantSelectionOutOfScope => Some(DenialReason::TenantSelectionOutOfScope),
            _ => None,
        }
    }
}

impl From<DenialReason> for AccessControlDomainError {
    fn from(reason: DenialReason) -> Self {
        match reason {
            DenialReason::MalformedCredential => Self::MalformedCredential("denied"),
            DenialReason::ExpiredCredential => Self::ExpiredCredential,
            DenialReason::UntrustedCredential => Self::UntrustedCredential(String::new()),
            DenialReason::IdentityProviderUnavailable => {
                Self::IdentityProviderUnavailable(String::new())
            }
            DenialReason::InsufficientPermission => Self::InsufficientPermission,
            DenialReason::NoTenantAccess => Self::NoTenantAccess,
            DenialReason::TenantSelectionOutOfScope => Self::TenantSelectionOutOfScope,
        }
    }
}
