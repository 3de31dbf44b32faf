use std::str::FromStr;

use super::access_control_domain_error::AccessControlDomainError;

/// Stable, machine-readable reason attached to a denied decision.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DenialReason {
    MalformedCredential,
    ExpiredCredential,
    UntrustedCredential,
    IdentityProviderUnavailable,
    InsufficientPermission,
    NoTenantAccess,
    TenantSelectionOutOfScope,
}

impl DenialReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedCredential => "malformed_credential",
            Self::ExpiredCredential => "expired_credential",
            Self::UntrustedCredential => "untrusted_credential",
            Self::IdentityProviderUnavailable => "identity_provider_unavailable",
            Self::InsufficientPermission => "insufficient_permission",
            Self::NoTenantAccess => "no_tenant_access",
            Self::TenantSelectionOutOfScope => "tenant_selection_out_of_scope",
        }
    }

    pub fn is_credential_failure(&self) -> bool {
        matches!(
            self,
            Self::MalformedCredential
                | Self::ExpiredCredential
                | Self::UntrustedCredential
                | Self::IdentityProviderUnavailable
        )
    }
}

impl FromStr for DenialReason {
    type Err = AccessControlDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "malformed_credential" => Ok(Self::MalformedCredential),
            "expired_credential" => Ok(Self::ExpiredCredential),
            "untrusted_credential" => Ok(Self::UntrustedCredential),
            "identity_provider_unavailable" => Ok(Self::IdentityProviderUnavailable),
            "insufficient_permission" => Ok(Self::InsufficientPermission),
            "no_tenant_access" => Ok(Self::NoTenantAccess),
            "tenant_selection_out_of_scope" => Ok(Self::TenantSelectionOutOfScope),
            _ => Err(AccessControlDomainError::InfrastructureError(
                "invalid denial reason stored".to_string(),
            )),
        }
    }
}
