use async_trait::async_trait;

use crate::{
    access_control::domain::model::enums::access_control_domain_error::AccessControlDomainError,
    iam_integration::domain::model::value_objects::verified_subject::VerifiedSubject,
};

#[derive(Clone, Debug)]
pub struct VerifiedUserContext {
    pub subject_id: VerifiedSubject,
    pub jti: Option<String>,
    pub exp_epoch_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IamIntegrationError {
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("iam unavailable: {0}")]
    Unavailable(String),
}

impl From<IamIntegrationError> for AccessControlDomainError {
    fn from(error: IamIntegrationError) -> Self {
        match error {
            IamIntegrationError::InvalidToken(detail) => Self::UntrustedCredential(detail),
            IamIntegrationError::Unavailable(detail) => Self::IdentityProviderUnavailable(detail),
        }
    }
}

/// Signature verification is owned by the identity provider; this facade is
/// the only way the engine talks to it.
#[async_trait]
pub trait IamAuthenticationFacade: Send + Sync {
    async fn verify_access_token(
        &self,
        access_token: &str,
    ) -> Result<VerifiedUserContext, IamIntegrationError>;
}
