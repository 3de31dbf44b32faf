use async_trait::async_trait;

use crate::iam_integration::{
    application::claims_extractor::unverified_claims,
    domain::model::value_objects::verified_subject::VerifiedSubject,
    interfaces::acl::iam_authentication_facade::{
        IamAuthenticationFacade, IamIntegrationError, VerifiedUserContext,
    },
};

/// For deployments behind a gateway that has already checked the token
/// signature. The token is accepted as-is and its own `sub` is returned.
#[derive(Default)]
pub struct GatewayTrustIamAuthenticationFacadeImpl;

impl GatewayTrustIamAuthenticationFacadeImpl {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl IamAuthenticationFacade for GatewayTrustIamAuthenticationFacadeImpl {
    async fn verify_access_token(
        &self,
        access_token: &str,
    ) -> Result<VerifiedUserContext, IamIntegrationError> {
        let claims = unverified_claims(access_token)
            .map_err(|e| IamIntegrationError::InvalidToken(e.to_string()))?;

        let subject = claims
            .get("sub")
            .and_then(|value| value.as_str())
            .ok_or_else(|| IamIntegrationError::InvalidToken("token has no subject".to_string()))?;

        Ok(VerifiedUserContext {
            subject_id: VerifiedSubject::new(subject).map_err(IamIntegrationError::InvalidToken)?,
            jti: claims
                .get("jti")
                .and_then(|value| value.as_str())
                .map(str::to_string),
            exp_epoch_seconds: claims
                .get("exp")
                .and_then(|value| value.as_u64())
                .unwrap_or_default(),
        })
    }
}
