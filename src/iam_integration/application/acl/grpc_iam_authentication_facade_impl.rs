use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tonic::transport::Endpoint;

use crate::iam_integration::{
    application::claims_extractor::token_fingerprint,
    domain::model::value_objects::verified_subject::VerifiedSubject,
    infrastructure::grpc::authentication_verification::{
        VerifyAccessTokenRequest, VerifyAccessTokenResponse,
        authentication_verification_service_client::AuthenticationVerificationServiceClient,
    },
    interfaces::acl::iam_authentication_facade::{
        IamAuthenticationFacade, IamIntegrationError, VerifiedUserContext,
    },
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum BreakerState {
    Closed { consecutive_failures: u32 },
    Open { until: Instant },
    /// One trial call is in flight. A trial that never reports back (its
    /// request was dropped) is abandoned at `until`.
    HalfOpen { until: Instant },
}

/// Transport failures only. A token the IdP answers as invalid is a healthy
/// call and never trips the breaker.
struct CircuitBreaker {
    state: Mutex<BreakerState>,
    failure_threshold: u32,
    open_duration: Duration,
    trial_timeout: Duration,
}

impl CircuitBreaker {
    fn new(failure_threshold: u32, open_duration: Duration, trial_timeout: Duration) -> Self {
        Self {
            state: Mutex::new(BreakerState::Closed {
                consecutive_failures: 0,
            }),
            failure_threshold: failure_threshold.max(1),
            open_duration,
            trial_timeout,
        }
    }

    async fn try_acquire(&self) -> bool {
        let mut state = self.state.lock().await;
        let now = Instant::now();
        match *state {
            BreakerState::Closed { .. } => true,
            BreakerState::Open { until } | BreakerState::HalfOpen { until } if until <= now => {
                *state = BreakerState::HalfOpen {
                    until: now + self.trial_timeout,
                };
                true
            }
            BreakerState::Open { .. } | BreakerState::HalfOpen { .. } => false,
        }
    }

    async fn on_success(&self) {
        *self.state.lock().await = BreakerState::Closed {
            consecutive_failures: 0,
        };
    }

    /// Returns `true` when this failure opened the circuit.
    async fn on_failure(&self) -> bool {
        let mut state = self.state.lock().await;
        let failures = match *state {
            BreakerState::Closed {
                consecutive_failures,
            } => consecutive_failures.saturating_add(1),
            BreakerState::HalfOpen { .. } | BreakerState::Open { .. } => self.failure_threshold,
        };

        if failures >= self.failure_threshold {
            *state = BreakerState::Open {
                until: Instant::now() + self.open_duration,
            };
            true
        } else {
            *state = BreakerState::Closed {
                consecutive_failures: failures,
            };
            false
        }
    }

    /// Open, or probing with a trial that has not timed out yet.
    async fn is_open(&self) -> bool {
        match *self.state.lock().await {
            BreakerState::Closed { .. } => false,
            BreakerState::Open { until } | BreakerState::HalfOpen { until } => {
                until > Instant::now()
            }
        }
    }
}

/// Verifies tokens against the IAM service over gRPC, failing fast with
/// `Unavailable` while the circuit is open.
pub struct GrpcIamAuthenticationFacadeImpl {
    endpoint: String,
    timeout: Duration,
    breaker: CircuitBreaker,
}

impl GrpcIamAuthenticationFacadeImpl {
    pub fn new(
        endpoint: String,
        timeout: Duration,
        failure_threshold: u32,
        open_duration: Duration,
    ) -> Self {
        Self {
            endpoint,
            timeout,
            // Connect and request each get `timeout`.
            breaker: CircuitBreaker::new(failure_threshold, open_duration, timeout.saturating_mul(2)),
        }
    }

    pub async fn is_circuit_open(&self) -> bool {
        self.breaker.is_open().await
    }

    async fn call(&self, access_token: &str) -> Result<VerifyAccessTokenResponse, IamIntegrationError> {
        let channel = Endpoint::from_shared(self.endpoint.clone())
            .map_err(|e| IamIntegrationError::Unavailable(e.to_string()))?
            .connect_timeout(self.timeout)
            .timeout(self.timeout)
            .connect()
            .await
            .map_err(|e| IamIntegrationError::Unavailable(e.to_string()))?;

        AuthenticationVerificationServiceClient::new(channel)
            .verify_access_token(VerifyAccessTokenRequest {
                access_token: access_token.to_string(),
            })
            .await
            .map(|response| response.into_inner())
            .map_err(|status| {
                tracing::warn!(
                    token = %token_fingerprint(access_token),
                    code = ?status.code(),
                    "iam token verification call failed"
                );
                IamIntegrationError::Unavailable(status.to_string())
            })
    }
}

#[async_trait]
impl IamAuthenticationFacade for GrpcIamAuthenticationFacadeImpl {
    async fn verify_access_token(
        &self,
        access_token: &str,
    ) -> Result<VerifiedUserContext, IamIntegrationError> {
        if access_token.trim().is_empty() {
            return Err(IamIntegrationError::InvalidToken(
                "access token is empty".to_string(),
            ));
        }

        if !self.breaker.try_acquire().await {
            return Err(IamIntegrationError::Unavailable(
                "circuit breaker is open".to_string(),
            ));
        }

        let response = match self.call(access_token).await {
            Ok(response) => {
                self.breaker.on_success().await;
                response
            }
            Err(error) => {
                if self.breaker.on_failure().await {
                    tracing::warn!(endpoint = %self.endpoint, "iam circuit breaker opened");
                }
                return Err(error);
            }
        };

        if !response.is_valid {
            return Err(IamIntegrationError::InvalidToken(response.error_message));
        }

        Ok(VerifiedUserContext {
            subject_id: VerifiedSubject::new(&response.subject_id)
                .map_err(IamIntegrationError::InvalidToken)?,
            jti: Some(response.jti).filter(|jti| !jti.is_empty()),
            exp_epoch_seconds: response.exp_epoch_seconds,
        })
    }
}
