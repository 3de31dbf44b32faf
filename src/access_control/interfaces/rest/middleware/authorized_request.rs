use async_trait::async_trait;
use axum::{Json, extract::FromRequestParts, http::StatusCode, http::request::Parts};

use crate::access_control::{
    application::enforcement::query_scope_enforcer::{QueryScopeEnforcer, enforcement_gap},
    domain::model::{
        entities::{authorization_decision::AuthorizationDecision, principal::Principal},
        enums::access_control_domain_error::AccessControlDomainError,
        value_objects::principal_id::PrincipalId,
    },
    interfaces::rest::resources::access_control_error_response_resource::{
        AccessControlErrorResponseResource, map_domain_error,
    },
};

/// Placed in request extensions by the authorization middleware once the
/// gate has allowed the request.
#[derive(Clone, Debug)]
pub struct AuthorizedRequest {
    principal: Principal,
    decision: AuthorizationDecision,
}

impl AuthorizedRequest {
    pub(crate) fn new(principal: Principal, decision: AuthorizationDecision) -> Self {
        Self {
            principal,
            decision,
        }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn decision(&self) -> &AuthorizationDecision {
        &self.decision
    }

    pub fn enforcer(&self) -> Result<QueryScopeEnforcer, AccessControlDomainError> {
        QueryScopeEnforcer::for_decision(&self.decision)
    }
}

/// A handler that asks for `AuthorizedRequest` on a route the middleware
/// does not cover gets an enforcement gap, not an anonymous pass.
#[async_trait]
impl<S> FromRequestParts<S> for AuthorizedRequest
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<AccessControlErrorResponseResource>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthorizedRequest>()
            .cloned()
            .ok_or_else(|| {
                map_domain_error(enforcement_gap(
                    &PrincipalId::anonymous(),
                    "handler reached without an authorization decision",
                ))
            })
    }
}
