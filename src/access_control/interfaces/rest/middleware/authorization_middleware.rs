//! Per-route authorization. Every protected route is wrapped with
//! [`authorize_request`] bound to the operation name and the permissions the
//! route needs; the gate runs exactly once per request.

use std::{collections::BTreeSet, sync::Arc};

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::{
    access_control::{
        domain::{
            model::{
                entities::principal::Principal,
                enums::{
                    access_control_domain_error::AccessControlDomainError,
                    denial_reason::DenialReason,
                },
                queries::evaluate_authorization_query::EvaluateAuthorizationQuery,
                value_objects::{
                    operation_name::OperationName, permission::Permission,
                    tenant_selection::TenantSelection,
                },
            },
            services::authorization_gate::{AuthorizationGate, CredentialRejection},
        },
        interfaces::rest::{
            middleware::authorized_request::AuthorizedRequest,
            resources::access_control_error_response_resource::map_domain_error,
        },
    },
    iam_integration::{
        application::claims_extractor::{ClaimsExtractor, token_fingerprint},
        interfaces::acl::iam_authentication_facade::IamAuthenticationFacade,
    },
};

pub const TENANT_HEADER: &str = "x-tenant";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct AccessControlState {
    pub claims_extractor: Arc<ClaimsExtractor>,
    pub iam_authentication_facade: Arc<dyn IamAuthenticationFacade>,
    pub authorization_gate: Arc<dyn AuthorizationGate>,
}

impl AccessControlState {
    /// Binds an operation and its required permissions for use with
    /// `axum::middleware::from_fn_with_state(.., authorize_request)`.
    pub fn require(
        &self,
        operation: &str,
        permissions: &[&str],
    ) -> Result<RouteAuthorization, AccessControlDomainError> {
        let required_permissions = permissions
            .iter()
            .map(|permission| Permission::new(permission.to_string()))
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(RouteAuthorization {
            state: self.clone(),
            operation: OperationName::new(operation.to_string())?,
            required_permissions,
        })
    }
}

#[derive(Clone)]
pub struct RouteAuthorization {
    state: AccessControlState,
    operation: OperationName,
    required_permissions: BTreeSet<Permission>,
}

impl RouteAuthorization {
    pub fn operation(&self) -> &OperationName {
        &self.operation
    }
}

pub async fn authorize_request(
    State(route): State<RouteAuthorization>,
    mut request: Request,
    next: Next,
) -> Response {
    let headers = request.headers();
    let request_id = header_value(headers, REQUEST_ID_HEADER);
    let tenant_selection =
        TenantSelection::from_header(header_value(headers, TENANT_HEADER).as_deref());
    let authorization = header_value(headers, header::AUTHORIZATION.as_str());

    let principal = match authenticate(&route.state, authorization.as_deref()).await {
        Ok(principal) => principal,
        Err(error) => {
            let reason = error
                .denial_reason()
                .filter(DenialReason::is_credential_failure)
                .unwrap_or(DenialReason::MalformedCredential);

            route.state.authorization_gate.reject_credential(CredentialRejection {
                operation: route.operation.clone(),
                reason,
                request_id,
            });
            return denial_response(error);
        }
    };

    let query = EvaluateAuthorizationQuery::from_validated(
        principal.clone(),
        route.operation.clone(),
        route.required_permissions.clone(),
        tenant_selection,
        request_id,
    );

    let decision = route.state.authorization_gate.evaluate(&query);

    if let Some(reason) = decision.denial_reason() {
        return denial_response(reason.into());
    }

    request
        .extensions_mut()
        .insert(AuthorizedRequest::new(principal, decision));

    next.run(request).await
}

async fn authenticate(
    state: &AccessControlState,
    authorization: Option<&str>,
) -> Result<Principal, AccessControlDomainError> {
    let token = ClaimsExtractor::bearer_token(authorization)?;

    // Shape and claims first so malformed tokens never reach the IdP.
    let principal = state
        .claims_extractor
        .extract_token(token, Utc::now())
        .inspect_err(|error| {
            tracing::info!(
                token = %token_fingerprint(token),
                reason = error.reason_code(),
                detail = ?error,
                "credential rejected by claims extraction"
            );
        })?;

    let verified = state
        .iam_authentication_facade
        .verify_access_token(token)
        .await
        .map_err(AccessControlDomainError::from)?;

    if !verified.subject_id.matches(principal.id()) {
        tracing::warn!(
            token = %token_fingerprint(token),
            principal_id = %principal.id(),
            "verified subject does not match token subject"
        );
        return Err(AccessControlDomainError::UntrustedCredential(
            "subject mismatch".to_string(),
        ));
    }

    Ok(principal)
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn denial_response(error: AccessControlDomainError) -> Response {
    let (status, body) = map_domain_error(error);
    let mut response = (status, body).into_response();

    if status == StatusCode::UNAUTHORIZED {
        response
            .headers_mut()
            .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    }

    response
}
