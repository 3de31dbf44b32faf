use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::get,
};
use validator::Validate;

use crate::access_control::{
    domain::model::{
        enums::access_control_domain_error::AccessControlDomainError,
        events::authorization_decision_audited_event::AuthorizationDecisionAuditedEvent,
        value_objects::tenant_scope::NO_SCOPE_KEYWORD,
    },
    infrastructure::persistence::repositories::authorization_decision_audit_repository::AuthorizationDecisionAuditRepository,
    interfaces::rest::{
        middleware::{
            authorization_middleware::{AccessControlState, authorize_request},
            authorized_request::AuthorizedRequest,
        },
        resources::{
            access_control_error_response_resource::{
                AccessControlErrorResponseResource, map_domain_error,
            },
            profile_resource::{
                AuthorizationDecisionHistoryQueryResource, AuthorizationDecisionRecordResource,
                ProfileResource,
            },
        },
    },
};

const DEFAULT_HISTORY_LIMIT: u32 = 50;

#[derive(Clone)]
pub struct ProfileRestControllerState {
    pub audit_repository: Arc<dyn AuthorizationDecisionAuditRepository>,
}

pub fn router(
    state: ProfileRestControllerState,
    access: &AccessControlState,
) -> Result<Router, AccessControlDomainError> {
    let read_profile = access.require("profile.read", &["profile:read"])?;
    let read_history = access.require("profile.decisions.list", &["profile:read"])?;

    Ok(Router::new()
        .route(
            "/me",
            get(get_profile).route_layer(from_fn_with_state(read_profile, authorize_request)),
        )
        .route(
            "/me/authorization-decisions",
            get(list_my_authorization_decisions)
                .route_layer(from_fn_with_state(read_history, authorize_request)),
        )
        .with_state(state))
}

#[utoipa::path(
    get,
    path = "/me",
    tag = "access-control",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Caller profile and effective grants", body = ProfileResource),
        (status = 401, description = "Credential rejected", body = AccessControlErrorResponseResource),
        (status = 403, description = "Access denied", body = AccessControlErrorResponseResource)
    )
)]
pub async fn get_profile(authorized: AuthorizedRequest) -> Json<ProfileResource> {
    let principal = authorized.principal();
    let decision = authorized.decision();

    Json(ProfileResource {
        principal_id: principal.id().to_string(),
        display_name: principal.display_name().to_string(),
        groups: principal.groups().iter().cloned().collect(),
        permissions: decision.granted_permissions().to_strings(),
        scope: decision
            .scope()
            .map(|scope| scope.render())
            .unwrap_or_else(|| NO_SCOPE_KEYWORD.to_string()),
        expires_at: principal.expires_at(),
    })
}

#[utoipa::path(
    get,
    path = "/me/authorization-decisions",
    tag = "access-control",
    security(("bearerAuth" = [])),
    params(AuthorizationDecisionHistoryQueryResource),
    responses(
        (status = 200, description = "Most recent audited decisions for the caller", body = [AuthorizationDecisionRecordResource]),
        (status = 400, description = "Invalid request", body = AccessControlErrorResponseResource),
        (status = 401, description = "Credential rejected", body = AccessControlErrorResponseResource),
        (status = 500, description = "Infrastructure error", body = AccessControlErrorResponseResource)
    )
)]
pub async fn list_my_authorization_decisions(
    State(state): State<ProfileRestControllerState>,
    authorized: AuthorizedRequest,
    Query(query): Query<AuthorizationDecisionHistoryQueryResource>,
) -> Result<
    Json<Vec<AuthorizationDecisionRecordResource>>,
    (StatusCode, Json<AccessControlErrorResponseResource>),
> {
    if let Err(validation_error) = query.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(AccessControlErrorResponseResource {
                reason_code: "invalid_request".to_string(),
                message: validation_error.to_string(),
            }),
        ));
    }

    let events = state
        .audit_repository
        .find_decisions_by_principal(
            authorized.principal().id(),
            query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT),
        )
        .await
        .map_err(map_domain_error)?;

    Ok(Json(events.into_iter().map(to_resource).collect()))
}

fn to_resource(event: AuthorizationDecisionAuditedEvent) -> AuthorizationDecisionRecordResource {
    AuthorizationDecisionRecordResource {
        event_id: event.event_id.to_string(),
        scope: event.rendered_scope(),
        operation: event.operation,
        decision: event.effect.as_str().to_string(),
        reason: event.reason.map(|reason| reason.as_str().to_string()),
        request_id: event.request_id,
        occurred_at: event.occurred_at,
    }
}
