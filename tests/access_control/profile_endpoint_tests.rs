use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use chrono::Utc;
use serde_json::Value;
use tenant_authz_engine::{
    access_control::{
        assemble_access_control,
        domain::model::{
            enums::{decision_effect::DecisionEffect, denial_reason::DenialReason},
            events::authorization_decision_audited_event::AuthorizationDecisionAuditedEvent,
        },
        infrastructure::persistence::repositories::authorization_decision_audit_repository::AuthorizationDecisionAuditRepository,
        interfaces::rest::resources::profile_resource::{
            AuthorizationDecisionRecordResource, ProfileResource,
        },
    },
    iam_integration::interfaces::acl::iam_authentication_facade::IamIntegrationError,
};
use tower::ServiceExt;
use uuid::Uuid;

use crate::support::{
    FakeAuditRepository, FakeIamAuthenticationFacade, authorization_config, claims, token,
};

const SUBJECT: &str = "user-42";

struct ProfileApp {
    router: Router,
    iam: Arc<FakeIamAuthenticationFacade>,
    audit: Arc<FakeAuditRepository>,
}

fn profile_app() -> ProfileApp {
    let iam = Arc::new(FakeIamAuthenticationFacade::new());
    let audit = Arc::new(FakeAuditRepository::new());
    let context = assemble_access_control(&authorization_config(), audit.clone(), iam.clone(), 64)
        .expect("access control");

    ProfileApp {
        router: context.router,
        iam,
        audit,
    }
}

fn get(uri: &str, groups: Option<&[&str]>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).header("x-request-id", "req-profile");
    if let Some(groups) = groups {
        builder = builder.header(
            header::AUTHORIZATION,
            format!("Bearer {}", token(&claims(SUBJECT, groups))),
        );
    }
    builder.body(Body::empty()).expect("request")
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

fn stored_event(operation: &str, request_id: &str) -> AuthorizationDecisionAuditedEvent {
    AuthorizationDecisionAuditedEvent {
        event_id: Uuid::now_v7(),
        principal_id: SUBJECT.to_string(),
        operation: operation.to_string(),
        effect: DecisionEffect::Deny,
        reason: Some(DenialReason::InsufficientPermission),
        scope: None,
        request_id: Some(request_id.to_string()),
        occurred_at: Utc::now(),
    }
}

#[tokio::test]
async fn basic_user_sees_own_profile_with_self_scope() {
    let app = profile_app();

    let response = app
        .router
        .oneshot(get("/me", Some(&["basic-user"])))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["principal_id"], SUBJECT);
    assert_eq!(body["scope"], "selfonly");
    assert_eq!(body["permissions"], serde_json::json!(["profile:read"]));
    assert_eq!(app.iam.calls(), 1);
}

#[tokio::test]
async fn missing_credential_is_challenged() {
    let app = profile_app();

    let response = app.router.oneshot(get("/me", None)).await.expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).map(|v| v.as_bytes()),
        Some(&b"Bearer"[..])
    );
    let body = json_body(response).await;
    assert_eq!(body["reason_code"], "malformed_credential");
    assert_eq!(app.iam.calls(), 0);
}

#[tokio::test]
async fn identity_provider_outage_is_service_unavailable() {
    let app = profile_app();
    app.iam
        .fail_with(IamIntegrationError::Unavailable("connection refused".to_string()));

    let response = app
        .router
        .oneshot(get("/me", Some(&["basic-user"])))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(response).await;
    assert_eq!(body["reason_code"], "identity_provider_unavailable");
}

#[tokio::test]
async fn verified_subject_must_match_token_subject() {
    let app = profile_app();
    app.iam.vouch_for("someone-else");

    let response = app
        .router
        .oneshot(get("/me", Some(&["basic-user"])))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["reason_code"], "untrusted_credential");
}

#[tokio::test]
async fn unknown_groups_cannot_read_profile() {
    let app = profile_app();

    let response = app
        .router
        .oneshot(get("/me", Some(&["finance-reed-only"])))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["reason_code"], "insufficient_permission");
}

#[tokio::test]
async fn decision_history_lists_own_records_most_recent_first() {
    let app = profile_app();
    for (operation, request_id) in [
        ("invoices.list", "req-1"),
        ("invoices.create", "req-2"),
        ("invoices.delete", "req-3"),
    ] {
        app.audit
            .save_decision(&stored_event(operation, request_id))
            .await
            .expect("seeded");
    }

    let response = app
        .router
        .oneshot(get("/me/authorization-decisions?limit=2", Some(&["basic-user"])))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let records = body.as_array().expect("array");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["request_id"], "req-3");
    assert_eq!(records[0]["decision"], "deny");
    assert_eq!(records[0]["reason"], "insufficient_permission");
    assert_eq!(records[0]["scope"], "none");
    assert_eq!(records[1]["operation"], "invoices.create");
}

#[tokio::test]
async fn decision_history_rejects_out_of_range_limit() {
    let app = profile_app();

    let response = app
        .router
        .oneshot(get("/me/authorization-decisions?limit=0", Some(&["basic-user"])))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["reason_code"], "invalid_request");
}

#[test]
fn timestamps_are_documented_as_date_time() {
    let profile = serde_json::to_value(<ProfileResource as utoipa::PartialSchema>::schema())
        .expect("profile schema");
    let record =
        serde_json::to_value(<AuthorizationDecisionRecordResource as utoipa::PartialSchema>::schema())
            .expect("record schema");

    assert_eq!(profile["properties"]["expires_at"]["format"], "date-time");
    assert_eq!(record["properties"]["occurred_at"]["format"], "date-time");
}
