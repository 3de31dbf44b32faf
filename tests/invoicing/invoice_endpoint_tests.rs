use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use serde_json::{Value, json};
use tenant_authz_engine::access_control::{
    domain::model::{
        enums::{decision_effect::DecisionEffect, denial_reason::DenialReason},
        value_objects::principal_id::PrincipalId,
    },
    infrastructure::persistence::repositories::authorization_decision_audit_repository::AuthorizationDecisionAuditRepository,
};
use tower::ServiceExt;

use crate::support::{bearer, create_app, expired_bearer, json_body, request, with_json};

const ACME_WRITER: &[&str] = &["finance-full", "tenant-acme"];
const GLOBEX_WRITER: &[&str] = &["finance-full", "tenant-globex"];
const ACME_READER: &[&str] = &["finance-read-only", "tenant-acme"];

async fn send(router: &Router, request: Request<Body>) -> Response {
    router.clone().oneshot(request).await.expect("response")
}

fn empty(builder: axum::http::request::Builder) -> Request<Body> {
    builder.body(Body::empty()).expect("request")
}

async fn create_invoice(router: &Router, groups: &[&str], customer: &str) -> Value {
    let response = send(
        router,
        with_json(
            request(Method::POST, "/api/v1/invoices", Some(bearer(groups))),
            json!({ "customer_name": customer, "amount_cents": 4200, "currency": "eur" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

async fn list(router: &Router, groups: &[&str]) -> Response {
    send(
        router,
        empty(request(Method::GET, "/api/v1/invoices", Some(bearer(groups)))),
    )
    .await
}

fn tenants_of(body: &Value) -> Vec<String> {
    let mut tenants: Vec<String> = body
        .as_array()
        .expect("array")
        .iter()
        .map(|invoice| invoice["tenant_id"].as_str().expect("tenant").to_string())
        .collect();
    tenants.sort();
    tenants
}

#[tokio::test]
async fn listing_only_returns_granted_tenants() {
    let app = create_app();
    create_invoice(&app.router, ACME_WRITER, "Wile E. Coyote").await;
    create_invoice(&app.router, GLOBEX_WRITER, "Hank Scorpio").await;

    let response = list(&app.router, ACME_READER).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(tenants_of(&body), vec!["acme".to_string()]);
    assert_eq!(body[0]["customer_name"], "Wile E. Coyote");
    assert_eq!(body[0]["currency"], "EUR");
}

#[tokio::test]
async fn global_admin_lists_every_tenant() {
    let app = create_app();
    create_invoice(&app.router, ACME_WRITER, "Wile E. Coyote").await;
    create_invoice(&app.router, GLOBEX_WRITER, "Hank Scorpio").await;

    let response = list(&app.router, &["global-admin"]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(tenants_of(&body), vec!["acme".to_string(), "globex".to_string()]);
}

#[tokio::test]
async fn selecting_an_ungranted_tenant_is_forbidden_without_detail() {
    let app = create_app();
    create_invoice(&app.router, GLOBEX_WRITER, "Hank Scorpio").await;

    let response = send(
        &app.router,
        empty(
            request(Method::GET, "/api/v1/invoices", Some(bearer(ACME_READER)))
                .header("x-tenant", "globex"),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["reason_code"], "tenant_selection_out_of_scope");
    let rendered = body.to_string();
    assert!(!rendered.contains("globex"));
    assert!(!rendered.contains("acme"));
}

#[tokio::test]
async fn filtering_by_an_ungranted_tenant_is_forbidden() {
    let app = create_app();

    let response = send(
        &app.router,
        empty(request(
            Method::GET,
            "/api/v1/invoices?tenant_id=globex",
            Some(bearer(ACME_READER)),
        )),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["reason_code"], "tenant_selection_out_of_scope");
}

#[tokio::test]
async fn read_only_caller_cannot_delete() {
    let app = create_app();
    let created = create_invoice(&app.router, ACME_WRITER, "Wile E. Coyote").await;
    let uri = format!("/api/v1/invoices/{}", created["id"].as_str().expect("id"));

    let response = send(
        &app.router,
        empty(request(Method::DELETE, &uri, Some(bearer(ACME_READER)))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["reason_code"], "insufficient_permission");
}

#[tokio::test]
async fn permission_role_without_tenants_is_forbidden() {
    let app = create_app();

    let response = list(&app.router, &["finance-read-only"]).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["reason_code"], "no_tenant_access");
}

#[tokio::test]
async fn write_across_several_tenants_needs_a_selection() {
    let app = create_app();
    let groups = &["finance-full", "tenant-acme", "tenant-globex"];
    let payload = json!({ "customer_name": "Hank Scorpio", "amount_cents": 100, "currency": "USD" });

    let ambiguous = send(
        &app.router,
        with_json(
            request(Method::POST, "/api/v1/invoices", Some(bearer(groups))),
            payload.clone(),
        ),
    )
    .await;
    assert_eq!(ambiguous.status(), StatusCode::BAD_REQUEST);
    let body = json_body(ambiguous).await;
    assert_eq!(body["reason_code"], "tenant_selection_required");

    let selected = send(
        &app.router,
        with_json(
            request(Method::POST, "/api/v1/invoices", Some(bearer(groups))).header("x-tenant", "globex"),
            payload,
        ),
    )
    .await;
    assert_eq!(selected.status(), StatusCode::CREATED);
    let body = json_body(selected).await;
    assert_eq!(body["tenant_id"], "globex");
}

#[tokio::test]
async fn invoice_outside_scope_is_not_found() {
    let app = create_app();
    let created = create_invoice(&app.router, GLOBEX_WRITER, "Hank Scorpio").await;
    let uri = format!("/api/v1/invoices/{}", created["id"].as_str().expect("id"));

    let response = send(
        &app.router,
        empty(request(Method::GET, &uri, Some(bearer(ACME_READER)))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_invoice_in_scope() {
    let app = create_app();
    let created = create_invoice(&app.router, ACME_WRITER, "Wile E. Coyote").await;
    let uri = format!("/api/v1/invoices/{}", created["id"].as_str().expect("id"));

    let deleted = send(
        &app.router,
        empty(request(Method::DELETE, &uri, Some(bearer(ACME_WRITER)))),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let fetched = send(
        &app.router,
        empty(request(Method::GET, &uri, Some(bearer(ACME_WRITER)))),
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_invoice_id_is_a_bad_request() {
    let app = create_app();

    let response = send(
        &app.router,
        empty(request(
            Method::GET,
            "/api/v1/invoices/not-a-uuid",
            Some(bearer(ACME_READER)),
        )),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["reason_code"], "invalid_invoice_id");
}

#[tokio::test]
async fn invalid_payload_is_rejected() {
    let app = create_app();

    let response = send(
        &app.router,
        with_json(
            request(Method::POST, "/api/v1/invoices", Some(bearer(ACME_WRITER))),
            json!({ "customer_name": "Wile E. Coyote", "amount_cents": 0, "currency": "EUR" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["reason_code"], "invalid_request");
}

#[tokio::test]
async fn expired_and_malformed_credentials_are_unauthorized() {
    let app = create_app();

    let expired = send(
        &app.router,
        empty(request(Method::GET, "/api/v1/invoices", Some(expired_bearer(ACME_READER)))),
    )
    .await;
    assert_eq!(expired.status(), StatusCode::UNAUTHORIZED);
    assert!(expired.headers().contains_key(header::WWW_AUTHENTICATE));
    let body = json_body(expired).await;
    assert_eq!(body["reason_code"], "expired_credential");

    let malformed = send(
        &app.router,
        empty(request(
            Method::GET,
            "/api/v1/invoices",
            Some("Bearer not-a-token".to_string()),
        )),
    )
    .await;
    assert_eq!(malformed.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(malformed).await;
    assert_eq!(body["reason_code"], "malformed_credential");
}

#[tokio::test]
async fn every_request_leaves_an_audit_record() {
    let app = create_app();

    let anonymous = send(
        &app.router,
        empty(request(Method::GET, "/api/v1/invoices", None)),
    )
    .await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let allowed = list(&app.router, ACME_READER).await;
    assert_eq!(allowed.status(), StatusCode::OK);

    app.audit_worker.shutdown().await;

    let rejected = app
        .audit
        .find_decisions_by_principal(&PrincipalId::anonymous(), 10)
        .await
        .expect("audit");
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].reason, Some(DenialReason::MalformedCredential));
    assert_eq!(rejected[0].operation, "invoices.list");
    assert_eq!(rejected[0].request_id.as_deref(), Some("req-test"));

    let reader = PrincipalId::new("user-finance-read-only-tenant-acme".to_string()).expect("id");
    let decisions = app
        .audit
        .find_decisions_by_principal(&reader, 10)
        .await
        .expect("audit");
    assert_eq!(decisions.len(), 1);
    assert_eq!(decisions[0].effect, DecisionEffect::Allow);
    assert_eq!(decisions[0].rendered_scope(), "acme");
}
