use std::time::Duration;

use tenant_authz_engine::{
    access_control::domain::model::enums::{
        access_control_domain_error::AccessControlDomainError, principal_tier::PrincipalTier,
    },
    access_control::application::resolvers::permission_resolver::PermissionResolver,
    config::{
        app_config::AppConfig,
        authorization_config::{AuthorizationConfig, parse_role_permissions},
    },
    shared::infrastructure::observability::LogFormat,
};

use crate::support::{ISSUER, TENANT_ATTRIBUTE, base_env, lookup};

fn load_with(overrides: &[(&'static str, &'static str)]) -> Result<AuthorizationConfig, AccessControlDomainError> {
    let mut env = base_env();
    env.retain(|(key, _)| overrides.iter().all(|(override_key, _)| override_key != key));
    env.extend_from_slice(overrides);
    AuthorizationConfig::from_lookup(lookup(&env))
}

fn assert_invalid(overrides: &[(&'static str, &'static str)]) {
    let result = load_with(overrides);
    assert!(
        matches!(result, Err(AccessControlDomainError::InvalidConfiguration(_))),
        "expected invalid configuration for {overrides:?}"
    );
}

#[test]
fn defaults_fill_everything_but_the_audience() {
    let config = load_with(&[]).expect("config");

    assert_eq!(config.claims.issuer.as_deref(), Some(ISSUER));
    assert_eq!(config.claims.leeway_seconds, 60);
    assert_eq!(config.claims.custom_attribute_prefix, "extension_");
    assert_eq!(config.claims.tenant_attribute.as_deref(), Some(TENANT_ATTRIBUTE));
    assert!(config.role_table.is_known_role("global-admin"));
    assert!(config.role_table.is_basic_role("basic-user"));
    assert!(config.tenant_roles.is_tenant_role("tenant-acme"));
    assert!(config.tenant_roles.is_tenant_role("tenant-all"));
}

#[test]
fn audience_is_required() {
    let config = AuthorizationConfig::from_lookup(lookup(&[("AUTHZ_ISSUER", ISSUER)]));

    assert!(matches!(config, Err(AccessControlDomainError::InvalidConfiguration(_))));

    assert_invalid(&[("AUTHZ_AUDIENCE", "   ")]);
}

#[test]
fn custom_role_table_replaces_the_default() {
    let config = load_with(&[
        ("AUTHZ_ROLE_PERMISSIONS", "auditor:reports:read|invoices:read, staff:profile:read"),
        ("AUTHZ_BASIC_ROLES", "staff"),
    ])
    .expect("config");

    let resolver = PermissionResolver::new(config.role_table.clone(), config.tenant_roles.clone());

    assert!(!config.role_table.is_known_role("global-admin"));
    assert_eq!(
        resolver.resolve(["auditor".to_string()].iter()).tier,
        PrincipalTier::Elevated
    );
    assert_eq!(
        resolver.resolve(["staff".to_string()].iter()).tier,
        PrincipalTier::BasicOnly
    );
}

#[test]
fn malformed_role_entries_fail_fast() {
    assert_invalid(&[("AUTHZ_ROLE_PERMISSIONS", "auditor")]);
    assert_invalid(&[("AUTHZ_ROLE_PERMISSIONS", "auditor:")]);
    assert_invalid(&[("AUTHZ_ROLE_PERMISSIONS", "auditor:Reports")]);
    assert_invalid(&[("AUTHZ_ROLE_PERMISSIONS", "auditor:reports")]);
    assert_invalid(&[("AUTHZ_ROLE_PERMISSIONS", "auditor:reports:read,auditor:*")]);
}

#[test]
fn basic_roles_must_be_known_and_bounded() {
    assert_invalid(&[("AUTHZ_BASIC_ROLES", "guest")]);
    assert_invalid(&[("AUTHZ_BASIC_ROLES", "global-admin")]);
}

#[test]
fn permission_roles_cannot_look_like_tenant_roles() {
    assert_invalid(&[("AUTHZ_ROLE_PERMISSIONS", "tenant-ops:reports:read,basic-user:profile:read")]);
    assert_invalid(&[("AUTHZ_ALL_TENANTS_ROLE", "global-admin")]);
}

#[test]
fn leeway_must_be_a_non_negative_integer() {
    assert_invalid(&[("AUTHZ_LEEWAY_SECONDS", "-5")]);
    assert_invalid(&[("AUTHZ_LEEWAY_SECONDS", "soon")]);

    let config = load_with(&[("AUTHZ_LEEWAY_SECONDS", "0")]).expect("config");
    assert_eq!(config.claims.leeway_seconds, 0);
}

#[test]
fn parse_role_permissions_trims_entries() {
    let roles = parse_role_permissions(" root:* , , reader : reports:read | invoices:read ")
        .expect("roles");

    assert_eq!(roles.len(), 2);
}

#[test]
fn app_config_defaults() {
    let config = AppConfig::from_lookup(|_| None);

    assert_eq!(config.port, 8081);
    assert_eq!(config.database_url, None);
    assert_eq!(config.audit_queue_capacity, 1024);
    assert_eq!(config.log_format, LogFormat::Text);
    assert_eq!(config.iam_grpc_endpoint, None);
    assert_eq!(config.iam_timeout, Duration::from_millis(2_000));
    assert_eq!(config.iam_failure_threshold, 5);
    assert_eq!(config.iam_circuit_open, Duration::from_secs(30));
}

#[test]
fn app_config_reads_overrides_and_ignores_garbage() {
    let config = AppConfig::from_lookup(lookup(&[
        ("PORT", "9090"),
        ("DATABASE_URL", "postgres://localhost/authz"),
        ("AUDIT_QUEUE_CAPACITY", "0"),
        ("LOG_FORMAT", "json"),
        ("IAM_GRPC_ENDPOINT", "http://iam:50051"),
        ("IAM_TIMEOUT_MS", "not-a-number"),
    ]));

    assert_eq!(config.port, 9090);
    assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/authz"));
    assert_eq!(config.audit_queue_capacity, 1024);
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.iam_grpc_endpoint.as_deref(), Some("http://iam:50051"));
    assert_eq!(config.iam_timeout, Duration::from_millis(2_000));
}
