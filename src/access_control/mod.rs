use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use crate::{
    access_control::{
        application::{
            audit::authorization_audit_recorder_impl::{
                AuditWorkerHandle, AuthorizationAuditRecorderImpl,
            },
            query_services::authorization_gate_impl::AuthorizationGateImpl,
            resolvers::{
                permission_resolver::PermissionResolver,
                tenant_grant_resolver::TenantGrantResolver,
            },
        },
        infrastructure::persistence::repositories::{
            authorization_decision_audit_repository::AuthorizationDecisionAuditRepository,
            in_memory::in_memory_authorization_decision_audit_repository_impl::InMemoryAuthorizationDecisionAuditRepositoryImpl,
            postgres::sqlx_authorization_decision_audit_repository_impl::SqlxAuthorizationDecisionAuditRepositoryImpl,
        },
        interfaces::rest::{
            controllers::profile_rest_controller::{ProfileRestControllerState, router},
            middleware::authorization_middleware::AccessControlState,
        },
    },
    config::{app_config::AppConfig, authorization_config::AuthorizationConfig},
    iam_integration::{
        application::{
            acl::{
                gateway_trust_iam_authentication_facade_impl::GatewayTrustIamAuthenticationFacadeImpl,
                grpc_iam_authentication_facade_impl::GrpcIamAuthenticationFacadeImpl,
            },
            claims_extractor::ClaimsExtractor,
        },
        interfaces::acl::iam_authentication_facade::IamAuthenticationFacade,
    },
};

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

const IN_MEMORY_AUDIT_RETENTION: usize = 10_000;

/// Everything other bounded contexts and the binary need from this one.
pub struct AccessControlContext {
    pub state: AccessControlState,
    pub router: Router,
    pub audit_worker: AuditWorkerHandle,
}

/// Wires the engine from configuration. Audit records go to Postgres when a
/// pool is given, otherwise to a bounded in-memory store.
pub fn build_access_control(
    config: &AppConfig,
    authorization: &AuthorizationConfig,
    pool: Option<PgPool>,
) -> Result<AccessControlContext, String> {
    let audit_repository: Arc<dyn AuthorizationDecisionAuditRepository> = match pool {
        Some(pool) => Arc::new(SqlxAuthorizationDecisionAuditRepositoryImpl::new(pool)),
        None => {
            tracing::warn!("no database configured; audit records are kept in memory only");
            Arc::new(InMemoryAuthorizationDecisionAuditRepositoryImpl::new(
                IN_MEMORY_AUDIT_RETENTION,
            ))
        }
    };

    let iam_authentication_facade: Arc<dyn IamAuthenticationFacade> =
        match &config.iam_grpc_endpoint {
            Some(endpoint) => Arc::new(GrpcIamAuthenticationFacadeImpl::new(
                endpoint.clone(),
                config.iam_timeout,
                config.iam_failure_threshold,
                config.iam_circuit_open,
            )),
            None => {
                tracing::warn!(
                    "IAM_GRPC_ENDPOINT is not set; token signatures are trusted as verified by the gateway"
                );
                Arc::new(GatewayTrustIamAuthenticationFacadeImpl::new())
            }
        };

    assemble_access_control(
        authorization,
        audit_repository,
        iam_authentication_facade,
        config.audit_queue_capacity,
    )
}

/// Wiring with explicit collaborators. Must run inside a tokio runtime
/// because it starts the audit worker.
pub fn assemble_access_control(
    authorization: &AuthorizationConfig,
    audit_repository: Arc<dyn AuthorizationDecisionAuditRepository>,
    iam_authentication_facade: Arc<dyn IamAuthenticationFacade>,
    audit_queue_capacity: usize,
) -> Result<AccessControlContext, String> {
    let (audit_recorder, audit_worker) =
        AuthorizationAuditRecorderImpl::spawn(audit_repository.clone(), audit_queue_capacity);

    let authorization_gate = Arc::new(AuthorizationGateImpl::new(
        PermissionResolver::new(
            authorization.role_table.clone(),
            authorization.tenant_roles.clone(),
        ),
        TenantGrantResolver::new(authorization.tenant_roles.clone()),
        Arc::new(audit_recorder),
    ));

    let state = AccessControlState {
        claims_extractor: Arc::new(ClaimsExtractor::new(authorization.claims.clone())),
        iam_authentication_facade,
        authorization_gate,
    };

    let router = router(ProfileRestControllerState { audit_repository }, &state)
        .map_err(|e| e.to_string())?;

    Ok(AccessControlContext {
        state,
        router,
        audit_worker,
    })
}
