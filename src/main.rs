use axum::Router;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tenant_authz_engine::{
    access_control::{
        build_access_control,
        interfaces::rest::resources::{
            access_control_error_response_resource::AccessControlErrorResponseResource,
            profile_resource::{
                AuthorizationDecisionHistoryQueryResource, AuthorizationDecisionRecordResource,
                ProfileResource,
            },
        },
    },
    config::{app_config::AppConfig, authorization_config::AuthorizationConfig},
    invoicing::{
        build_invoicing_router,
        interfaces::rest::resources::{
            create_invoice_request_resource::{
                CreateInvoiceRequestResource, ListInvoicesQueryResource,
            },
            invoice_resource::InvoiceResource,
            invoicing_error_response_resource::InvoicingErrorResponseResource,
        },
    },
    shared::{
        infrastructure::observability::init_tracing,
        interfaces::rest::openapi::security::BearerSecurityAddon,
    },
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        tenant_authz_engine::access_control::interfaces::rest::controllers::profile_rest_controller::get_profile,
        tenant_authz_engine::access_control::interfaces::rest::controllers::profile_rest_controller::list_my_authorization_decisions,
        tenant_authz_engine::invoicing::interfaces::rest::controllers::invoicing_rest_controller::list_invoices,
        tenant_authz_engine::invoicing::interfaces::rest::controllers::invoicing_rest_controller::create_invoice,
        tenant_authz_engine::invoicing::interfaces::rest::controllers::invoicing_rest_controller::get_invoice,
        tenant_authz_engine::invoicing::interfaces::rest::controllers::invoicing_rest_controller::delete_invoice
    ),
    components(
        schemas(
            AccessControlErrorResponseResource,
            ProfileResource,
            AuthorizationDecisionRecordResource,
            AuthorizationDecisionHistoryQueryResource,
            InvoiceResource,
            CreateInvoiceRequestResource,
            ListInvoicesQueryResource,
            InvoicingErrorResponseResource
        )
    ),
    tags(
        (name = "access-control", description = "Caller profile and authorization decision history"),
        (name = "invoicing", description = "Tenant-partitioned invoices")
    ),
    modifiers(&BearerSecurityAddon)
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(config.log_format);

    let authorization =
        AuthorizationConfig::from_env().expect("invalid authorization configuration");

    let pool = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(url)
                .await
                .expect("failed to connect to database");
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .expect("failed to run migrations");
            Some(pool)
        }
        None => None,
    };

    let access_control = build_access_control(&config, &authorization, pool.clone())
        .expect("failed to build access control");
    let invoicing_router = build_invoicing_router(&access_control.state, pool)
        .expect("failed to build invoicing router");

    let app = Router::new()
        .merge(access_control.router)
        .merge(invoicing_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind server address");

    tracing::info!(port = config.port, "server listening; swagger ui at /swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("failed to start axum server");

    access_control.audit_worker.shutdown().await;
    tracing::info!("audit queue flushed; shutting down");
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
