use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};
use validator::Validate;

use crate::{
    access_control::{
        domain::model::enums::access_control_domain_error::AccessControlDomainError,
        interfaces::rest::middleware::{
            authorization_middleware::{AccessControlState, authorize_request},
            authorized_request::AuthorizedRequest,
        },
    },
    invoicing::{
        domain::{
            model::{
                commands::{
                    create_invoice_command::CreateInvoiceCommand,
                    delete_invoice_command::DeleteInvoiceCommand,
                },
                queries::{
                    get_invoice_query::GetInvoiceQuery, list_invoices_query::ListInvoicesQuery,
                },
            },
            services::{
                invoice_command_service::InvoiceCommandService,
                invoice_query_service::InvoiceQueryService,
            },
        },
        interfaces::rest::resources::{
            create_invoice_request_resource::{
                CreateInvoiceRequestResource, ListInvoicesQueryResource,
            },
            invoice_resource::InvoiceResource,
            invoicing_error_response_resource::{InvoicingErrorResponseResource, map_domain_error},
        },
    },
};

type InvoicingError = (StatusCode, Json<InvoicingErrorResponseResource>);

#[derive(Clone)]
pub struct InvoicingRestControllerState {
    pub command_service: Arc<dyn InvoiceCommandService>,
    pub query_service: Arc<dyn InvoiceQueryService>,
}

pub fn router(
    state: InvoicingRestControllerState,
    access: &AccessControlState,
) -> Result<Router, AccessControlDomainError> {
    let list = access.require("invoices.list", &["invoices:read"])?;
    let create = access.require("invoices.create", &["invoices:create"])?;
    let read = access.require("invoices.get", &["invoices:read"])?;
    let remove = access.require("invoices.delete", &["invoices:delete"])?;

    Ok(Router::new()
        .route(
            "/api/v1/invoices",
            get(list_invoices).route_layer(from_fn_with_state(list, authorize_request)),
        )
        .route(
            "/api/v1/invoices",
            post(create_invoice).route_layer(from_fn_with_state(create, authorize_request)),
        )
        .route(
            "/api/v1/invoices/:invoice_id",
            get(get_invoice).route_layer(from_fn_with_state(read, authorize_request)),
        )
        .route(
            "/api/v1/invoices/:invoice_id",
            delete(delete_invoice).route_layer(from_fn_with_state(remove, authorize_request)),
        )
        .with_state(state))
}

fn validation_error(error: validator::ValidationErrors) -> InvoicingError {
    (
        StatusCode::BAD_REQUEST,
        Json(InvoicingErrorResponseResource {
            reason_code: "invalid_request".to_string(),
            message: error.to_string(),
        }),
    )
}

#[utoipa::path(
    get,
    path = "/api/v1/invoices",
    tag = "invoicing",
    params(
        ListInvoicesQueryResource,
        ("x-tenant" = Option<String>, Header, description = "Tenant selection"),
        ("x-request-id" = Option<String>, Header, description = "Correlation id")
    ),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Invoices visible in the caller's tenant scope", body = [InvoiceResource]),
        (status = 400, description = "Invalid request", body = InvoicingErrorResponseResource),
        (status = 401, description = "Credential rejected", body = InvoicingErrorResponseResource),
        (status = 403, description = "Access denied", body = InvoicingErrorResponseResource),
        (status = 500, description = "Internal error", body = InvoicingErrorResponseResource)
    )
)]
pub async fn list_invoices(
    State(state): State<InvoicingRestControllerState>,
    authorized: AuthorizedRequest,
    Query(query): Query<ListInvoicesQueryResource>,
) -> Result<Json<Vec<InvoiceResource>>, InvoicingError> {
    query.validate().map_err(validation_error)?;

    let enforcer = authorized.enforcer().map_err(|e| map_domain_error(e.into()))?;
    let query = ListInvoicesQuery::new(query.tenant_id, query.limit).map_err(map_domain_error)?;

    let invoices = state
        .query_service
        .handle_list(&enforcer, query)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(invoices.iter().map(InvoiceResource::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/invoices",
    tag = "invoicing",
    request_body = CreateInvoiceRequestResource,
    params(
        ("x-tenant" = Option<String>, Header, description = "Target tenant when several are granted"),
        ("x-request-id" = Option<String>, Header, description = "Correlation id")
    ),
    security(("bearerAuth" = [])),
    responses(
        (status = 201, description = "Invoice created", body = InvoiceResource),
        (status = 400, description = "Invalid request or tenant selection required", body = InvoicingErrorResponseResource),
        (status = 401, description = "Credential rejected", body = InvoicingErrorResponseResource),
        (status = 403, description = "Access denied", body = InvoicingErrorResponseResource),
        (status = 500, description = "Internal error", body = InvoicingErrorResponseResource)
    )
)]
pub async fn create_invoice(
    State(state): State<InvoicingRestControllerState>,
    authorized: AuthorizedRequest,
    Json(request): Json<CreateInvoiceRequestResource>,
) -> Result<(StatusCode, Json<InvoiceResource>), InvoicingError> {
    request.validate().map_err(validation_error)?;

    let enforcer = authorized.enforcer().map_err(|e| map_domain_error(e.into()))?;
    let command =
        CreateInvoiceCommand::new(request.customer_name, request.amount_cents, request.currency)
            .map_err(map_domain_error)?;

    let invoice = state
        .command_service
        .handle_create(&enforcer, command)
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(InvoiceResource::from(&invoice))))
}

#[utoipa::path(
    get,
    path = "/api/v1/invoices/{invoice_id}",
    tag = "invoicing",
    params(
        ("invoice_id" = String, Path, description = "Invoice id"),
        ("x-tenant" = Option<String>, Header, description = "Tenant selection")
    ),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Invoice", body = InvoiceResource),
        (status = 401, description = "Credential rejected", body = InvoicingErrorResponseResource),
        (status = 403, description = "Access denied", body = InvoicingErrorResponseResource),
        (status = 404, description = "Not found in the caller's tenant scope", body = InvoicingErrorResponseResource)
    )
)]
pub async fn get_invoice(
    State(state): State<InvoicingRestControllerState>,
    authorized: AuthorizedRequest,
    Path(invoice_id): Path<String>,
) -> Result<Json<InvoiceResource>, InvoicingError> {
    let enforcer = authorized.enforcer().map_err(|e| map_domain_error(e.into()))?;
    let query = GetInvoiceQuery::new(invoice_id).map_err(map_domain_error)?;

    let invoice = state
        .query_service
        .handle_get(&enforcer, query)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(InvoiceResource::from(&invoice)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/invoices/{invoice_id}",
    tag = "invoicing",
    params(
        ("invoice_id" = String, Path, description = "Invoice id"),
        ("x-tenant" = Option<String>, Header, description = "Tenant selection")
    ),
    security(("bearerAuth" = [])),
    responses(
        (status = 204, description = "Invoice deleted"),
        (status = 401, description = "Credential rejected", body = InvoicingErrorResponseResource),
        (status = 403, description = "Access denied", body = InvoicingErrorResponseResource),
        (status = 404, description = "Not found in the caller's tenant scope", body = InvoicingErrorResponseResource)
    )
)]
pub async fn delete_invoice(
    State(state): State<InvoicingRestControllerState>,
    authorized: AuthorizedRequest,
    Path(invoice_id): Path<String>,
) -> Result<StatusCode, InvoicingError> {
    let enforcer = authorized.enforcer().map_err(|e| map_domain_error(e.into()))?;
    let command = DeleteInvoiceCommand::new(invoice_id).map_err(map_domain_error)?;

    state
        .command_service
        .handle_delete(&enforcer, command)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}
