use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use crate::{
    access_control::interfaces::rest::middleware::authorization_middleware::AccessControlState,
    invoicing::{
        application::{
            command_services::invoice_command_service_impl::InvoiceCommandServiceImpl,
            query_services::invoice_query_service_impl::InvoiceQueryServiceImpl,
        },
        infrastructure::persistence::repositories::{
            in_memory::in_memory_invoice_repository_impl::InMemoryInvoiceRepositoryImpl,
            invoice_repository::InvoiceRepository,
            postgres::sqlx_invoice_repository_impl::SqlxInvoiceRepositoryImpl,
        },
        interfaces::rest::controllers::invoicing_rest_controller::{
            InvoicingRestControllerState, router,
        },
    },
};

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub fn build_invoicing_router(
    access: &AccessControlState,
    pool: Option<PgPool>,
) -> Result<Router, String> {
    let repository: Arc<dyn InvoiceRepository> = match pool {
        Some(pool) => Arc::new(SqlxInvoiceRepositoryImpl::new(pool)),
        None => Arc::new(InMemoryInvoiceRepositoryImpl::new()),
    };

    build_invoicing_router_with(access, repository)
}

pub fn build_invoicing_router_with(
    access: &AccessControlState,
    repository: Arc<dyn InvoiceRepository>,
) -> Result<Router, String> {
    let state = InvoicingRestControllerState {
        command_service: Arc::new(InvoiceCommandServiceImpl::new(repository.clone())),
        query_service: Arc::new(InvoiceQueryServiceImpl::new(repository)),
    };

    router(state, access).map_err(|e| e.to_string())
}
