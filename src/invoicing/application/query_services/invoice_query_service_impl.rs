use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    access_control::{
        application::enforcement::query_scope_enforcer::QueryScopeEnforcer,
        domain::model::enums::access_control_domain_error::AccessControlDomainError,
    },
    invoicing::{
        domain::{
            model::{
                entities::invoice::Invoice,
                enums::invoicing_domain_error::InvoicingDomainError,
                queries::{
                    get_invoice_query::GetInvoiceQuery, list_invoices_query::ListInvoicesQuery,
                },
            },
            services::invoice_query_service::InvoiceQueryService,
        },
        infrastructure::persistence::repositories::invoice_repository::InvoiceRepository,
    },
};

pub struct InvoiceQueryServiceImpl {
    repository: Arc<dyn InvoiceRepository>,
}

impl InvoiceQueryServiceImpl {
    pub fn new(repository: Arc<dyn InvoiceRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl InvoiceQueryService for InvoiceQueryServiceImpl {
    async fn handle_list(
        &self,
        enforcer: &QueryScopeEnforcer,
        query: ListInvoicesQuery,
    ) -> Result<Vec<Invoice>, InvoicingDomainError> {
        let filter = match query.tenant_id() {
            // A caller-supplied filter outside the scope is a denial, not a defect.
            Some(tenant) if !enforcer.scope().admits(tenant) => {
                return Err(AccessControlDomainError::TenantSelectionOutOfScope.into());
            }
            Some(tenant) => enforcer.scope_tenant(tenant)?,
            None => enforcer.scope_read()?,
        };

        let invoices = self.repository.find_all(&filter, query.limit()).await?;
        Ok(enforcer.verify_rows(&filter, invoices)?)
    }

    async fn handle_get(
        &self,
        enforcer: &QueryScopeEnforcer,
        query: GetInvoiceQuery,
    ) -> Result<Invoice, InvoicingDomainError> {
        let filter = enforcer.scope_read()?;

        let invoice = self
            .repository
            .find_by_id(&filter, query.invoice_id())
            .await?
            .ok_or(InvoicingDomainError::InvoiceNotFound)?;

        let mut verified = enforcer.verify_rows(&filter, vec![invoice])?;
        verified.pop().ok_or(InvoicingDomainError::InvoiceNotFound)
    }
}
