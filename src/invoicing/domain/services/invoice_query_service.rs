use async_trait::async_trait;

use crate::{
    access_control::application::enforcement::query_scope_enforcer::QueryScopeEnforcer,
    invoicing::domain::model::{
        entities::invoice::Invoice,
        enums::invoicing_domain_error::InvoicingDomainError,
        queries::{get_invoice_query::GetInvoiceQuery, list_invoices_query::ListInvoicesQuery},
    },
};

#[async_trait]
pub trait InvoiceQueryService: Send + Sync {
    async fn handle_list(
        &self,
        enforcer: &QueryScopeEnforcer,
        query: ListInvoicesQuery,
    ) -> Result<Vec<Invoice>, InvoicingDomainError>;

    async fn handle_get(
        &self,
        enforcer: &QueryScopeEnforcer,
        query: GetInvoiceQuery,
    ) -> Result<Invoice, InvoicingDomainError>;
}
