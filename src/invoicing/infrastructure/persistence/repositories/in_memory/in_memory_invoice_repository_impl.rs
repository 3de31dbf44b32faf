use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    access_control::application::enforcement::query_scope_enforcer::{
        TenantFilter, TenantOwned, TenantWriteTarget,
    },
    invoicing::{
        domain::model::{
            entities::invoice::Invoice, enums::invoicing_domain_error::InvoicingDomainError,
            value_objects::invoice_id::InvoiceId,
        },
        infrastructure::persistence::repositories::invoice_repository::InvoiceRepository,
    },
};

#[derive(Default)]
pub struct InMemoryInvoiceRepositoryImpl {
    invoices: RwLock<Vec<Invoice>>,
}

impl InMemoryInvoiceRepositoryImpl {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepositoryImpl {
    async fn find_all(
        &self,
        filter: &TenantFilter,
        limit: u32,
    ) -> Result<Vec<Invoice>, InvoicingDomainError> {
        let invoices = self.invoices.read().await;
        let mut visible: Vec<Invoice> = invoices
            .iter()
            .filter(|invoice| filter.admits(invoice.tenant_id()))
            .cloned()
            .collect();

        visible.sort_by(|a, b| {
            b.issued_at()
                .cmp(&a.issued_at())
                .then_with(|| b.id().value().cmp(&a.id().value()))
        });
        visible.truncate(limit as usize);
        Ok(visible)
    }

    async fn find_by_id(
        &self,
        filter: &TenantFilter,
        invoice_id: InvoiceId,
    ) -> Result<Option<Invoice>, InvoicingDomainError> {
        let invoices = self.invoices.read().await;
        Ok(invoices
            .iter()
            .find(|invoice| invoice.id() == invoice_id && filter.admits(invoice.tenant_id()))
            .cloned())
    }

    async fn save(
        &self,
        target: &TenantWriteTarget,
        invoice: &Invoice,
    ) -> Result<(), InvoicingDomainError> {
        if invoice.tenant_id() != target.tenant_id() {
            return Err(InvoicingDomainError::InfrastructureError(
                "invoice tenant differs from the write target".to_string(),
            ));
        }

        self.invoices.write().await.push(invoice.clone());
        Ok(())
    }

    async fn delete(
        &self,
        filter: &TenantFilter,
        invoice_id: InvoiceId,
    ) -> Result<bool, InvoicingDomainError> {
        let mut invoices = self.invoices.write().await;
        let before = invoices.len();
        invoices.retain(|invoice| !(invoice.id() == invoice_id && filter.admits(invoice.tenant_id())));
        Ok(invoices.len() != before)
    }
}
