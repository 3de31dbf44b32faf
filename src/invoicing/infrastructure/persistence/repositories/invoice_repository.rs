use async_trait::async_trait;

use crate::{
    access_control::application::enforcement::query_scope_enforcer::{
        TenantFilter, TenantWriteTarget,
    },
    invoicing::domain::model::{
        entities::invoice::Invoice, enums::invoicing_domain_error::InvoicingDomainError,
        value_objects::invoice_id::InvoiceId,
    },
};

/// Tenant-partitioned invoice store. Every method takes a filter or write
/// target issued by the `QueryScopeEnforcer` and must not return or touch
/// rows the filter does not admit.
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    async fn find_all(
        &self,
        filter: &TenantFilter,
        limit: u32,
    ) -> Result<Vec<Invoice>, InvoicingDomainError>;

    async fn find_by_id(
        &self,
        filter: &TenantFilter,
        invoice_id: InvoiceId,
    ) -> Result<Option<Invoice>, InvoicingDomainError>;

    async fn save(
        &self,
        target: &TenantWriteTarget,
        invoice: &Invoice,
    ) -> Result<(), InvoicingDomainError>;

    /// `false` when no admitted row had that id.
    async fn delete(
        &self,
        filter: &TenantFilter,
        invoice_id: InvoiceId,
    ) -> Result<bool, InvoicingDomainError>;
}
