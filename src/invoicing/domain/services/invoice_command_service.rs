use async_trait::async_trait;

use crate::{
    access_control::application::enforcement::query_scope_enforcer::QueryScopeEnforcer,
    invoicing::domain::model::{
        commands::{
            create_invoice_command::CreateInvoiceCommand,
            delete_invoice_command::DeleteInvoiceCommand,
        },
        entities::invoice::Invoice,
        enums::invoicing_domain_error::InvoicingDomainError,
    },
};

#[async_trait]
pub trait InvoiceCommandService: Send + Sync {
    async fn handle_create(
        &self,
        enforcer: &QueryScopeEnforcer,
        command: CreateInvoiceCommand,
    ) -> Result<Invoice, InvoicingDomainError>;

    async fn handle_delete(
        &self,
        enforcer: &QueryScopeEnforcer,
        command: DeleteInvoiceCommand,
    ) -> Result<(), InvoicingDomainError>;
}
