use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    access_control::application::enforcement::query_scope_enforcer::QueryScopeEnforcer,
    invoicing::{
        domain::{
            model::{
                commands::{
                    create_invoice_command::CreateInvoiceCommand,
                    delete_invoice_command::DeleteInvoiceCommand,
                },
                entities::invoice::{Invoice, InvoiceParts},
                enums::invoicing_domain_error::InvoicingDomainError,
                value_objects::invoice_id::InvoiceId,
            },
            services::invoice_command_service::InvoiceCommandService,
        },
        infrastructure::persistence::repositories::invoice_repository::InvoiceRepository,
    },
};

pub struct InvoiceCommandServiceImpl {
    repository: Arc<dyn InvoiceRepository>,
}

impl InvoiceCommandServiceImpl {
    pub fn new(repository: Arc<dyn InvoiceRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl InvoiceCommandService for InvoiceCommandServiceImpl {
    async fn handle_create(
        &self,
        enforcer: &QueryScopeEnforcer,
        command: CreateInvoiceCommand,
    ) -> Result<Invoice, InvoicingDomainError> {
        let target = enforcer.scope_write()?;

        let invoice = Invoice::new(InvoiceParts {
            id: InvoiceId::generate(),
            tenant_id: target.tenant_id().clone(),
            customer_name: command.customer_name().clone(),
            amount_cents: command.amount_cents(),
            currency: command.currency().clone(),
            issued_by: enforcer.principal_id().value().to_string(),
            issued_at: Utc::now(),
        });

        self.repository.save(&target, &invoice).await?;

        tracing::info!(
            invoice_id = %invoice.id(),
            tenant_id = %target.tenant_id(),
            principal_id = %enforcer.principal_id(),
            "invoice created"
        );

        Ok(invoice)
    }

    async fn handle_delete(
        &self,
        enforcer: &QueryScopeEnforcer,
        command: DeleteInvoiceCommand,
    ) -> Result<(), InvoicingDomainError> {
        let filter = enforcer.scope_read()?;

        if !self.repository.delete(&filter, command.invoice_id()).await? {
            return Err(InvoicingDomainError::InvoiceNotFound);
        }

        tracing::info!(
            invoice_id = %command.invoice_id(),
            principal_id = %enforcer.principal_id(),
            "invoice deleted"
        );

        Ok(())
    }
}
