use std::sync::Mutex;

use async_trait::async_trait;
use tenant_authz_engine::{
    access_control::{
        application::enforcement::query_scope_enforcer::{TenantFilter, TenantWriteTarget},
        domain::{
            model::events::authorization_decision_audited_event::AuthorizationDecisionAuditedEvent,
            services::authorization_audit_recorder::AuthorizationAuditRecorder,
        },
    },
    iam_integration::{
        application::claims_extractor::unverified_claims,
        domain::model::value_objects::verified_subject::VerifiedSubject,
        interfaces::acl::iam_authentication_facade::{
            IamAuthenticationFacade, IamIntegrationError, VerifiedUserContext,
        },
    },
    invoicing::{
        domain::model::{
            entities::invoice::Invoice, enums::invoicing_domain_error::InvoicingDomainError,
            value_objects::invoice_id::InvoiceId,
        },
        infrastructure::persistence::repositories::invoice_repository::InvoiceRepository,
    },
};

/// Vouches for whatever subject the token names.
#[derive(Default)]
pub struct EchoIamAuthenticationFacade;

#[async_trait]
impl IamAuthenticationFacade for EchoIamAuthenticationFacade {
    async fn verify_access_token(
        &self,
        access_token: &str,
    ) -> Result<VerifiedUserContext, IamIntegrationError> {
        let subject = unverified_claims(access_token)
            .ok()
            .and_then(|claims| claims.get("sub").and_then(|v| v.as_str()).map(str::to_string))
            .ok_or_else(|| IamIntegrationError::InvalidToken("no subject".to_string()))?;

        Ok(VerifiedUserContext {
            subject_id: VerifiedSubject::new(&subject).map_err(IamIntegrationError::InvalidToken)?,
            jti: None,
            exp_epoch_seconds: 0,
        })
    }
}

/// Ignores the tenant filter entirely.
pub struct LeakyInvoiceRepository {
    invoices: Mutex<Vec<Invoice>>,
}

impl LeakyInvoiceRepository {
    pub fn with_invoices(invoices: Vec<Invoice>) -> Self {
        Self {
            invoices: Mutex::new(invoices),
        }
    }
}

#[async_trait]
impl InvoiceRepository for LeakyInvoiceRepository {
    async fn find_all(
        &self,
        _filter: &TenantFilter,
        _limit: u32,
    ) -> Result<Vec<Invoice>, InvoicingDomainError> {
        Ok(self.invoices.lock().expect("mutex poisoned").clone())
    }

    async fn find_by_id(
        &self,
        _filter: &TenantFilter,
        invoice_id: InvoiceId,
    ) -> Result<Option<Invoice>, InvoicingDomainError> {
        Ok(self
            .invoices
            .lock()
            .expect("mutex poisoned")
            .iter()
            .find(|invoice| invoice.id() == invoice_id)
            .cloned())
    }

    async fn save(
        &self,
        _target: &TenantWriteTarget,
        invoice: &Invoice,
    ) -> Result<(), InvoicingDomainError> {
        self.invoices.lock().expect("mutex poisoned").push(invoice.clone());
        Ok(())
    }

    async fn delete(
        &self,
        _filter: &TenantFilter,
        _invoice_id: InvoiceId,
    ) -> Result<bool, InvoicingDomainError> {
        Ok(false)
    }
}

pub struct NullAuditRecorder;

impl AuthorizationAuditRecorder for NullAuditRecorder {
    fn record(&self, _event: AuthorizationDecisionAuditedEvent) {}
}
