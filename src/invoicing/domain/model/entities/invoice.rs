use chrono::{DateTime, Utc};

use crate::{
    access_control::{
        application::enforcement::query_scope_enforcer::TenantOwned,
        domain::model::value_objects::tenant_id::TenantId,
    },
    invoicing::domain::model::value_objects::{
        currency_code::CurrencyCode, customer_name::CustomerName, invoice_id::InvoiceId,
    },
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invoice {
    id: InvoiceId,
    tenant_id: TenantId,
    customer_name: CustomerName,
    amount_cents: i64,
    currency: CurrencyCode,
    issued_by: String,
    issued_at: DateTime<Utc>,
}

pub struct InvoiceParts {
    pub id: InvoiceId,
    pub tenant_id: TenantId,
    pub customer_name: CustomerName,
    pub amount_cents: i64,
    pub currency: CurrencyCode,
    pub issued_by: String,
    pub issued_at: DateTime<Utc>,
}

impl Invoice {
    pub fn new(parts: InvoiceParts) -> Self {
        Self {
            id: parts.id,
            tenant_id: parts.tenant_id,
            customer_name: parts.customer_name,
            amount_cents: parts.amount_cents,
            currency: parts.currency,
            issued_by: parts.issued_by,
            issued_at: parts.issued_at,
        }
    }

    pub fn id(&self) -> InvoiceId {
        self.id
    }
    pub fn customer_name(&self) -> &CustomerName {
        &self.customer_name
    }
    pub fn amount_cents(&self) -> i64 {
        self.amount_cents
    }
    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }
    pub fn issued_by(&self) -> &str {
        &self.issued_by
    }
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }
}

impl TenantOwned for Invoice {
    fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }
}
