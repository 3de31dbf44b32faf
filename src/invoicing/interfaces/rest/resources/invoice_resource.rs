use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    access_control::application::enforcement::query_scope_enforcer::TenantOwned,
    invoicing::domain::model::entities::invoice::Invoice,
};

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct InvoiceResource {
    pub id: String,
    pub tenant_id: String,
    pub customer_name: String,
    pub amount_cents: i64,
    pub currency: String,
    pub issued_by: String,
    pub issued_at: DateTime<Utc>,
}

impl From<&Invoice> for InvoiceResource {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id().to_string(),
            tenant_id: invoice.tenant_id().value().to_string(),
            customer_name: invoice.customer_name().value().to_string(),
            amount_cents: invoice.amount_cents(),
            currency: invoice.currency().value().to_string(),
            issued_by: invoice.issued_by().to_string(),
            issued_at: invoice.issued_at(),
        }
    }
}
