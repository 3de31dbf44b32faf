use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateInvoiceRequestResource {
    #[validate(length(min = 1, max = 200))]
    pub customer_name: String,
    #[validate(range(min = 1))]
    pub amount_cents: i64,
    #[validate(length(equal = 3))]
    pub currency: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema, IntoParams)]
pub struct ListInvoicesQueryResource {
    pub tenant_id: Option<String>,
    #[validate(range(min = 1, max = 500))]
    pub limit: Option<u32>,
}
