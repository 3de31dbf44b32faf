use crate::invoicing::domain::model::{
    enums::invoicing_domain_error::InvoicingDomainError,
    value_objects::{currency_code::CurrencyCode, customer_name::CustomerName},
};

#[derive(Clone, Debug)]
pub struct CreateInvoiceCommand {
    customer_name: CustomerName,
    amount_cents: i64,
    currency: CurrencyCode,
}

impl CreateInvoiceCommand {
    pub fn new(
        customer_name: String,
        amount_cents: i64,
        currency: String,
    ) -> Result<Self, InvoicingDomainError> {
        if amount_cents <= 0 {
            return Err(InvoicingDomainError::InvalidAmount);
        }

        Ok(Self {
            customer_name: CustomerName::new(customer_name)?,
            amount_cents,
            currency: CurrencyCode::new(currency)?,
        })
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
}
