use crate::invoicing::domain::model::enums::invoicing_domain_error::InvoicingDomainError;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CustomerName(String);

impl CustomerName {
    pub fn new(value: String) -> Result<Self, InvoicingDomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.chars().count() > 200 {
            return Err(InvoicingDomainError::InvalidCustomerName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}
