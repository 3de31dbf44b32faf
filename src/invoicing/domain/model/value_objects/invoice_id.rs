use std::fmt;

use uuid::Uuid;

use crate::invoicing::domain::model::enums::invoicing_domain_error::InvoicingDomainError;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct InvoiceId(Uuid);

impl InvoiceId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    pub fn parse(value: &str) -> Result<Self, InvoicingDomainError> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| InvoicingDomainError::InvalidInvoiceId)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
