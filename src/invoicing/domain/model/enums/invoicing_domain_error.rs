use thiserror::Error;

use crate::access_control::domain::model::enums::access_control_domain_error::AccessControlDomainError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvoicingDomainError {
    #[error("invoice id is invalid")]
    InvalidInvoiceId,

    #[error("customer name is invalid")]
    InvalidCustomerName,

    #[error("currency code is invalid")]
    InvalidCurrencyCode,

    #[error("amount must be positive")]
    InvalidAmount,

    #[error("invoice not found")]
    InvoiceNotFound,

    #[error(transparent)]
    AccessControl(#[from] AccessControlDomainError),

    #[error("infrastructure error: {0}")]
    InfrastructureError(String),
}
