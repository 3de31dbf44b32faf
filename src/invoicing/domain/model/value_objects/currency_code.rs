use lazy_static::lazy_static;
use regex::Regex;

use crate::invoicing::domain::model::enums::invoicing_domain_error::InvoicingDomainError;

lazy_static! {
    static ref CURRENCY_CODE_REGEX: Regex =
        Regex::new(r"^[A-Z]{3}$").expect("valid currency code regex");
}

/// ISO 4217 alphabetic code.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(value: String) -> Result<Self, InvoicingDomainError> {
        let normalized = value.trim().to_uppercase();
        if !CURRENCY_CODE_REGEX.is_match(&normalized) {
            return Err(InvoicingDomainError::InvalidCurrencyCode);
        }
        Ok(Self(normalized))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}
