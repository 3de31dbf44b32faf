use std::fmt;

use crate::access_control::domain::model::enums::access_control_domain_error::AccessControlDomainError;

/// Name of the requested operation as recorded in audit, e.g. `invoices.list`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct OperationName(String);

impl OperationName {
    pub fn new(value: String) -> Result<Self, AccessControlDomainError> {
        let valid = !value.is_empty()
            && value
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '.' | '-'));

        if !valid {
            return Err(AccessControlDomainError::InvalidOperationName);
        }

        Ok(Self(value))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
