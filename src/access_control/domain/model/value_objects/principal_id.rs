use std::fmt;

use crate::access_control::domain::model::enums::access_control_domain_error::AccessControlDomainError;

const ANONYMOUS_PRINCIPAL: &str = "anonymous";

#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct PrincipalId(String);

impl PrincipalId {
    pub fn new(value: String) -> Result<Self, AccessControlDomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AccessControlDomainError::InvalidPrincipalId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Stands in for callers whose credential never produced a principal.
    pub fn anonymous() -> Self {
        Self(ANONYMOUS_PRINCIPAL.to_string())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
