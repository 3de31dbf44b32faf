use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::access_control::domain::model::enums::access_control_domain_error::AccessControlDomainError;

use super::tenant_scope::SCOPE_KEYWORDS;

lazy_static! {
    static ref TENANT_ID_REGEX: Regex =
        Regex::new(r"^[a-z0-9][a-z0-9_-]{0,62}$").expect("valid tenant id regex");
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TenantId(String);

impl TenantId {
    pub fn new(value: String) -> Result<Self, AccessControlDomainError> {
        let normalized = value.trim().to_lowercase();
        if !TENANT_ID_REGEX.is_match(&normalized) || SCOPE_KEYWORDS.contains(&normalized.as_str()) {
            return Err(AccessControlDomainError::InvalidTenantId);
        }
        Ok(Self(normalized))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
