use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::access_control::domain::model::enums::access_control_domain_error::AccessControlDomainError;

lazy_static! {
    static ref PERMISSION_REGEX: Regex =
        Regex::new(r"^[a-z][a-z0-9-]*:[a-z][a-z0-9-]*$").expect("valid permission regex");
}

/// Atomic capability token in `resource:action` form, e.g. `invoices:read`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Permission(String);

impl Permission {
    pub fn new(value: String) -> Result<Self, AccessControlDomainError> {
        let trimmed = value.trim();
        if !PERMISSION_REGEX.is_match(trimmed) {
            return Err(AccessControlDomainError::InvalidPermission);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn resource(&self) -> &str {
        self.0.split_once(':').map_or(self.0.as_str(), |(resource, _)| resource)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
