use crate::access_control::domain::model::value_objects::principal_id::PrincipalId;

/// Subject the identity provider vouched for after checking the signature.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct VerifiedSubject(String);

impl VerifiedSubject {
    pub fn new(value: &str) -> Result<Self, String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err("subject_id must not be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, principal_id: &PrincipalId) -> bool {
        self.0 == principal_id.value()
    }
}
