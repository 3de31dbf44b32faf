use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::access_control::domain::model::value_objects::principal_id::PrincipalId;

/// The authenticated caller of one request. Built from verified claims and
/// dropped with the request.
#[derive(Clone, Debug, PartialEq)]
pub struct Principal {
    id: PrincipalId,
    display_name: String,
    groups: BTreeSet<String>,
    attributes: BTreeMap<String, Value>,
    expires_at: DateTime<Utc>,
}

pub struct PrincipalParts {
    pub id: PrincipalId,
    pub display_name: String,
    pub groups: BTreeSet<String>,
    pub attributes: BTreeMap<String, Value>,
    pub expires_at: DateTime<Utc>,
}

impl Principal {
    pub fn new(parts: PrincipalParts) -> Self {
        let groups = parts
            .groups
            .into_iter()
            .map(|group| group.trim().to_string())
            .filter(|group| !group.is_empty())
            .collect();

        Self {
            id: parts.id,
            display_name: parts.display_name,
            groups,
            attributes: parts.attributes,
            expires_at: parts.expires_at,
        }
    }

    pub fn id(&self) -> &PrincipalId {
        &self.id
    }
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
    pub fn groups(&self) -> &BTreeSet<String> {
        &self.groups
    }
    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}
