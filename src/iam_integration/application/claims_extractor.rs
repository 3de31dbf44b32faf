//! Turns an `Authorization` header into a [`Principal`].
//!
//! Extraction is pure: it never performs I/O and never checks signatures.
//! Signature verification belongs to the
//! [`IamAuthenticationFacade`](crate::iam_integration::interfaces::acl::iam_authentication_facade::IamAuthenticationFacade).

use std::collections::{BTreeMap, BTreeSet};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::access_control::domain::model::{
    entities::principal::{Principal, PrincipalParts},
    enums::access_control_domain_error::AccessControlDomainError,
    value_objects::principal_id::PrincipalId,
};

pub const DEFAULT_LEEWAY_SECONDS: i64 = 60;
pub const DEFAULT_CUSTOM_ATTRIBUTE_PREFIX: &str = "extension_";

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimsExtractorSettings {
    pub audience: String,
    pub issuer: Option<String>,
    pub leeway_seconds: i64,
    pub custom_attribute_prefix: String,
    pub tenant_attribute: Option<String>,
}

impl ClaimsExtractorSettings {
    pub fn new(audience: String) -> Self {
        Self {
            audience,
            issuer: None,
            leeway_seconds: DEFAULT_LEEWAY_SECONDS,
            custom_attribute_prefix: DEFAULT_CUSTOM_ATTRIBUTE_PREFIX.to_string(),
            tenant_attribute: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Audience {
    One(String),
    Many(Vec<String>),
}

impl Audience {
    fn contains(&self, expected: &str) -> bool {
        match self {
            Self::One(value) => value == expected,
            Self::Many(values) => values.iter().any(|value| value == expected),
        }
    }
}

#[derive(Deserialize)]
struct TokenClaims {
    sub: String,
    groups: Vec<String>,
    exp: i64,
    aud: Audience,
    #[serde(default)]
    nbf: Option<i64>,
    #[serde(default)]
    iss: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    preferred_username: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

#[derive(Clone, Debug)]
pub struct ClaimsExtractor {
    settings: ClaimsExtractorSettings,
}

impl ClaimsExtractor {
    pub fn new(settings: ClaimsExtractorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ClaimsExtractorSettings {
        &self.settings
    }

    /// The raw token from an `Authorization` header value.
    pub fn bearer_token(authorization: Option<&str>) -> Result<&str, AccessControlDomainError> {
        let header = authorization
            .ok_or(AccessControlDomainError::MalformedCredential("missing authorization header"))?;

        let token = header
            .strip_prefix(BEARER_PREFIX)
            .ok_or(AccessControlDomainError::MalformedCredential("missing bearer prefix"))?
            .trim();

        if token.is_empty() {
            return Err(AccessControlDomainError::MalformedCredential("empty bearer token"));
        }

        Ok(token)
    }

    pub fn extract(
        &self,
        authorization: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Principal, AccessControlDomainError> {
        let token = Self::bearer_token(authorization)?;
        self.extract_token(token, now)
    }

    pub fn extract_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Principal, AccessControlDomainError> {
        let payload = unverified_claims(token)?;

        let claims: TokenClaims = serde_json::from_value(Value::Object(payload))
            .map_err(|_| AccessControlDomainError::MalformedCredential("missing required claims"))?;

        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
            .ok_or(AccessControlDomainError::MalformedCredential("exp out of range"))?;

        let leeway = self.settings.leeway_seconds;
        let now_seconds = now.timestamp();

        if claims.exp.saturating_add(leeway) < now_seconds {
            return Err(AccessControlDomainError::ExpiredCredential);
        }

        if let Some(nbf) = claims.nbf {
            if nbf > now_seconds.saturating_add(leeway) {
                return Err(AccessControlDomainError::UntrustedCredential(
                    "token is not valid yet".to_string(),
                ));
            }
        }

        if !claims.aud.contains(&self.settings.audience) {
            return Err(AccessControlDomainError::UntrustedCredential(
                "audience mismatch".to_string(),
            ));
        }

        if let Some(expected) = &self.settings.issuer {
            if claims.iss.as_deref() != Some(expected.as_str()) {
                return Err(AccessControlDomainError::UntrustedCredential(
                    "issuer mismatch".to_string(),
                ));
            }
        }

        let id = PrincipalId::new(claims.sub)
            .map_err(|_| AccessControlDomainError::MalformedCredential("empty subject"))?;

        let display_name = claims
            .name
            .or(claims.preferred_username)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| id.value().to_string());

        let attributes = claims
            .extra
            .into_iter()
            .filter(|(key, _)| self.is_custom_attribute(key))
            .collect();

        Ok(Principal::new(PrincipalParts {
            id,
            display_name,
            groups: claims.groups.into_iter().collect::<BTreeSet<_>>(),
            attributes,
            expires_at,
        }))
    }

    fn is_custom_attribute(&self, key: &str) -> bool {
        let prefix = &self.settings.custom_attribute_prefix;
        (!prefix.is_empty() && key.starts_with(prefix.as_str()))
            || self.settings.tenant_attribute.as_deref() == Some(key)
    }
}

/// Checks the token shape and returns its payload object. Nothing in the
/// payload is validated beyond being a JSON object.
pub fn unverified_claims(token: &str) -> Result<Map<String, Value>, AccessControlDomainError> {
    let sections: Vec<&str> = token.split('.').collect();
    if sections.len() != 3 || sections.iter().any(|section| section.is_empty()) {
        return Err(AccessControlDomainError::MalformedCredential(
            "token must have three non-empty sections",
        ));
    }

    decode_object(sections[0])
        .ok_or(AccessControlDomainError::MalformedCredential("header is not a JSON object"))?;

    decode_object(sections[1])
        .ok_or(AccessControlDomainError::MalformedCredential("payload is not a JSON object"))
}

fn decode_object(section: &str) -> Option<Map<String, Value>> {
    let bytes = URL_SAFE_NO_PAD.decode(section.trim_end_matches('=')).ok()?;
    serde_json::from_slice::<Map<String, Value>>(&bytes).ok()
}

/// Short stable digest used to correlate a token across log lines without
/// writing the token itself.
pub fn token_fingerprint(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..16].to_string()
}
