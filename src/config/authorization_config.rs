//! Authorization settings, loaded once at start-up and never mutated.
//!
//! `AUTHZ_ROLE_PERMISSIONS` uses `role:perm|perm,role2:*`. The permission
//! atoms themselves contain a colon, so each entry is split on its first
//! colon only.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use crate::{
    access_control::domain::model::{
        entities::{
            role_permission_table::{RoleGrant, RolePermissionTable},
            tenant_role_convention::TenantRoleConvention,
        },
        enums::access_control_domain_error::AccessControlDomainError,
        value_objects::{permission::Permission, role_name::RoleName},
    },
    iam_integration::application::claims_extractor::{
        ClaimsExtractorSettings, DEFAULT_CUSTOM_ATTRIBUTE_PREFIX, DEFAULT_LEEWAY_SECONDS,
    },
};

pub const DEFAULT_ROLE_PERMISSIONS: &str = "global-admin:*,\
finance-full:invoices:read|invoices:create|invoices:delete|reports:read|profile:read,\
finance-read-only:invoices:read|reports:read|profile:read,\
basic-user:profile:read";
pub const DEFAULT_BASIC_ROLES: &str = "basic-user";
pub const DEFAULT_TENANT_ROLE_PREFIX: &str = "tenant-";
pub const DEFAULT_ALL_TENANTS_ROLE: &str = "tenant-all";

const UNIVERSAL_GRANT: &str = "*";

#[derive(Clone, Debug)]
pub struct AuthorizationConfig {
    pub role_table: Arc<RolePermissionTable>,
    pub tenant_roles: Arc<TenantRoleConvention>,
    pub claims: ClaimsExtractorSettings,
}

impl AuthorizationConfig {
    pub fn from_env() -> Result<Self, AccessControlDomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AccessControlDomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let audience = non_empty("AUTHZ_AUDIENCE").ok_or_else(|| {
            AccessControlDomainError::InvalidConfiguration("AUTHZ_AUDIENCE is required".to_string())
        })?;

        let leeway_seconds = match non_empty("AUTHZ_LEEWAY_SECONDS") {
            None => DEFAULT_LEEWAY_SECONDS,
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|seconds| *seconds >= 0)
                .ok_or_else(|| {
                    AccessControlDomainError::InvalidConfiguration(format!(
                        "AUTHZ_LEEWAY_SECONDS '{raw}' is not a non-negative integer"
                    ))
                })?,
        };

        let roles = parse_role_permissions(
            &non_empty("AUTHZ_ROLE_PERMISSIONS").unwrap_or_else(|| DEFAULT_ROLE_PERMISSIONS.to_string()),
        )?;
        let basic_roles = parse_role_list(
            &non_empty("AUTHZ_BASIC_ROLES").unwrap_or_else(|| DEFAULT_BASIC_ROLES.to_string()),
        )?;
        let role_table = RolePermissionTable::new(roles, basic_roles)?;

        let tenant_attribute = non_empty("AUTHZ_TENANT_ATTRIBUTE");
        let tenant_roles = TenantRoleConvention::new(
            non_empty("AUTHZ_TENANT_ROLE_PREFIX")
                .unwrap_or_else(|| DEFAULT_TENANT_ROLE_PREFIX.to_string()),
            non_empty("AUTHZ_ALL_TENANTS_ROLE")
                .unwrap_or_else(|| DEFAULT_ALL_TENANTS_ROLE.to_string()),
            tenant_attribute.clone(),
            &role_table,
        )?;

        let claims = ClaimsExtractorSettings {
            audience,
            issuer: non_empty("AUTHZ_ISSUER"),
            leeway_seconds,
            custom_attribute_prefix: lookup("AUTHZ_CUSTOM_ATTRIBUTE_PREFIX")
                .map(|value| value.trim().to_string())
                .unwrap_or_else(|| DEFAULT_CUSTOM_ATTRIBUTE_PREFIX.to_string()),
            tenant_attribute,
        };

        tracing::info!(
            roles = role_table.role_names().count(),
            issuer = claims.issuer.as_deref().unwrap_or("<any>"),
            audience = %claims.audience,
            "authorization configuration loaded"
        );

        Ok(Self {
            role_table: Arc::new(role_table),
            tenant_roles: Arc::new(tenant_roles),
            claims,
        })
    }
}

/// Parses `role:perm|perm,role2:*` into role grants.
pub fn parse_role_permissions(
    raw: &str,
) -> Result<BTreeMap<RoleName, RoleGrant>, AccessControlDomainError> {
    let mut roles = BTreeMap::new();

    for entry in raw.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
        let (role, grants) = entry.split_once(':').ok_or_else(|| {
            AccessControlDomainError::InvalidConfiguration(format!(
                "role entry '{entry}' has no permission list"
            ))
        })?;

        let role = RoleName::new(role.trim().to_string()).map_err(|_| {
            AccessControlDomainError::InvalidConfiguration(format!("invalid role name in '{entry}'"))
        })?;

        let grant = parse_grant(grants).map_err(|detail| {
            AccessControlDomainError::InvalidConfiguration(format!("role '{role}': {detail}"))
        })?;

        if roles.insert(role.clone(), grant).is_some() {
            return Err(AccessControlDomainError::InvalidConfiguration(format!(
                "role '{role}' is defined more than once"
            )));
        }
    }

    Ok(roles)
}

fn parse_grant(raw: &str) -> Result<RoleGrant, String> {
    let raw = raw.trim();
    if raw == UNIVERSAL_GRANT {
        return Ok(RoleGrant::Universal);
    }

    let atoms = raw
        .split('|')
        .map(str::trim)
        .filter(|atom| !atom.is_empty())
        .map(|atom| {
            Permission::new(atom.to_string()).map_err(|_| format!("malformed permission '{atom}'"))
        })
        .collect::<Result<BTreeSet<_>, _>>()?;

    if atoms.is_empty() {
        return Err("grants no permissions".to_string());
    }

    Ok(RoleGrant::Atoms(atoms))
}

fn parse_role_list(raw: &str) -> Result<BTreeSet<RoleName>, AccessControlDomainError> {
    raw.split(',')
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .map(|role| {
            RoleName::new(role.to_string()).map_err(|_| {
                AccessControlDomainError::InvalidConfiguration(format!("invalid basic role '{role}'"))
            })
        })
        .collect()
}
