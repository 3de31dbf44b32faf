use std::{
    collections::{BTreeSet, HashSet},
    sync::Arc,
};

use crate::access_control::domain::model::{
    entities::{
        role_permission_table::{RoleGrant, RolePermissionTable},
        tenant_role_convention::TenantRoleConvention,
    },
    enums::principal_tier::PrincipalTier,
    value_objects::permission_set::PermissionSet,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedPermissions {
    pub permissions: PermissionSet,
    pub tier: PrincipalTier,
}

/// Maps group memberships to permissions through the immutable role table.
pub struct PermissionResolver {
    role_table: Arc<RolePermissionTable>,
    tenant_roles: Arc<TenantRoleConvention>,
}

impl PermissionResolver {
    pub fn new(
        role_table: Arc<RolePermissionTable>,
        tenant_roles: Arc<TenantRoleConvention>,
    ) -> Self {
        Self {
            role_table,
            tenant_roles,
        }
    }

    pub fn resolve<'a, I>(&self, groups: I) -> ResolvedPermissions
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut atoms = BTreeSet::new();
        let mut matched_roles = 0usize;
        let mut elevated = false;
        let mut unknown = Vec::new();
        let mut seen = HashSet::new();

        for group in groups {
            if !seen.insert(group.as_str()) {
                continue;
            }

            match self.role_table.grant_for(group) {
                Some(RoleGrant::Universal) => {
                    return ResolvedPermissions {
                        permissions: PermissionSet::All,
                        tier: PrincipalTier::FullAccess,
                    };
                }
                Some(RoleGrant::Atoms(granted)) => {
                    matched_roles += 1;
                    if !self.role_table.is_basic_role(group) {
                        elevated = true;
                    }
                    atoms.extend(granted.iter().cloned());
                }
                None if self.tenant_roles.is_tenant_role(group) => {}
                None => unknown.push(group.as_str()),
            }
        }

        if !unknown.is_empty() {
            unknown.sort_unstable();
            if matched_roles == 0 {
                tracing::warn!(
                    unknown_groups = ?unknown,
                    "no permission role matched; unrecognised group names were ignored"
                );
            } else {
                tracing::debug!(unknown_groups = ?unknown, "ignored unrecognised group names");
            }
        }

        let tier = match (matched_roles, elevated) {
            (0, _) => PrincipalTier::Unprivileged,
            (_, true) => PrincipalTier::Elevated,
            (_, false) => PrincipalTier::BasicOnly,
        };

        ResolvedPermissions {
            permissions: PermissionSet::Atoms(atoms),
            tier,
        }
    }
}
