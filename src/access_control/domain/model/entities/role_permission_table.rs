use std::collections::{BTreeMap, BTreeSet};

use crate::access_control::domain::model::{
    enums::access_control_domain_error::AccessControlDomainError,
    value_objects::{permission::Permission, role_name::RoleName},
};

/// What a single permission role grants.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RoleGrant {
    Universal,
    Atoms(BTreeSet<Permission>),
}

/// Immutable role to permission mapping, built once at start-up and shared
/// read-only between requests.
#[derive(Clone, Debug)]
pub struct RolePermissionTable {
    roles: BTreeMap<RoleName, RoleGrant>,
    basic_roles: BTreeSet<RoleName>,
}

impl RolePermissionTable {
    pub fn new(
        roles: BTreeMap<RoleName, RoleGrant>,
        basic_roles: BTreeSet<RoleName>,
    ) -> Result<Self, AccessControlDomainError> {
        if roles.is_empty() {
            return Err(AccessControlDomainError::InvalidConfiguration(
                "role permission table is empty".to_string(),
            ));
        }

        for (role, grant) in &roles {
            if matches!(grant, RoleGrant::Atoms(atoms) if atoms.is_empty()) {
                return Err(AccessControlDomainError::InvalidConfiguration(format!(
                    "role '{role}' grants no permissions"
                )));
            }
        }

        for role in &basic_roles {
            match roles.get(role) {
                None => {
                    return Err(AccessControlDomainError::InvalidConfiguration(format!(
                        "basic role '{role}' is not in the role permission table"
                    )));
                }
                Some(RoleGrant::Universal) => {
                    return Err(AccessControlDomainError::InvalidConfiguration(format!(
                        "basic role '{role}' cannot be universal"
                    )));
                }
                Some(RoleGrant::Atoms(_)) => {}
            }
        }

        Ok(Self { roles, basic_roles })
    }

    pub fn grant_for(&self, role: &str) -> Option<&RoleGrant> {
        let role = RoleName::new(role.to_string()).ok()?;
        self.roles.get(&role)
    }

    pub fn is_known_role(&self, role: &str) -> bool {
        self.grant_for(role).is_some()
    }

    pub fn is_basic_role(&self, role: &str) -> bool {
        RoleName::new(role.to_string())
            .map(|role| self.basic_roles.contains(&role))
            .unwrap_or(false)
    }

    pub fn role_names(&self) -> impl Iterator<Item = &RoleName> {
        self.roles.keys()
    }
}
