use std::collections::BTreeSet;

use super::permission::Permission;

/// Permissions granted to a caller. `All` comes only from a universal role.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PermissionSet {
    All,
    Atoms(BTreeSet<Permission>),
}

impl PermissionSet {
    pub fn empty() -> Self {
        Self::Atoms(BTreeSet::new())
    }

    pub fn is_universal(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn contains(&self, permission: &Permission) -> bool {
        match self {
            Self::All => true,
            Self::Atoms(atoms) => atoms.contains(permission),
        }
    }

    pub fn covers<'a, I>(&self, requested: I) -> bool
    where
        I: IntoIterator<Item = &'a Permission>,
    {
        requested.into_iter().all(|permission| self.contains(permission))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::All => false,
            Self::Atoms(atoms) => atoms.is_empty(),
        }
    }

    /// Rendering used in logs and profile responses: `*` or sorted atoms.
    pub fn to_strings(&self) -> Vec<String> {
        match self {
            Self::All => vec!["*".to_string()],
            Self::Atoms(atoms) => atoms.iter().map(|p| p.value().to_string()).collect(),
        }
    }
}
