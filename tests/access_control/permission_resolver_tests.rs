use std::collections::BTreeSet;

use proptest::prelude::*;
use tenant_authz_engine::access_control::domain::model::{
    enums::principal_tier::PrincipalTier,
    value_objects::{permission::Permission, permission_set::PermissionSet},
};

use crate::support::permission_resolver;

fn groups(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn atoms(names: &[&str]) -> PermissionSet {
    PermissionSet::Atoms(
        names
            .iter()
            .map(|name| Permission::new(name.to_string()).expect("valid permission"))
            .collect::<BTreeSet<_>>(),
    )
}

#[test]
fn read_only_role_grants_its_atoms() {
    let resolved = permission_resolver().resolve(groups(&["finance-read-only"]).iter());

    assert_eq!(
        resolved.permissions,
        atoms(&["invoices:read", "profile:read", "reports:read"])
    );
    assert_eq!(resolved.tier, PrincipalTier::Elevated);
}

#[test]
fn permissions_are_the_union_of_matched_roles() {
    let resolved =
        permission_resolver().resolve(groups(&["finance-read-only", "finance-full"]).iter());

    assert_eq!(
        resolved.permissions,
        atoms(&[
            "invoices:create",
            "invoices:delete",
            "invoices:read",
            "profile:read",
            "reports:read",
        ])
    );
}

#[test]
fn basic_role_alone_is_basic_tier() {
    let resolved = permission_resolver().resolve(groups(&["basic-user", "tenant-acme"]).iter());

    assert_eq!(resolved.permissions, atoms(&["profile:read"]));
    assert_eq!(resolved.tier, PrincipalTier::BasicOnly);
}

#[test]
fn universal_role_wins_over_everything_else() {
    let resolved =
        permission_resolver().resolve(groups(&["basic-user", "global-admin", "typo-role"]).iter());

    assert_eq!(resolved.permissions, PermissionSet::All);
    assert_eq!(resolved.tier, PrincipalTier::FullAccess);
}

#[test]
fn unknown_groups_grant_nothing() {
    let resolved = permission_resolver().resolve(groups(&["finance-reed-only", "tenant-acme"]).iter());

    assert!(resolved.permissions.is_empty());
    assert_eq!(resolved.tier, PrincipalTier::Unprivileged);
}

#[test]
fn empty_membership_is_unprivileged() {
    let resolved = permission_resolver().resolve(Vec::<String>::new().iter());

    assert_eq!(resolved.permissions, PermissionSet::empty());
    assert_eq!(resolved.tier, PrincipalTier::Unprivileged);
}

const KNOWN_GROUPS: [&str; 8] = [
    "basic-user",
    "finance-read-only",
    "finance-full",
    "global-admin",
    "tenant-acme",
    "tenant-all",
    "unknown-role",
    "finance-read-only",
];

proptest! {
    #[test]
    fn resolution_ignores_group_order_and_duplicates(
        picked in prop::sample::subsequence(KNOWN_GROUPS.to_vec(), 0..=KNOWN_GROUPS.len())
            .prop_shuffle()
    ) {
        let resolver = permission_resolver();
        let shuffled = groups(&picked);
        let mut canonical = shuffled.clone();
        canonical.sort();
        canonical.dedup();

        prop_assert_eq!(resolver.resolve(shuffled.iter()), resolver.resolve(canonical.iter()));
    }
}
