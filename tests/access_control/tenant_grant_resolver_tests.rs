use std::collections::BTreeSet;

use serde_json::json;
use tenant_authz_engine::access_control::domain::model::{
    enums::{access_control_domain_error::AccessControlDomainError, principal_tier::PrincipalTier},
    value_objects::{
        tenant_id::TenantId, tenant_scope::TenantScope, tenant_selection::TenantSelection,
    },
};

use crate::support::{TENANT_ATTRIBUTE, principal, principal_with_attribute, tenant_grant_resolver};

fn tenant(value: &str) -> TenantId {
    TenantId::new(value.to_string()).expect("valid tenant id")
}

fn tenants(values: &[&str]) -> TenantScope {
    TenantScope::Tenants(values.iter().map(|v| tenant(v)).collect::<BTreeSet<_>>())
}

fn selection(value: &str) -> Option<TenantSelection> {
    TenantSelection::from_header(Some(value))
}

#[test]
fn full_access_ignores_any_selection() {
    let resolver = tenant_grant_resolver();
    let admin = principal(&["global-admin"]);

    for raw in [None, selection("acme"), selection("not a tenant!")] {
        assert_eq!(
            resolver.resolve(&admin, PrincipalTier::FullAccess, raw.as_ref()),
            Ok(TenantScope::AllTenants)
        );
    }
}

#[test]
fn named_tenant_roles_become_the_scope() {
    let caller = principal(&["finance-read-only", "tenant-acme", "tenant-globex"]);

    let scope = tenant_grant_resolver().resolve(&caller, PrincipalTier::Elevated, None);

    assert_eq!(scope, Ok(tenants(&["acme", "globex"])));
}

#[test]
fn selection_narrows_to_one_granted_tenant() {
    let caller = principal(&["finance-read-only", "tenant-acme", "tenant-globex"]);
    let selected = selection("ACME");

    let scope = tenant_grant_resolver().resolve(&caller, PrincipalTier::Elevated, selected.as_ref());

    assert_eq!(scope, Ok(TenantScope::single(tenant("acme"))));
}

#[test]
fn selection_outside_grants_is_refused() {
    let resolver = tenant_grant_resolver();
    let caller = principal(&["finance-read-only", "tenant-acme"]);

    for raw in ["globex", "not a tenant!"] {
        let selected = selection(raw);
        assert_eq!(
            resolver.resolve(&caller, PrincipalTier::Elevated, selected.as_ref()),
            Err(AccessControlDomainError::TenantSelectionOutOfScope),
            "selection {raw}"
        );
    }
}

#[test]
fn all_tenants_role_admits_any_selection() {
    let resolver = tenant_grant_resolver();
    let caller = principal(&["finance-read-only", "tenant-all"]);

    assert_eq!(
        resolver.resolve(&caller, PrincipalTier::Elevated, None),
        Ok(TenantScope::AllTenants)
    );

    let selected = selection("initech");
    assert_eq!(
        resolver.resolve(&caller, PrincipalTier::Elevated, selected.as_ref()),
        Ok(TenantScope::single(tenant("initech")))
    );
}

#[test]
fn tenant_attribute_grants_listed_tenants() {
    let resolver = tenant_grant_resolver();

    let from_array =
        principal_with_attribute(&["finance-read-only"], TENANT_ATTRIBUTE, json!(["acme", "globex"]));
    assert_eq!(
        resolver.resolve(&from_array, PrincipalTier::Elevated, None),
        Ok(tenants(&["acme", "globex"]))
    );

    let from_string = principal_with_attribute(
        &["finance-read-only", "tenant-initech"],
        TENANT_ATTRIBUTE,
        json!("acme, ,not valid!"),
    );
    assert_eq!(
        resolver.resolve(&from_string, PrincipalTier::Elevated, None),
        Ok(tenants(&["acme", "initech"]))
    );
}

#[test]
fn basic_tier_without_grants_is_self_scoped() {
    let resolver = tenant_grant_resolver();
    let caller = principal(&["basic-user"]);

    assert_eq!(
        resolver.resolve(&caller, PrincipalTier::BasicOnly, None),
        Ok(TenantScope::SelfScopeOnly)
    );

    let selected = selection("acme");
    assert_eq!(
        resolver.resolve(&caller, PrincipalTier::BasicOnly, selected.as_ref()),
        Err(AccessControlDomainError::TenantSelectionOutOfScope)
    );
}

#[test]
fn elevated_or_unprivileged_without_grants_has_no_tenant_access() {
    let resolver = tenant_grant_resolver();

    assert_eq!(
        resolver.resolve(&principal(&["finance-read-only"]), PrincipalTier::Elevated, None),
        Err(AccessControlDomainError::NoTenantAccess)
    );
    assert_eq!(
        resolver.resolve(&principal(&["tenant-!!"]), PrincipalTier::Unprivileged, None),
        Err(AccessControlDomainError::NoTenantAccess)
    );
}

#[test]
fn unprivileged_caller_keeps_tenant_grants() {
    let caller = principal(&["tenant-acme"]);

    assert_eq!(
        tenant_grant_resolver().resolve(&caller, PrincipalTier::Unprivileged, None),
        Ok(tenants(&["acme"]))
    );
}

#[test]
fn scope_keywords_are_never_tenant_grants() {
    let resolver = tenant_grant_resolver();
    let caller = principal(&["finance-read-only", "tenant-selfonly", "tenant-none"]);

    assert_eq!(
        resolver.resolve(&caller, PrincipalTier::Elevated, None),
        Err(AccessControlDomainError::NoTenantAccess)
    );

    let from_attribute =
        principal_with_attribute(&["finance-read-only"], TENANT_ATTRIBUTE, json!(["all", "acme"]));
    assert_eq!(
        resolver.resolve(&from_attribute, PrincipalTier::Elevated, None),
        Ok(TenantScope::single(tenant("acme")))
    );
}

#[test]
fn scope_keywords_are_rejected_as_tenant_ids() {
    for keyword in ["all", "selfonly", "none", " ALL "] {
        assert_eq!(
            TenantId::new(keyword.to_string()),
            Err(AccessControlDomainError::InvalidTenantId)
        );
    }
    assert!(TenantId::new("allied".to_string()).is_ok());
}
