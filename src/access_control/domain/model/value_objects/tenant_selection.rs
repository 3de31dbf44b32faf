use super::tenant_id::TenantId;

/// Raw caller-supplied tenant selection (`X-Tenant`). Kept unparsed so that
/// full-access callers bypass its validation entirely.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TenantSelection(String);

impl TenantSelection {
    /// `None` for an absent or blank header.
    pub fn from_header(value: Option<&str>) -> Option<Self> {
        value
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| Self(value.to_string()))
    }

    pub fn raw(&self) -> &str {
        &self.0
    }

    /// The selected tenant, or `None` if the value cannot name any tenant.
    pub fn tenant_id(&self) -> Option<TenantId> {
        TenantId::new(self.0.clone()).ok()
    }
}
