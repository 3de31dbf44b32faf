/// Per-request evaluation states. `Allowed` and `Denied` are terminal.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum AuthorizationStage {
    Unauthenticated,
    ClaimsExtracted,
    PermissionsResolved,
    TenantScopeResolved,
    Allowed,
    Denied,
}

impl AuthorizationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::ClaimsExtracted => "claims_extracted",
            Self::PermissionsResolved => "permissions_resolved",
            Self::TenantScopeResolved => "tenant_scope_resolved",
            Self::Allowed => "allowed",
            Self::Denied => "denied",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Allowed | Self::Denied)
    }

    /// Moves one step forward. Terminal states and skipped steps are refused.
    pub fn advance(self, next: AuthorizationStage) -> Option<AuthorizationStage> {
        let permitted = match (self, next) {
            (Self::Unauthenticated, Self::ClaimsExtracted)
            | (Self::ClaimsExtracted, Self::PermissionsResolved)
            | (Self::PermissionsResolved, Self::TenantScopeResolved)
            | (Self::TenantScopeResolved, Self::Allowed) => true,
            (current, Self::Denied) => !current.is_terminal(),
            _ => false,
        };

        permitted.then_some(next)
    }
}
