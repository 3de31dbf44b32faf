/// How far a caller's permission roles reach, as seen by tenant resolution.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum PrincipalTier {
    /// No recognised permission role.
    Unprivileged,
    /// Only basic-user roles: own profile and data.
    BasicOnly,
    /// At least one role beyond the basic tier.
    Elevated,
    /// Holds a universal role. Tenant scope does not apply.
    FullAccess,
}
