//! Principals and roles
//!
//! A principal is a user or role-bearing entity whose grant set is
//! evaluated by the decision engine. Grant sets are mutated only through
//! resolver-validated operations, never ad hoc.

use serde::{Deserialize, Serialize};

use lattice_catalog::PermissionSet;

/// The role string that bypasses all permission checks.
pub const SUPER_ROLE: &str = "0";

/// A principal's role.
///
/// Roles are open-ended strings assigned by the principal store; the only
/// role with engine-level meaning is the super-principal role
/// ([`SUPER_ROLE`]), which short-circuits every permission check to
/// allowed.
///
/// # Example
///
/// ```
/// use lattice_resolver::Role;
///
/// assert!(Role::super_role().is_super());
/// assert!(!Role::new("dispatcher").is_super());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    /// Create a role from its string form.
    pub fn new(role: impl Into<String>) -> Self {
        Self(role.into())
    }

    /// The super-principal role.
    pub fn super_role() -> Self {
        Self(SUPER_ROLE.to_string())
    }

    /// Check whether this is the super-principal role.
    pub fn is_super(&self) -> bool {
        self.0 == SUPER_ROLE
    }

    /// Get the string form of the role.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Role {
    fn from(role: &str) -> Self {
        Self::new(role)
    }
}

/// A user or role-bearing entity with a set of granted permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Store-assigned identifier.
    pub id: String,
    /// The principal's role.
    pub role: Role,
    /// The current grant set. Kept closed under `requires` by routing all
    /// mutations through the resolver.
    pub granted: PermissionSet,
}

impl Principal {
    /// Create a principal with an empty grant set.
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
            granted: PermissionSet::new(),
        }
    }

    /// Replace the grant set.
    pub fn with_grants(mut self, granted: PermissionSet) -> Self {
        self.granted = granted;
        self
    }

    /// Check whether this principal carries the super-principal bypass.
    pub fn is_super(&self) -> bool {
        self.role.is_super()
    }
}
