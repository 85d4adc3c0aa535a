//! Permission templates
//!
//! Named, curated permission bundles used for quick bulk assignment.
//! A template's permission list need not be pre-resolved; the resolver
//! expands dependencies when the template is applied.

use serde::{Deserialize, Serialize};

use crate::set::PermissionSet;

/// A named, reusable bundle of permissions.
///
/// # Example
///
/// ```
/// use lattice_catalog::{PermissionSet, Template};
///
/// let template = Template::new(
///     "Reviewer",
///     "Read access plus review sign-off",
///     PermissionSet::from_ids([501, 305]),
/// );
/// assert_eq!(template.name, "Reviewer");
/// assert_eq!(template.permissions.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Display name.
    pub name: String,
    /// Operator-facing description of what the bundle is for.
    pub description: String,
    /// The bundled permission IDs; dependencies are resolved at
    /// application time, not here.
    pub permissions: PermissionSet,
}

impl Template {
    /// Create a new template.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        permissions: PermissionSet,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            permissions,
        }
    }
}
