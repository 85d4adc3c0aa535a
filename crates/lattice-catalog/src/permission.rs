//! # Permission records
//!
//! Typed catalog entries and their identifiers. A permission is an atomic,
//! catalog-identified capability a principal may hold.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Stable numeric identifier for a permission.
///
/// IDs are assigned in numeric ranges by category convention (see the crate
/// docs); the ranges carry no runtime meaning and all engine code treats
/// IDs as opaque.
///
/// # Example
///
/// ```
/// use lattice_catalog::PermissionId;
///
/// let id = PermissionId(502);
/// assert_eq!(id.to_string(), "502");
/// assert_eq!(PermissionId::from(502u32), id);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PermissionId(pub u32);

impl fmt::Display for PermissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PermissionId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// An immutable permission catalog entry.
///
/// The `requires` set lists the IDs of permissions that MUST also be held
/// whenever this one is held (prerequisite edges). The catalog rejects
/// payloads where a `requires` reference does not exist or where the edges
/// form a cycle.
///
/// `is_critical` and `is_sensitive` are advisory flags surfaced to
/// operators in the UI; they have no effect on resolution.
///
/// # Example
///
/// ```
/// use lattice_catalog::{Permission, PermissionId};
///
/// let perm = Permission::new(502, "documents.write", "Documents", "Edit documents")
///     .with_requires([501])
///     .with_sort_order(20)
///     .critical();
///
/// assert_eq!(perm.id, PermissionId(502));
/// assert!(perm.requires.contains(&PermissionId(501)));
/// assert!(perm.is_critical);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    /// Stable numeric identifier, unique within the catalog.
    pub id: PermissionId,
    /// Dotted symbolic name (e.g. `"admin.users"`).
    pub key: String,
    /// Display grouping.
    pub category: String,
    /// Human-readable label.
    pub label: String,
    /// Longer operator-facing description.
    #[serde(default)]
    pub description: String,
    /// IDs of permissions that must also be held whenever this one is held.
    #[serde(default)]
    pub requires: BTreeSet<PermissionId>,
    /// Advisory: flagged for extra operator scrutiny. No resolution effect.
    #[serde(default)]
    pub is_critical: bool,
    /// Advisory: grants access to sensitive data. No resolution effect.
    #[serde(default)]
    pub is_sensitive: bool,
    /// Sort position within the category listing.
    #[serde(default)]
    pub sort_order: i32,
}

impl Permission {
    /// Create a permission with no prerequisites and default flags.
    ///
    /// # Arguments
    ///
    /// * `id` - Stable numeric identifier
    /// * `key` - Dotted symbolic name
    /// * `category` - Display grouping
    /// * `label` - Human-readable label
    pub fn new(
        id: impl Into<PermissionId>,
        key: impl Into<String>,
        category: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            key: key.into(),
            category: category.into(),
            label: label.into(),
            description: String::new(),
            requires: BTreeSet::new(),
            is_critical: false,
            is_sensitive: false,
            sort_order: 0,
        }
    }

    /// Set the prerequisite permission IDs.
    pub fn with_requires<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PermissionId>,
    {
        self.requires = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Set the operator-facing description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the sort position within the category listing.
    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Flag the permission as critical.
    pub fn critical(mut self) -> Self {
        self.is_critical = true;
        self
    }

    /// Flag the permission as sensitive.
    pub fn sensitive(mut self) -> Self {
        self.is_sensitive = true;
        self
    }

    /// Check whether this permission directly requires `id`.
    ///
    /// Only direct edges are consulted; transitive prerequisites are the
    /// resolver's concern.
    pub fn directly_requires(&self, id: PermissionId) -> bool {
        self.requires.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_builder() {
        let perm = Permission::new(502, "documents.write", "Documents", "Edit documents")
            .with_requires([501u32])
            .with_description("Create and edit document content")
            .with_sort_order(20)
            .critical()
            .sensitive();

        assert_eq!(perm.id, PermissionId(502));
        assert_eq!(perm.key, "documents.write");
        assert_eq!(perm.category, "Documents");
        assert!(perm.directly_requires(PermissionId(501)));
        assert!(!perm.directly_requires(PermissionId(999)));
        assert!(perm.is_critical);
        assert!(perm.is_sensitive);
        assert_eq!(perm.sort_order, 20);
    }

    #[test]
    fn test_permission_payload_shape() {
        // The external catalog payload uses camelCase field names and may
        // omit optional fields entirely.
        let json = r#"{
            "id": 502,
            "key": "documents.write",
            "category": "Documents",
            "label": "Edit documents",
            "requires": [501],
            "isCritical": true,
            "sortOrder": 20
        }"#;

        let perm: Permission = serde_json::from_str(json).unwrap();
        assert_eq!(perm.id, PermissionId(502));
        assert!(perm.requires.contains(&PermissionId(501)));
        assert!(perm.is_critical);
        assert!(!perm.is_sensitive);
        assert_eq!(perm.description, "");
        assert_eq!(perm.sort_order, 20);
    }

    #[test]
    fn test_permission_id_display() {
        assert_eq!(PermissionId(7).to_string(), "7");
    }
}
