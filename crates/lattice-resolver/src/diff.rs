//! # Grant diffs
//!
//! Auditable, human-presentable deltas between two permission sets,
//! computed before an edit is committed and attached to per-principal
//! outcomes in bulk reports.

use serde::{Deserialize, Serialize};

use lattice_catalog::{PermissionId, PermissionSet};

/// The delta between an original and a proposed grant set.
///
/// Pure and order-independent. Symmetric:
/// `GrantDiff::between(a, b).added == GrantDiff::between(b, a).removed`.
///
/// # Example
///
/// ```
/// use lattice_catalog::{PermissionId, PermissionSet};
/// use lattice_resolver::GrantDiff;
///
/// let original = PermissionSet::from_ids([10, 20]);
/// let proposed = PermissionSet::from_ids([10, 30]);
///
/// let diff = GrantDiff::between(&original, &proposed);
/// assert_eq!(diff.added, vec![PermissionId(30)]);
/// assert_eq!(diff.removed, vec![PermissionId(20)]);
/// assert_eq!(diff.added_count(), 1);
/// assert_eq!(diff.removed_count(), 1);
/// assert!(diff.has_changes());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantDiff {
    /// IDs present in the proposed set but not the original, ascending.
    pub added: Vec<PermissionId>,
    /// IDs present in the original set but not the proposed, ascending.
    pub removed: Vec<PermissionId>,
}

impl GrantDiff {
    /// Compute the delta between two permission sets.
    pub fn between(original: &PermissionSet, proposed: &PermissionSet) -> Self {
        Self {
            added: proposed.difference(original).to_vec(),
            removed: original.difference(proposed).to_vec(),
        }
    }

    /// Number of permissions being added.
    pub fn added_count(&self) -> usize {
        self.added.len()
    }

    /// Number of permissions being removed.
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    /// Check whether the proposed set differs from the original at all.
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_basic() {
        let diff = GrantDiff::between(
            &PermissionSet::from_ids([10, 20]),
            &PermissionSet::from_ids([10, 30]),
        );
        assert_eq!(diff.added, vec![PermissionId(30)]);
        assert_eq!(diff.removed, vec![PermissionId(20)]);
        assert_eq!(diff.added_count(), 1);
        assert_eq!(diff.removed_count(), 1);
        assert!(diff.has_changes());
    }

    #[test]
    fn test_diff_no_changes() {
        let set = PermissionSet::from_ids([10, 20]);
        let diff = GrantDiff::between(&set, &set.clone());
        assert!(!diff.has_changes());
        assert!(diff.added.is_empty());
        assert!(diff.removed.is_empty());
    }

    #[test]
    fn test_diff_symmetry() {
        let a = PermissionSet::from_ids([1, 2, 3, 10]);
        let b = PermissionSet::from_ids([3, 10, 40, 50]);

        let forward = GrantDiff::between(&a, &b);
        let backward = GrantDiff::between(&b, &a);
        assert_eq!(forward.added, backward.removed);
        assert_eq!(forward.removed, backward.added);
    }

    #[test]
    fn test_diff_against_empty() {
        let set = PermissionSet::from_ids([10, 20]);

        let diff = GrantDiff::between(&PermissionSet::new(), &set);
        assert_eq!(diff.added_count(), 2);
        assert_eq!(diff.removed_count(), 0);

        let diff = GrantDiff::between(&set, &PermissionSet::new());
        assert_eq!(diff.added_count(), 0);
        assert_eq!(diff.removed_count(), 2);
    }

    #[test]
    fn test_diff_serializes_for_operator_review() {
        let diff = GrantDiff::between(
            &PermissionSet::from_ids([20]),
            &PermissionSet::from_ids([10, 30]),
        );
        let json = serde_json::to_string(&diff).unwrap();
        assert_eq!(json, r#"{"added":[10,30],"removed":[20]}"#);
    }
}
