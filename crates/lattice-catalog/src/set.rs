//! # Permission sets
//!
//! The common currency between the resolver, the diff engine, and
//! persistence calls: an ordinary set of permission IDs with insertion
//! order irrelevant and duplicates collapsed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::permission::PermissionId;

/// A set of permission IDs.
///
/// Backed by an ordered set so iteration (and therefore every diff and
/// report built from it) is deterministic.
///
/// # Example
///
/// ```
/// use lattice_catalog::{PermissionId, PermissionSet};
///
/// let mut set = PermissionSet::from_ids([501, 502]);
/// assert!(set.contains(PermissionId(501)));
/// assert_eq!(set.len(), 2);
///
/// set.insert(PermissionId(510));
/// set.remove(PermissionId(501));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet {
    ids: BTreeSet<PermissionId>,
}

impl PermissionSet {
    /// Create a new empty permission set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from anything yielding permission IDs (or raw `u32`s).
    ///
    /// # Example
    ///
    /// ```
    /// use lattice_catalog::PermissionSet;
    ///
    /// let set = PermissionSet::from_ids([501, 501, 502]);
    /// assert_eq!(set.len(), 2); // duplicates collapse
    /// ```
    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PermissionId>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Add an ID to the set.
    ///
    /// # Returns
    ///
    /// `true` if the ID was not already present
    pub fn insert(&mut self, id: impl Into<PermissionId>) -> bool {
        self.ids.insert(id.into())
    }

    /// Remove an ID from the set.
    ///
    /// # Returns
    ///
    /// `true` if the ID was present
    pub fn remove(&mut self, id: impl Into<PermissionId>) -> bool {
        self.ids.remove(&id.into())
    }

    /// Check whether the set contains an ID.
    pub fn contains(&self, id: impl Into<PermissionId>) -> bool {
        self.ids.contains(&id.into())
    }

    /// Number of IDs in the set.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Remove all IDs.
    pub fn clear(&mut self) {
        self.ids.clear()
    }

    /// Iterate over the IDs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = PermissionId> + '_ {
        self.ids.iter().copied()
    }

    /// Merge another set into this one.
    pub fn merge(&mut self, other: &PermissionSet) {
        self.ids.extend(other.ids.iter().copied());
    }

    /// The set of IDs present in either set.
    pub fn union(&self, other: &PermissionSet) -> PermissionSet {
        Self {
            ids: self.ids.union(&other.ids).copied().collect(),
        }
    }

    /// The set of IDs present in `self` but not in `other`.
    pub fn difference(&self, other: &PermissionSet) -> PermissionSet {
        Self {
            ids: self.ids.difference(&other.ids).copied().collect(),
        }
    }

    /// Check whether every ID in this set is also in `other`.
    pub fn is_subset(&self, other: &PermissionSet) -> bool {
        self.ids.is_subset(&other.ids)
    }

    /// Collect the IDs into a sorted vector.
    pub fn to_vec(&self) -> Vec<PermissionId> {
        self.ids.iter().copied().collect()
    }
}

impl FromIterator<PermissionId> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = PermissionId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl Extend<PermissionId> for PermissionSet {
    fn extend<T: IntoIterator<Item = PermissionId>>(&mut self, iter: T) {
        self.ids.extend(iter)
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = PermissionId;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, PermissionId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_remove_contains() {
        let mut set = PermissionSet::new();
        assert!(set.insert(501u32));
        assert!(!set.insert(501u32));
        assert!(set.contains(501u32));
        assert!(set.remove(501u32));
        assert!(!set.remove(501u32));
        assert!(set.is_empty());
    }

    #[test]
    fn test_set_algebra() {
        let a = PermissionSet::from_ids([10, 20]);
        let b = PermissionSet::from_ids([20, 30]);

        assert_eq!(a.union(&b), PermissionSet::from_ids([10, 20, 30]));
        assert_eq!(a.difference(&b), PermissionSet::from_ids([10]));
        assert_eq!(b.difference(&a), PermissionSet::from_ids([30]));
        assert!(PermissionSet::from_ids([20]).is_subset(&a));
        assert!(!a.is_subset(&b));
    }

    #[test]
    fn test_merge() {
        let mut a = PermissionSet::from_ids([10]);
        a.merge(&PermissionSet::from_ids([20, 30]));
        assert_eq!(a, PermissionSet::from_ids([10, 20, 30]));
    }

    #[test]
    fn test_deterministic_order() {
        let set = PermissionSet::from_ids([30, 10, 20]);
        let ids: Vec<u32> = set.iter().map(|id| id.0).collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[test]
    fn test_serde_transparent() {
        let set = PermissionSet::from_ids([20, 10]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "[10,20]");
        let back: PermissionSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
