//! # Permission catalog
//!
//! In-memory cache of permission metadata with O(1) lookup by ID.
//!
//! The catalog is populated by handing in a fully deserialized payload;
//! it performs no I/O of its own. `load` validates the whole payload
//! (duplicate IDs, dangling `requires` references, dependency cycles)
//! before installing anything: on error the previous snapshot, if any,
//! stays in place untouched.

use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::error::{CatalogError, CatalogResult};
use crate::permission::{Permission, PermissionId};

/// Cache of permission metadata keyed by ID.
///
/// Construct one per engine context and pass it in explicitly: there is
/// no process-wide singleton, which keeps tests hermetic and makes the
/// "replace the whole snapshot on reload" discipline visible at the call
/// site.
///
/// # Example
///
/// ```
/// use lattice_catalog::{Permission, PermissionCatalog, PermissionId};
///
/// let mut catalog = PermissionCatalog::new();
/// assert!(!catalog.is_loaded());
///
/// catalog.load(vec![
///     Permission::new(501, "documents.read", "Documents", "Read documents"),
///     Permission::new(502, "documents.write", "Documents", "Edit documents")
///         .with_requires([501]),
/// ]).unwrap();
///
/// assert!(catalog.is_loaded());
/// assert_eq!(catalog.get(PermissionId(501)).unwrap().key, "documents.read");
/// assert!(catalog.get(PermissionId(999)).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PermissionCatalog {
    entries: HashMap<PermissionId, Permission>,
    loaded: bool,
}

impl PermissionCatalog {
    /// Create a new, unloaded catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire cache with a new payload.
    ///
    /// Never partially merges: either the whole payload validates and
    /// becomes the new snapshot, or the call fails and the previous
    /// snapshot is untouched. Idempotent: loading the same payload twice
    /// yields the same state.
    ///
    /// # Errors
    ///
    /// * [`CatalogError::DuplicateId`] - two entries share an ID
    /// * [`CatalogError::UnknownDependency`] - a `requires` reference has
    ///   no entry in the payload
    /// * [`CatalogError::DependencyCycle`] - the `requires` edges are
    ///   cyclic (a self-reference is a cycle of one)
    pub fn load(&mut self, payload: Vec<Permission>) -> CatalogResult<()> {
        let mut entries: HashMap<PermissionId, Permission> = HashMap::with_capacity(payload.len());
        for permission in payload {
            if entries.contains_key(&permission.id) {
                return Err(CatalogError::DuplicateId(permission.id));
            }
            entries.insert(permission.id, permission);
        }

        for permission in entries.values() {
            for &required in &permission.requires {
                if !entries.contains_key(&required) {
                    return Err(CatalogError::UnknownDependency {
                        id: permission.id,
                        requires: required,
                    });
                }
            }
        }

        Self::check_acyclic(&entries)?;

        self.entries = entries;
        self.loaded = true;
        Ok(())
    }

    /// Kahn topological sort over the `requires` edges; any entry left
    /// unordered sits on a cycle.
    fn check_acyclic(entries: &HashMap<PermissionId, Permission>) -> CatalogResult<()> {
        let mut in_degree: HashMap<PermissionId, usize> = entries
            .iter()
            .map(|(&id, permission)| (id, permission.requires.len()))
            .collect();

        // Reverse adjacency: required -> the permissions that require it.
        let mut dependents: HashMap<PermissionId, Vec<PermissionId>> = HashMap::new();
        for permission in entries.values() {
            for &required in &permission.requires {
                dependents.entry(required).or_default().push(permission.id);
            }
        }

        let mut queue: VecDeque<PermissionId> = in_degree
            .iter()
            .filter(|(_, &degree)| degree == 0)
            .map(|(&id, _)| id)
            .collect();

        let mut ordered = 0usize;
        while let Some(id) = queue.pop_front() {
            ordered += 1;
            if let Some(next) = dependents.get(&id) {
                for &dependent in next {
                    let degree = in_degree
                        .get_mut(&dependent)
                        .ok_or(CatalogError::UnknownPermission(dependent))?;
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(dependent);
                    }
                }
            }
        }

        if ordered == entries.len() {
            Ok(())
        } else {
            let mut cyclic: Vec<PermissionId> = in_degree
                .into_iter()
                .filter(|&(_, degree)| degree > 0)
                .map(|(id, _)| id)
                .collect();
            cyclic.sort();
            Err(CatalogError::DependencyCycle(cyclic))
        }
    }

    /// Check whether a successful `load` has happened.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Reject with [`CatalogError::NotLoaded`] if no successful `load`
    /// has happened yet.
    pub fn ensure_loaded(&self) -> CatalogResult<()> {
        if self.loaded {
            Ok(())
        } else {
            Err(CatalogError::NotLoaded)
        }
    }

    /// Look up a permission by ID.
    ///
    /// # Errors
    ///
    /// * [`CatalogError::NotLoaded`] - queried before `load`
    /// * [`CatalogError::UnknownPermission`] - no entry for `id`; treat as
    ///   a data-integrity error, not as "permission absent"
    pub fn get(&self, id: PermissionId) -> CatalogResult<&Permission> {
        self.ensure_loaded()?;
        self.entries
            .get(&id)
            .ok_or(CatalogError::UnknownPermission(id))
    }

    /// Check whether an ID has an entry in the current snapshot.
    ///
    /// Unlike [`get`](Self::get), this describes the snapshot as-is: on an
    /// unloaded catalog it answers `false` for every ID. Callers that need
    /// "absent" distinguished from "not loaded yet" should use `get` or
    /// [`ensure_loaded`](Self::ensure_loaded) first.
    pub fn contains(&self, id: PermissionId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Number of entries in the current snapshot (zero before `load`).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the current snapshot holds no entries, which is always the
    /// case before `load`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the current snapshot's entries in unspecified order
    /// (empty before `load`).
    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.entries.values()
    }

    /// Group all permissions by category for display.
    ///
    /// Each category's list is sorted by `sort_order`, then `label`.
    ///
    /// # Errors
    ///
    /// * [`CatalogError::NotLoaded`] - queried before `load`
    pub fn all_by_category(&self) -> CatalogResult<BTreeMap<&str, Vec<&Permission>>> {
        self.ensure_loaded()?;
        let mut grouped: BTreeMap<&str, Vec<&Permission>> = BTreeMap::new();
        for permission in self.entries.values() {
            grouped
                .entry(permission.category.as_str())
                .or_default()
                .push(permission);
        }
        for list in grouped.values_mut() {
            list.sort_by(|a, b| {
                a.sort_order
                    .cmp(&b.sort_order)
                    .then_with(|| a.label.cmp(&b.label))
            });
        }
        Ok(grouped)
    }
}
