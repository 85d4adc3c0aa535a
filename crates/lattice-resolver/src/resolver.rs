//! # Dependency resolution
//!
//! Transitive closure and cascading removal over the `requires` graph.
//!
//! The resolver maintains one invariant: a principal holds permission P
//! only if it holds every permission transitively required by P. Grants
//! expand to their closure; revokes cascade through dependents so no
//! permission is ever left with an unmet prerequisite.

use std::collections::VecDeque;

use lattice_catalog::{CatalogResult, PermissionCatalog, PermissionId, PermissionSet};

/// Computes transitive closures and cascading removals over the catalog's
/// `requires` edges.
///
/// Pure and synchronous: borrows the catalog read-only, so any number of
/// callers may resolve concurrently.
///
/// # Example
///
/// ```
/// use lattice_catalog::{Permission, PermissionCatalog, PermissionSet};
/// use lattice_resolver::DependencyResolver;
///
/// let mut catalog = PermissionCatalog::new();
/// catalog.load(vec![
///     Permission::new(10, "tasks.view", "Tasks", "View tasks"),
///     Permission::new(20, "tasks.edit", "Tasks", "Edit tasks").with_requires([10]),
///     Permission::new(30, "tasks.assign", "Tasks", "Assign tasks").with_requires([20]),
/// ]).unwrap();
///
/// let resolver = DependencyResolver::new(&catalog);
///
/// // Granting 30 pulls in the whole prerequisite chain.
/// let resolved = resolver
///     .resolve_dependencies(&PermissionSet::from_ids([30]))
///     .unwrap();
/// assert_eq!(resolved, PermissionSet::from_ids([10, 20, 30]));
///
/// // Removing 10 cascades through 20 and 30.
/// let remaining = resolver.cascade_removal(10.into(), &resolved).unwrap();
/// assert!(remaining.is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DependencyResolver<'a> {
    catalog: &'a PermissionCatalog,
}

impl<'a> DependencyResolver<'a> {
    /// Create a resolver over a catalog.
    pub fn new(catalog: &'a PermissionCatalog) -> Self {
        Self { catalog }
    }

    /// Expand a candidate grant set to its transitive closure under
    /// `requires`.
    ///
    /// Breadth-first traversal from every candidate ID, accumulating
    /// visited IDs until no new ones are discovered. The visited-set guard
    /// guarantees termination even on cyclic catalog data (cycles are
    /// rejected at load time; the guard is defense in depth), which also
    /// makes the operation idempotent:
    /// `resolve(resolve(S)) == resolve(S)`, and monotone: `S ⊆ resolve(S)`.
    ///
    /// # Errors
    ///
    /// * `CatalogError::NotLoaded` - the catalog has not been loaded
    /// * `CatalogError::UnknownPermission` - a candidate ID has no catalog
    ///   entry; the whole operation aborts with no partial result
    pub fn resolve_dependencies(&self, candidate: &PermissionSet) -> CatalogResult<PermissionSet> {
        self.catalog.ensure_loaded()?;
        // Validate every candidate up front so an unknown ID fails the
        // whole call before any traversal output exists.
        for id in candidate {
            self.catalog.get(id)?;
        }

        let mut resolved = candidate.clone();
        let mut queue: VecDeque<PermissionId> = candidate.iter().collect();
        while let Some(id) = queue.pop_front() {
            let permission = self.catalog.get(id)?;
            for &required in &permission.requires {
                if resolved.insert(required) {
                    queue.push_back(required);
                }
            }
        }
        Ok(resolved)
    }

    /// The subset of `within` (excluding `id` itself) that directly
    /// requires `id`: the permissions that would be left with an unmet
    /// prerequisite if `id` were removed from `within`.
    ///
    /// # Errors
    ///
    /// * `CatalogError::NotLoaded` - the catalog has not been loaded
    /// * `CatalogError::UnknownPermission` - a member of `within` has no
    ///   catalog entry
    pub fn dependents_within(
        &self,
        id: PermissionId,
        within: &PermissionSet,
    ) -> CatalogResult<PermissionSet> {
        self.catalog.ensure_loaded()?;
        let mut dependents = PermissionSet::new();
        for member in within {
            if member == id {
                continue;
            }
            if self.catalog.get(member)?.directly_requires(id) {
                dependents.insert(member);
            }
        }
        Ok(dependents)
    }

    /// Remove `id` from `current` together with every permission that
    /// transitively depends on it.
    ///
    /// Queue/accumulator sweep: pop an ID, record it for removal, enqueue
    /// its not-yet-recorded dependents, repeat until the queue drains.
    /// Complete by construction: no permission left in the result has a
    /// prerequisite among the removed IDs.
    ///
    /// # Errors
    ///
    /// * `CatalogError::NotLoaded` - the catalog has not been loaded
    /// * `CatalogError::UnknownPermission` - `id` or a member of `current`
    ///   has no catalog entry
    pub fn cascade_removal(
        &self,
        id: PermissionId,
        current: &PermissionSet,
    ) -> CatalogResult<PermissionSet> {
        self.catalog.ensure_loaded()?;
        self.catalog.get(id)?;

        let mut to_remove = PermissionSet::new();
        let mut queue = VecDeque::from([id]);
        while let Some(popped) = queue.pop_front() {
            if !to_remove.insert(popped) {
                continue;
            }
            for dependent in &self.dependents_within(popped, current)? {
                if !to_remove.contains(dependent) {
                    queue.push_back(dependent);
                }
            }
        }
        Ok(current.difference(&to_remove))
    }

    /// Apply a whole group of IDs as one grant or revoke against `current`.
    ///
    /// Granting resolves the closure of `current ∪ ids`; revoking folds
    /// [`cascade_removal`](Self::cascade_removal) over each ID in turn
    /// against the shrinking set.
    ///
    /// # Errors
    ///
    /// Same conditions as the underlying operations; any error aborts the
    /// whole toggle with no partial result.
    pub fn apply_group_toggle(
        &self,
        ids: &[PermissionId],
        current: &PermissionSet,
        grant: bool,
    ) -> CatalogResult<PermissionSet> {
        if grant {
            let mut candidate = current.clone();
            candidate.extend(ids.iter().copied());
            self.resolve_dependencies(&candidate)
        } else {
            let mut remaining = current.clone();
            for &id in ids {
                remaining = self.cascade_removal(id, &remaining)?;
            }
            Ok(remaining)
        }
    }
}
