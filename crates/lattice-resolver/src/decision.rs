//! # Authorization decisions
//!
//! Single/any/all/batch permission queries for a principal, independent of
//! how the grants were produced.
//!
//! Because every grant set is kept closed under `requires` by the
//! resolver, a decision is plain set membership: no dependency expansion
//! happens at query time, so each check is O(1).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use lattice_catalog::{CatalogResult, PermissionCatalog, PermissionId};

use crate::principal::Principal;

/// How `has_any`/`has_all` answer an empty requirement list.
///
/// The open policy (allow) is the platform convention: code gated on "no
/// particular permission" is open to everyone. The policy is named and
/// overridable so that choice stays visible rather than buried in an
/// empty-list check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyRequirementPolicy {
    /// An empty requirement list allows every principal.
    #[default]
    AllowByDefault,
    /// An empty requirement list allows no principal (super-principals
    /// still bypass).
    DenyByDefault,
}

impl EmptyRequirementPolicy {
    /// What an empty requirement list evaluates to.
    pub fn allows_empty(&self) -> bool {
        matches!(self, EmptyRequirementPolicy::AllowByDefault)
    }
}

/// Answers authorization queries for a principal.
///
/// Pure function of the principal and catalog state; no side effects.
/// A principal whose role is the super-role passes every check without
/// per-ID work.
///
/// # Example
///
/// ```
/// use lattice_catalog::{Permission, PermissionCatalog, PermissionId, PermissionSet};
/// use lattice_resolver::{DecisionEngine, Principal, Role};
///
/// let mut catalog = PermissionCatalog::new();
/// catalog.load(vec![
///     Permission::new(10, "tasks.view", "Tasks", "View tasks"),
///     Permission::new(20, "tasks.edit", "Tasks", "Edit tasks").with_requires([10]),
/// ]).unwrap();
///
/// let engine = DecisionEngine::new(&catalog);
/// let principal = Principal::new("user-1", Role::new("dispatcher"))
///     .with_grants(PermissionSet::from_ids([10]));
///
/// assert!(engine.has_permission(&principal, PermissionId(10)).unwrap());
/// assert!(!engine.has_permission(&principal, PermissionId(20)).unwrap());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DecisionEngine<'a> {
    catalog: &'a PermissionCatalog,
    empty_policy: EmptyRequirementPolicy,
}

impl<'a> DecisionEngine<'a> {
    /// Create a decision engine with the default (allow) empty-list policy.
    pub fn new(catalog: &'a PermissionCatalog) -> Self {
        Self {
            catalog,
            empty_policy: EmptyRequirementPolicy::default(),
        }
    }

    /// Create a decision engine with an explicit empty-list policy.
    pub fn with_empty_policy(
        catalog: &'a PermissionCatalog,
        empty_policy: EmptyRequirementPolicy,
    ) -> Self {
        Self {
            catalog,
            empty_policy,
        }
    }

    /// Check whether the principal holds a single permission.
    ///
    /// `true` immediately for a super-principal; otherwise membership in
    /// the (already closed) grant set. IDs are treated as opaque: an ID
    /// with no catalog entry simply evaluates to "not granted".
    ///
    /// # Errors
    ///
    /// * `CatalogError::NotLoaded` - queried before the catalog was loaded;
    ///   rejected rather than silently treating all permissions as absent
    pub fn has_permission(
        &self,
        principal: &Principal,
        id: PermissionId,
    ) -> CatalogResult<bool> {
        self.catalog.ensure_loaded()?;
        if principal.is_super() {
            return Ok(true);
        }
        Ok(principal.granted.contains(id))
    }

    /// Check whether the principal holds at least one of `ids`.
    ///
    /// Short-circuits; an empty list answers per the configured
    /// [`EmptyRequirementPolicy`].
    pub fn has_any(&self, principal: &Principal, ids: &[PermissionId]) -> CatalogResult<bool> {
        self.catalog.ensure_loaded()?;
        if principal.is_super() {
            return Ok(true);
        }
        if ids.is_empty() {
            return Ok(self.empty_policy.allows_empty());
        }
        Ok(ids.iter().any(|&id| principal.granted.contains(id)))
    }

    /// Check whether the principal holds every one of `ids`.
    ///
    /// Short-circuits; an empty list answers per the configured
    /// [`EmptyRequirementPolicy`].
    pub fn has_all(&self, principal: &Principal, ids: &[PermissionId]) -> CatalogResult<bool> {
        self.catalog.ensure_loaded()?;
        if principal.is_super() {
            return Ok(true);
        }
        if ids.is_empty() {
            return Ok(self.empty_policy.allows_empty());
        }
        Ok(ids.iter().all(|&id| principal.granted.contains(id)))
    }

    /// Evaluate `has_permission` for each ID independently.
    ///
    /// A super-principal short-circuits every entry to `true` without
    /// per-ID work.
    pub fn batch_check(
        &self,
        principal: &Principal,
        ids: &[PermissionId],
    ) -> CatalogResult<BTreeMap<PermissionId, bool>> {
        self.catalog.ensure_loaded()?;
        if principal.is_super() {
            return Ok(ids.iter().map(|&id| (id, true)).collect());
        }
        Ok(ids
            .iter()
            .map(|&id| (id, principal.granted.contains(id)))
            .collect())
    }
}
