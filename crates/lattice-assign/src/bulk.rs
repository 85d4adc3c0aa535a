//! # Bulk assignment engine
//!
//! Applies one operation across many principals as a fan-out of
//! independent per-principal state machines, persisting each new grant set
//! through the [`PrincipalStore`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use lattice_catalog::{CatalogResult, PermissionCatalog, PermissionSet, Template};
use lattice_resolver::{DependencyResolver, GrantDiff, Principal};

use crate::error::AssignResult;
use crate::report::{AssignmentOutcome, BulkReport};
use crate::store::PrincipalStore;

/// One grant operation to apply across target principals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "payload", rename_all = "snake_case")]
pub enum BulkOperation {
    /// Grant these permissions (plus their transitive prerequisites).
    AddPermissions(PermissionSet),
    /// Revoke these permissions, per the engine's [`RemovalPolicy`].
    RemovePermissions(PermissionSet),
    /// Grant a template's bundle (plus transitive prerequisites).
    ApplyTemplate(Template),
}

impl BulkOperation {
    /// The permission IDs named by the operation's input.
    pub fn permission_ids(&self) -> &PermissionSet {
        match self {
            BulkOperation::AddPermissions(ids) | BulkOperation::RemovePermissions(ids) => ids,
            BulkOperation::ApplyTemplate(template) => &template.permissions,
        }
    }

    /// Short operation kind for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            BulkOperation::AddPermissions(_) => "add_permissions",
            BulkOperation::RemovePermissions(_) => "remove_permissions",
            BulkOperation::ApplyTemplate(_) => "apply_template",
        }
    }
}

/// How [`BulkOperation::RemovePermissions`] treats dependents of a removed
/// permission.
///
/// One uniform policy applies to single-principal and bulk paths alike.
/// Cascading is the default: it is the only setting that keeps every
/// persisted grant set closed under `requires`. Direct strip remains
/// available for callers migrating from systems that removed exactly the
/// requested IDs and nothing else, with the caveat that it can persist a
/// grant set containing permissions whose prerequisites are gone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicy {
    /// Removing a permission also removes everything that transitively
    /// depends on it.
    #[default]
    CascadeDependents,
    /// Remove exactly the requested IDs and nothing else.
    DirectStrip,
}

/// A locally computed edit, presented to the operator before committing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantPreview {
    /// The grant set that would be persisted on confirm.
    pub new_grants: PermissionSet,
    /// What would change relative to the current grants.
    pub diff: GrantDiff,
}

/// Applies grant operations across principals without requiring
/// all-or-nothing success.
///
/// Per target principal the engine runs
/// `Resolving -> Persisting -> Succeeded | Failed`: it computes the new
/// grant set locally through the resolver, then issues one independent
/// store write. Failures are collected per principal into the returned
/// [`BulkReport`]; nothing is retried and nothing is rolled back.
pub struct BulkAssignmentEngine {
    store: Arc<dyn PrincipalStore>,
    removal_policy: RemovalPolicy,
}

impl std::fmt::Debug for BulkAssignmentEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BulkAssignmentEngine")
            .field("removal_policy", &self.removal_policy)
            .finish()
    }
}

impl BulkAssignmentEngine {
    /// Create an engine with the default (cascading) removal policy.
    pub fn new(store: Arc<dyn PrincipalStore>) -> Self {
        Self {
            store,
            removal_policy: RemovalPolicy::default(),
        }
    }

    /// Override the removal policy.
    pub fn with_removal_policy(mut self, removal_policy: RemovalPolicy) -> Self {
        self.removal_policy = removal_policy;
        self
    }

    /// The configured removal policy.
    pub fn removal_policy(&self) -> RemovalPolicy {
        self.removal_policy
    }

    /// Compute what an operation would do to one principal, without
    /// persisting anything.
    ///
    /// This is the single-principal edit path: the UI shows the returned
    /// diff for confirmation, then commits via [`apply`](Self::apply) with
    /// a single target.
    ///
    /// # Errors
    ///
    /// Catalog errors (not loaded, unknown permission ID) abort the
    /// preview; nothing is partially computed.
    pub fn preview(
        &self,
        catalog: &PermissionCatalog,
        operation: &BulkOperation,
        principal: &Principal,
    ) -> AssignResult<GrantPreview> {
        let new_grants = self.next_grants(catalog, operation, &principal.granted)?;
        let diff = GrantDiff::between(&principal.granted, &new_grants);
        Ok(GrantPreview { new_grants, diff })
    }

    /// Apply one operation across all target principals.
    ///
    /// The operation's own permission IDs are validated up front: an
    /// unknown ID or an unloaded catalog fails the whole call before any
    /// persistence is issued. After that, every per-principal outcome is
    /// independent: the persistence calls are dispatched concurrently, a
    /// failure on one principal never prevents or rolls back successes on
    /// others, and the report is always returned usable.
    ///
    /// # Errors
    ///
    /// Only whole-call input errors; per-principal failures land in the
    /// report instead.
    pub async fn apply(
        &self,
        catalog: &PermissionCatalog,
        operation: &BulkOperation,
        targets: &[Principal],
    ) -> AssignResult<BulkReport> {
        catalog.ensure_loaded()?;
        for id in operation.permission_ids() {
            catalog.get(id)?;
        }

        let operation_id = Uuid::now_v7();
        let started_at = chrono::Utc::now();
        debug!(
            %operation_id,
            kind = operation.kind(),
            targets = targets.len(),
            "dispatching bulk assignment"
        );

        let outcomes = futures::future::join_all(
            targets
                .iter()
                .map(|principal| self.apply_to_principal(catalog, operation, principal)),
        )
        .await;

        let report = BulkReport {
            operation_id,
            started_at,
            finished_at: chrono::Utc::now(),
            outcomes,
        };
        debug!(
            %operation_id,
            succeeded = report.succeeded_count(),
            failed = report.failed_count(),
            "bulk assignment finished"
        );
        Ok(report)
    }

    /// One principal's state machine: resolve locally, persist, report.
    async fn apply_to_principal(
        &self,
        catalog: &PermissionCatalog,
        operation: &BulkOperation,
        principal: &Principal,
    ) -> AssignmentOutcome {
        let new_grants = match self.next_grants(catalog, operation, &principal.granted) {
            Ok(grants) => grants,
            Err(err) => {
                warn!(principal = %principal.id, error = %err, "grant resolution failed");
                return AssignmentOutcome::failed(&principal.id, err.to_string());
            }
        };
        let diff = GrantDiff::between(&principal.granted, &new_grants);

        match self.store.save_grants(&principal.id, &new_grants).await {
            Ok(()) => {
                debug!(
                    principal = %principal.id,
                    added = diff.added_count(),
                    removed = diff.removed_count(),
                    "grants persisted"
                );
                AssignmentOutcome::succeeded(&principal.id, diff)
            }
            Err(err) => {
                warn!(principal = %principal.id, error = %err, "grant persistence failed");
                AssignmentOutcome::failed(&principal.id, err.to_string())
            }
        }
    }

    /// Compute the new grant set for one principal's current grants.
    fn next_grants(
        &self,
        catalog: &PermissionCatalog,
        operation: &BulkOperation,
        current: &PermissionSet,
    ) -> CatalogResult<PermissionSet> {
        let resolver = DependencyResolver::new(catalog);
        match operation {
            BulkOperation::AddPermissions(to_add) => {
                resolver.resolve_dependencies(&current.union(to_add))
            }
            BulkOperation::ApplyTemplate(template) => {
                resolver.resolve_dependencies(&current.union(&template.permissions))
            }
            BulkOperation::RemovePermissions(to_remove) => match self.removal_policy {
                RemovalPolicy::CascadeDependents => {
                    let mut remaining = current.clone();
                    for id in to_remove {
                        remaining = resolver.cascade_removal(id, &remaining)?;
                    }
                    Ok(remaining)
                }
                RemovalPolicy::DirectStrip => {
                    catalog.ensure_loaded()?;
                    for id in to_remove {
                        catalog.get(id)?;
                    }
                    Ok(current.difference(to_remove))
                }
            },
        }
    }
}
