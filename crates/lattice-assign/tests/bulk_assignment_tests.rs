//! End-to-end tests for the bulk assignment engine.
//!
//! These tests drive the full pipeline (catalog load, dependency
//! resolution, diffing, and per-principal persistence) against the
//! in-memory store, plus a failure-injecting store wrapper to verify the
//! partial-success semantics:
//!
//! 1. add/remove/template operations across several principals
//! 2. one principal's store failure leaving siblings' writes observable
//! 3. whole-call abort on bad operation input, before any persistence

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use lattice_assign::{
    AssignError, BulkAssignmentEngine, BulkOperation, MemoryPrincipalStore, PrincipalStore,
    RemovalPolicy, StoreError, StoreResult,
};
use lattice_catalog::{
    CatalogError, Permission, PermissionCatalog, PermissionId, PermissionSet, Template,
};
use lattice_resolver::{Principal, Role};

/// Store wrapper that fails `save_grants` for a configured set of
/// principals, delegating everything else to the inner store.
struct FailingStore {
    inner: MemoryPrincipalStore,
    fail_saves_for: RwLock<HashSet<String>>,
}

impl FailingStore {
    fn new() -> Self {
        Self {
            inner: MemoryPrincipalStore::new(),
            fail_saves_for: RwLock::new(HashSet::new()),
        }
    }

    async fn inject_save_failure(&self, principal_id: &str) {
        self.fail_saves_for
            .write()
            .await
            .insert(principal_id.to_string());
    }
}

#[async_trait]
impl PrincipalStore for FailingStore {
    async fn load_grants(&self, principal_id: &str) -> StoreResult<PermissionSet> {
        self.inner.load_grants(principal_id).await
    }

    async fn save_grants(&self, principal_id: &str, grants: &PermissionSet) -> StoreResult<()> {
        if self.fail_saves_for.read().await.contains(principal_id) {
            return Err(StoreError::Network("connection reset".to_string()));
        }
        self.inner.save_grants(principal_id, grants).await
    }
}

/// Catalog fixture: a task chain (10 <- 20 <- 30) and a document pair
/// (501 <- 502).
fn catalog() -> PermissionCatalog {
    let mut catalog = PermissionCatalog::new();
    catalog
        .load(vec![
            Permission::new(10, "tasks.view", "Tasks", "View tasks"),
            Permission::new(20, "tasks.edit", "Tasks", "Edit tasks").with_requires([10]),
            Permission::new(30, "tasks.assign", "Tasks", "Assign tasks").with_requires([20]),
            Permission::new(501, "documents.read", "Documents", "Read documents"),
            Permission::new(502, "documents.write", "Documents", "Edit documents")
                .with_requires([501]),
        ])
        .unwrap();
    catalog
}

fn principal(id: &str, grants: PermissionSet) -> Principal {
    Principal::new(id, Role::new("dispatcher")).with_grants(grants)
}

#[tokio::test]
async fn test_bulk_add_resolves_dependencies_for_every_target() {
    let catalog = catalog();
    let store = Arc::new(MemoryPrincipalStore::new());
    let engine = BulkAssignmentEngine::new(store.clone());

    let targets = vec![
        principal("user-a", PermissionSet::new()),
        principal("user-b", PermissionSet::from_ids([501])),
    ];
    let operation = BulkOperation::AddPermissions(PermissionSet::from_ids([30]));

    let report = engine.apply(&catalog, &operation, &targets).await.unwrap();
    assert_eq!(report.succeeded_count(), 2);
    assert_eq!(report.failed_count(), 0);
    assert!(!report.is_partial_failure());

    assert_eq!(
        store.load_grants("user-a").await.unwrap(),
        PermissionSet::from_ids([10, 20, 30])
    );
    assert_eq!(
        store.load_grants("user-b").await.unwrap(),
        PermissionSet::from_ids([10, 20, 30, 501])
    );
}

#[tokio::test]
async fn test_bulk_remove_cascades_through_dependents() {
    let catalog = catalog();
    let store = Arc::new(MemoryPrincipalStore::new());
    let engine = BulkAssignmentEngine::new(store.clone());

    let targets = vec![principal("user-a", PermissionSet::from_ids([10, 20, 30, 501]))];
    let operation = BulkOperation::RemovePermissions(PermissionSet::from_ids([10]));

    let report = engine.apply(&catalog, &operation, &targets).await.unwrap();
    assert_eq!(report.succeeded_count(), 1);

    // Removing 10 takes 20 and 30 with it; the document grant is untouched.
    assert_eq!(
        store.load_grants("user-a").await.unwrap(),
        PermissionSet::from_ids([501])
    );
}

#[tokio::test]
async fn test_bulk_remove_direct_strip_policy() {
    let catalog = catalog();
    let store = Arc::new(MemoryPrincipalStore::new());
    let engine = BulkAssignmentEngine::new(store.clone())
        .with_removal_policy(RemovalPolicy::DirectStrip);

    let targets = vec![principal("user-a", PermissionSet::from_ids([10, 20, 30]))];
    let operation = BulkOperation::RemovePermissions(PermissionSet::from_ids([10]));

    engine.apply(&catalog, &operation, &targets).await.unwrap();
    assert_eq!(
        store.load_grants("user-a").await.unwrap(),
        PermissionSet::from_ids([20, 30])
    );
}

#[tokio::test]
async fn test_apply_template_auto_includes_dependencies() {
    let catalog = catalog();
    let store = Arc::new(MemoryPrincipalStore::new());
    let engine = BulkAssignmentEngine::new(store.clone());

    let template = Template::new(
        "Reviewer",
        "Task editing for reviewers",
        PermissionSet::from_ids([20]),
    );
    let targets = vec![principal("user-a", PermissionSet::new())];

    let report = engine
        .apply(&catalog, &BulkOperation::ApplyTemplate(template), &targets)
        .await
        .unwrap();
    assert_eq!(report.succeeded_count(), 1);

    // The template names only 20; its prerequisite 10 comes along.
    assert_eq!(
        store.load_grants("user-a").await.unwrap(),
        PermissionSet::from_ids([10, 20])
    );
}

#[tokio::test]
async fn test_partial_failure_leaves_sibling_writes_observable() {
    let catalog = catalog();
    let store = Arc::new(FailingStore::new());
    store.inject_save_failure("user-b").await;
    store
        .inner
        .seed("user-b", PermissionSet::from_ids([10, 20]))
        .await;
    let engine = BulkAssignmentEngine::new(store.clone());

    let targets = vec![
        principal("user-a", PermissionSet::from_ids([10, 20])),
        principal("user-b", PermissionSet::from_ids([10, 20])),
    ];
    let operation = BulkOperation::RemovePermissions(PermissionSet::from_ids([20]));

    let report = engine.apply(&catalog, &operation, &targets).await.unwrap();

    assert!(report.is_partial_failure());
    assert_eq!(report.succeeded(), vec!["user-a"]);
    let failed = report.failed();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].0, "user-b");
    assert!(failed[0].1.contains("connection reset"));

    // user-a's removal is persisted; user-b's store state is unchanged.
    assert_eq!(
        store.load_grants("user-a").await.unwrap(),
        PermissionSet::from_ids([10])
    );
    assert_eq!(
        store.load_grants("user-b").await.unwrap(),
        PermissionSet::from_ids([10, 20])
    );
}

#[tokio::test]
async fn test_unknown_operation_id_aborts_before_any_persistence() {
    let catalog = catalog();
    let store = Arc::new(MemoryPrincipalStore::new());
    let engine = BulkAssignmentEngine::new(store.clone());

    let targets = vec![principal("user-a", PermissionSet::new())];
    let operation = BulkOperation::AddPermissions(PermissionSet::from_ids([10, 999]));

    let err = engine.apply(&catalog, &operation, &targets).await.unwrap_err();
    assert!(matches!(
        err,
        AssignError::Catalog(CatalogError::UnknownPermission(PermissionId(999)))
    ));

    // Nothing was written for any target.
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_apply_rejected_before_catalog_load() {
    let catalog = PermissionCatalog::new();
    let engine = BulkAssignmentEngine::new(Arc::new(MemoryPrincipalStore::new()));

    let err = engine
        .apply(
            &catalog,
            &BulkOperation::AddPermissions(PermissionSet::from_ids([10])),
            &[principal("user-a", PermissionSet::new())],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AssignError::Catalog(CatalogError::NotLoaded)));
}

#[tokio::test]
async fn test_stale_grants_fail_that_principal_only() {
    let catalog = catalog();
    let store = Arc::new(MemoryPrincipalStore::new());
    let engine = BulkAssignmentEngine::new(store.clone());

    // user-b's stored grants reference an ID the catalog no longer has.
    let targets = vec![
        principal("user-a", PermissionSet::from_ids([10])),
        principal("user-b", PermissionSet::from_ids([10, 777])),
    ];
    let operation = BulkOperation::AddPermissions(PermissionSet::from_ids([20]));

    let report = engine.apply(&catalog, &operation, &targets).await.unwrap();
    assert!(report.is_partial_failure());
    assert_eq!(report.succeeded(), vec!["user-a"]);
    assert_eq!(
        store.load_grants("user-a").await.unwrap(),
        PermissionSet::from_ids([10, 20])
    );
    assert!(store.load_grants("user-b").await.is_err());
}

#[tokio::test]
async fn test_empty_target_list_yields_empty_report() {
    let catalog = catalog();
    let engine = BulkAssignmentEngine::new(Arc::new(MemoryPrincipalStore::new()));

    let report = engine
        .apply(
            &catalog,
            &BulkOperation::AddPermissions(PermissionSet::from_ids([10])),
            &[],
        )
        .await
        .unwrap();
    assert_eq!(report.outcomes.len(), 0);
    assert_eq!(report.succeeded_count(), 0);
    assert!(!report.is_partial_failure());
}
