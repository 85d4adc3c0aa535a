//! # Lattice Bulk Assignment Engine
//!
//! Applies one grant operation (add, remove, or apply-template) across a
//! list of target principals, composing the resolver and diff engine from
//! `lattice-resolver` and persisting each principal's new grant set through
//! a pluggable [`PrincipalStore`].
//!
//! This is the only component of the platform that performs I/O. Each
//! per-principal write is independent: the engine fans out one persistence
//! call per target, tolerates per-principal failures, and always returns a
//! usable [`BulkReport`]: a failure on one principal never blocks or rolls
//! back another, and there is no automatic retry.
//!
//! Per principal, an operation moves through
//! `Resolving -> Persisting -> Succeeded | Failed`; the bulk call itself
//! has no aggregate state beyond the final report.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use lattice_assign::{BulkAssignmentEngine, BulkOperation, MemoryPrincipalStore};
//! use lattice_catalog::{PermissionCatalog, PermissionSet};
//! use lattice_resolver::Principal;
//!
//! # async fn example(catalog: PermissionCatalog, targets: Vec<Principal>) {
//! let store = Arc::new(MemoryPrincipalStore::new());
//! let engine = BulkAssignmentEngine::new(store);
//!
//! let operation = BulkOperation::AddPermissions(PermissionSet::from_ids([502]));
//! let report = engine.apply(&catalog, &operation, &targets).await.unwrap();
//!
//! println!(
//!     "{} succeeded, {} failed",
//!     report.succeeded_count(),
//!     report.failed_count(),
//! );
//! # }
//! ```

pub mod bulk;
pub mod error;
pub mod report;
pub mod store;

// Re-export main types for convenience
pub use bulk::{BulkAssignmentEngine, BulkOperation, GrantPreview, RemovalPolicy};
pub use error::{AssignError, AssignResult, StoreError, StoreResult};
pub use report::{AssignmentOutcome, AssignmentStatus, BulkReport};
pub use store::{MemoryPrincipalStore, PrincipalStore};
