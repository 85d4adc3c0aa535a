//! # Lattice Dependency Resolver & Decision Engine
//!
//! This crate provides the graph and set algorithms at the heart of the
//! Lattice access platform:
//!
//! - **Dependency Resolver**: maintains the closure invariant (a principal
//!   that holds a permission also holds every permission it transitively
//!   requires) and computes the complete consequence set of any grant or
//!   revoke, including cascading removal of dependents.
//! - **Decision Engine**: answers single/any/all/batch authorization
//!   queries for a principal, honoring the super-principal bypass.
//! - **Change Diff Engine**: computes the auditable delta between an
//!   original and a proposed grant set before an edit is committed.
//!
//! All three are pure, synchronous algorithms over a borrowed
//! [`PermissionCatalog`](lattice_catalog::PermissionCatalog): they only
//! read shared catalog state, never mutate it, and may be invoked from any
//! number of concurrent callers.
//!
//! ## Data flow
//!
//! ```text
//! UI toggle -> DependencyResolver (full consequence set)
//!           -> GrantDiff          (what changed, for confirmation)
//!           -> lattice-assign     (persist, per principal)
//!
//! DecisionEngine is consulted continuously elsewhere to gate behavior.
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use lattice_catalog::{Permission, PermissionCatalog, PermissionId, PermissionSet};
//! use lattice_resolver::{DecisionEngine, DependencyResolver, Principal, Role};
//!
//! let mut catalog = PermissionCatalog::new();
//! catalog.load(vec![
//!     Permission::new(10, "tasks.view", "Tasks", "View tasks"),
//!     Permission::new(20, "tasks.edit", "Tasks", "Edit tasks").with_requires([10]),
//! ]).unwrap();
//!
//! // Granting "edit" pulls in "view" automatically.
//! let resolver = DependencyResolver::new(&catalog);
//! let grants = resolver
//!     .resolve_dependencies(&PermissionSet::from_ids([20]))
//!     .unwrap();
//! assert_eq!(grants, PermissionSet::from_ids([10, 20]));
//!
//! // Membership alone answers queries: grant sets are always closed.
//! let principal = Principal::new("user-1", Role::new("editor")).with_grants(grants);
//! let engine = DecisionEngine::new(&catalog);
//! assert!(engine.has_permission(&principal, PermissionId(10)).unwrap());
//! ```

pub mod decision;
pub mod diff;
pub mod principal;
pub mod resolver;

// Re-export main types for convenience
pub use decision::{DecisionEngine, EmptyRequirementPolicy};
pub use diff::GrantDiff;
pub use principal::{Principal, Role, SUPER_ROLE};
pub use resolver::DependencyResolver;
