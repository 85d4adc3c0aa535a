//! # Lattice Permission Catalog
//!
//! This crate provides the permission catalog for the Lattice access
//! platform: typed permission metadata, permission sets, templates, and
//! load-time validation of the permission dependency graph.
//!
//! ## Overview
//!
//! The lattice-catalog crate handles:
//! - **Permissions**: catalog entries keyed by stable numeric ID
//! - **Dependency edges**: the `requires` relation between permissions
//! - **Permission Sets**: the common currency passed between the resolver,
//!   the diff engine, and persistence
//! - **Templates**: named, curated permission bundles
//!
//! ## Architecture
//!
//! ```text
//! Permission = ID + key + category metadata + requires edges
//!
//! Examples:
//!   { id: 501, key: "documents.read",   requires: [] }
//!   { id: 502, key: "documents.write",  requires: [501] }
//!   { id: 510, key: "documents.delete", requires: [502] }
//! ```
//!
//! The `requires` edges form a directed acyclic graph: holding a permission
//! is only meaningful when every transitively required permission is also
//! held. The catalog validates that invariant's preconditions at load time
//! (every referenced ID exists, no cycles); the resolver in
//! `lattice-resolver` maintains the closure invariant on grant sets.
//!
//! ## ID ranges
//!
//! Permission IDs are allocated in numeric ranges by category convention
//! (`1-99` administration, `200-299` tasks, `300-399` operations, `500-599`
//! documents, `600-699` field infrastructure, `800-899` entities). The
//! ranges are an allocation convention only; all engine code treats IDs as
//! opaque integers.
//!
//! ## Usage
//!
//! ```rust
//! use lattice_catalog::{Permission, PermissionCatalog, PermissionId, PermissionSet};
//!
//! let mut catalog = PermissionCatalog::new();
//! catalog.load(vec![
//!     Permission::new(501, "documents.read", "Documents", "Read documents"),
//!     Permission::new(502, "documents.write", "Documents", "Edit documents")
//!         .with_requires([501]),
//! ]).unwrap();
//!
//! assert!(catalog.is_loaded());
//! let write = catalog.get(PermissionId(502)).unwrap();
//! assert!(write.requires.contains(&PermissionId(501)));
//!
//! let grants = PermissionSet::from_ids([501, 502]);
//! assert_eq!(grants.len(), 2);
//! ```
//!
//! ## Lifecycle
//!
//! The catalog is populated once per process/session from an external store
//! and treated as read-mostly: `load` replaces the entire cache wholesale
//! and never partially merges, so readers always observe either the old or
//! the new complete snapshot. Loading is the caller's job; this crate
//! performs no network I/O.

pub mod catalog;
pub mod error;
pub mod permission;
pub mod set;
pub mod template;

// Re-export main types for convenience
pub use catalog::PermissionCatalog;
pub use error::{CatalogError, CatalogResult};
pub use permission::{Permission, PermissionId};
pub use set::PermissionSet;
pub use template::Template;
