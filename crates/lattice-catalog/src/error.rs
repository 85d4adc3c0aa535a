//! Error types for catalog and graph-computation operations
//!
//! These errors are local and synchronous: each one aborts the specific
//! catalog or resolution call it arose in, before any state is mutated.
//! Recovery means fixing the input or reloading the catalog.

use thiserror::Error;

use crate::permission::PermissionId;

/// Catalog and graph-computation error types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A query was issued before `load()` completed successfully.
    ///
    /// Callers must treat this as "the data is not here yet", never as
    /// "all permissions are absent".
    #[error("Permission catalog has not been loaded")]
    NotLoaded,

    /// An ID has no catalog entry. This is a data-integrity error, not
    /// "permission absent".
    #[error("Unknown permission id: {0}")]
    UnknownPermission(PermissionId),

    /// Two entries in a load payload share the same ID.
    #[error("Duplicate permission id in catalog payload: {0}")]
    DuplicateId(PermissionId),

    /// A permission's `requires` set references an ID with no entry in the
    /// same payload.
    #[error("Permission {id} requires unknown permission {requires}")]
    UnknownDependency {
        /// The permission carrying the bad edge.
        id: PermissionId,
        /// The referenced ID that does not exist.
        requires: PermissionId,
    },

    /// The `requires` edges in a load payload form a cycle (a
    /// self-reference counts as a cycle of one). The IDs listed are the
    /// entries that could not be topologically ordered.
    #[error("Dependency cycle among permissions {0:?}")]
    DependencyCycle(Vec<PermissionId>),
}

/// Result type for catalog and resolution operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::NotLoaded => "CATALOG_NOT_LOADED",
            CatalogError::UnknownPermission(_) => "UNKNOWN_PERMISSION",
            CatalogError::DuplicateId(_) => "DUPLICATE_PERMISSION_ID",
            CatalogError::UnknownDependency { .. } => "UNKNOWN_DEPENDENCY",
            CatalogError::DependencyCycle(_) => "DEPENDENCY_CYCLE",
        }
    }

    /// Check whether this error indicates bad catalog data (as opposed to
    /// a query arriving before the catalog was populated).
    pub fn is_data_integrity(&self) -> bool {
        !matches!(self, CatalogError::NotLoaded)
    }
}
