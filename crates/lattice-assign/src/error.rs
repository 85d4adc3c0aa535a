//! Error types for grant persistence and bulk assignment
//!
//! Persistence errors are always attached to a single principal and are
//! caught per-principal during bulk work: they end up as failed outcomes
//! in the [`BulkReport`](crate::report::BulkReport) rather than aborting
//! siblings. Catalog errors, by contrast, mean the operation's own input
//! is bad and fail the whole call before any persistence is issued.

use thiserror::Error;

use lattice_catalog::CatalogError;

/// Principal store error types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport-level failure reaching the store.
    #[error("Network error: {0}")]
    Network(String),

    /// The store has no record of the principal.
    #[error("Principal not found: {0}")]
    PrincipalNotFound(String),

    /// The store accepted the request but failed to serve it.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type for principal store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::Network(_) => "NETWORK_ERROR",
            StoreError::PrincipalNotFound(_) => "PRINCIPAL_NOT_FOUND",
            StoreError::Backend(_) => "BACKEND_ERROR",
        }
    }
}

/// Assignment engine error types.
///
/// Only raised for whole-call failures; per-principal persistence
/// failures surface inside the bulk report instead.
#[derive(Debug, Error)]
pub enum AssignError {
    /// The catalog rejected the operation's input (unknown permission ID,
    /// catalog not loaded).
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A store failure outside the per-principal fan-out.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for assignment engine operations.
pub type AssignResult<T> = Result<T, AssignError>;

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_catalog::PermissionId;

    #[test]
    fn test_store_error_codes() {
        assert_eq!(
            StoreError::Network("timeout".into()).error_code(),
            "NETWORK_ERROR"
        );
        assert_eq!(
            StoreError::PrincipalNotFound("user-1".into()).error_code(),
            "PRINCIPAL_NOT_FOUND"
        );
    }

    #[test]
    fn test_catalog_error_converts() {
        let err: AssignError = CatalogError::UnknownPermission(PermissionId(9)).into();
        assert!(matches!(
            err,
            AssignError::Catalog(CatalogError::UnknownPermission(_))
        ));
        assert_eq!(err.to_string(), "Unknown permission id: 9");
    }
}
