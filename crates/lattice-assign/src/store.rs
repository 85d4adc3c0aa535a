//! Principal grant persistence
//!
//! The engine treats grant persistence as an external write: one network
//! call per principal, full-set replacement (PUT semantics, never an
//! incremental patch). The [`PrincipalStore`] trait is the seam; the
//! in-memory implementation backs tests and single-process deployments.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use lattice_catalog::PermissionSet;

use crate::error::{StoreError, StoreResult};

/// External persistence for principals' grant sets.
///
/// Reads return the principal's whole [`PermissionSet`]; writes replace it
/// wholesale. Implementations are expected to make each call independent;
/// the bulk engine issues them concurrently with no ordering guarantee.
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    /// Read a principal's current grant set.
    async fn load_grants(&self, principal_id: &str) -> StoreResult<PermissionSet>;

    /// Replace a principal's entire grant set.
    async fn save_grants(&self, principal_id: &str, grants: &PermissionSet) -> StoreResult<()>;
}

/// In-memory principal store.
///
/// Suitable for single-process applications and testing.
#[derive(Debug, Default)]
pub struct MemoryPrincipalStore {
    grants: RwLock<HashMap<String, PermissionSet>>,
}

impl MemoryPrincipalStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a principal's grant set directly (test/setup convenience).
    pub async fn seed(&self, principal_id: impl Into<String>, grants: PermissionSet) {
        self.grants.write().await.insert(principal_id.into(), grants);
    }

    /// Number of principals with a stored grant set.
    pub async fn len(&self) -> usize {
        self.grants.read().await.len()
    }

    /// Check if no principal has a stored grant set.
    pub async fn is_empty(&self) -> bool {
        self.grants.read().await.is_empty()
    }
}

#[async_trait]
impl PrincipalStore for MemoryPrincipalStore {
    async fn load_grants(&self, principal_id: &str) -> StoreResult<PermissionSet> {
        self.grants
            .read()
            .await
            .get(principal_id)
            .cloned()
            .ok_or_else(|| StoreError::PrincipalNotFound(principal_id.to_string()))
    }

    async fn save_grants(&self, principal_id: &str, grants: &PermissionSet) -> StoreResult<()> {
        self.grants
            .write()
            .await
            .insert(principal_id.to_string(), grants.clone());
        Ok(())
    }
}
