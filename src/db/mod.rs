// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistence layer.
//!
//! Every backend implements [`Storage`]. The process picks one at startup with
//! [`select_backend`] and hands it to the services as `Arc<dyn Storage>`.

pub mod fallback;
pub mod firestore;
pub mod memory;

pub use self::fallback::FallbackStore;
pub use self::firestore::FirestoreDb;
pub use self::memory::MemoryStore;

use crate::config::{Config, FallbackPolicy};
use crate::models::{Trip, User};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Collection names as constants.
pub mod collections {
    /// Keyed by URL-encoded email
    pub const USERS: &str = "users";
    /// Keyed by trip id
    pub const TRIPS: &str = "trips";
}

/// Errors from storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{entity} already exists: {id}")]
    Duplicate { entity: &'static str, id: String },

    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

impl StorageError {
    pub fn duplicate(entity: &'static str, id: impl Into<String>) -> Self {
        Self::Duplicate {
            entity,
            id: id.into(),
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Which implementation is serving requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Firestore,
    Memory,
    FirestoreWithFallback,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Firestore => "firestore",
            StorageBackend::Memory => "memory",
            StorageBackend::FirestoreWithFallback => "firestore+memory",
        }
    }
}

/// User and trip persistence.
#[async_trait]
pub trait Storage: Send + Sync {
    fn backend(&self) -> StorageBackend;

    /// Look up a user by normalized email.
    async fn find_user_by_email(&self, email: &str) -> StorageResult<Option<User>>;

    /// Insert a user if no user with the same email exists.
    ///
    /// Assigns `id` and returns the stored record. Fails with
    /// [`StorageError::Duplicate`] when the email is taken.
    async fn insert_user(&self, user: User) -> StorageResult<User>;

    /// Fetch a trip, restricted to `owner` when given.
    async fn find_trip(&self, id: &str, owner: Option<&str>) -> StorageResult<Option<Trip>>;

    /// All trips owned by `owner`.
    async fn find_trips_by_user(&self, owner: &str) -> StorageResult<Vec<Trip>>;

    /// Insert a trip, assigning `id`.
    async fn insert_trip(&self, trip: Trip) -> StorageResult<Trip>;

    /// Delete a trip owned by `owner`. Returns the number removed (0 or 1).
    async fn delete_trip(&self, id: &str, owner: &str) -> StorageResult<u64>;
}

/// Fresh backend-assigned identifier.
pub fn new_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Choose the storage backend for the lifetime of the process.
///
/// Uses Firestore when a project is configured and answers a probe within
/// the configured timeout; otherwise runs entirely in memory.
pub async fn select_backend(config: &Config) -> Arc<dyn Storage> {
    let Some(project_id) = config.gcp_project_id.as_deref() else {
        tracing::warn!("No GCP_PROJECT_ID configured, using in-memory storage");
        return Arc::new(MemoryStore::new());
    };

    let timeout = Duration::from_secs(config.db_probe_timeout_secs);
    let connected = tokio::time::timeout(timeout, async {
        let db = FirestoreDb::new(project_id, &config.firestore_database).await?;
        db.ping().await?;
        Ok::<_, StorageError>(db)
    })
    .await;

    let db = match connected {
        Ok(Ok(db)) => db,
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Failed to connect to Firestore");
            tracing::warn!("Using in-memory storage as fallback");
            return Arc::new(MemoryStore::new());
        }
        Err(_) => {
            tracing::error!(
                timeout_secs = config.db_probe_timeout_secs,
                "Firestore connectivity probe timed out"
            );
            tracing::warn!("Using in-memory storage as fallback");
            return Arc::new(MemoryStore::new());
        }
    };

    match config.storage_fallback {
        FallbackPolicy::Degrade => {
            tracing::info!("Firestore storage with in-memory fallback on runtime errors");
            Arc::new(FallbackStore::new(Arc::new(db), Arc::new(MemoryStore::new())))
        }
        FallbackPolicy::Fail => {
            tracing::info!("Firestore storage without fallback");
            Arc::new(db)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_select_backend_without_project_is_memory() {
        let config = Config::default();
        let store = select_backend(&config).await;
        assert_eq!(store.backend(), StorageBackend::Memory);
    }

    #[test]
    fn test_document_ids_are_unique() {
        let a = new_document_id();
        let b = new_document_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
    }
}
