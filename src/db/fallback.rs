// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Durable store with an in-memory safety net.
//!
//! Writes go to the primary store; if it errors, the write is logged and
//! served from memory instead of failing the request. Reads consult memory
//! whenever the primary misses or errors, so records written during an
//! outage stay visible once the primary recovers. Records written to memory
//! are never copied back to the primary and are lost on restart.

use super::{MemoryStore, Storage, StorageBackend, StorageError, StorageResult};
use crate::models::{Trip, User};
use async_trait::async_trait;
use std::sync::Arc;

pub struct FallbackStore {
    primary: Arc<dyn Storage>,
    memory: Arc<MemoryStore>,
}

impl FallbackStore {
    pub fn new(primary: Arc<dyn Storage>, memory: Arc<MemoryStore>) -> Self {
        Self { primary, memory }
    }

    fn degraded(&self, operation: &'static str, err: &StorageError) {
        tracing::warn!(
            operation,
            primary = self.primary.backend().as_str(),
            error = %err,
            "Primary store failed, serving from in-memory fallback"
        );
    }
}

#[async_trait]
impl Storage for FallbackStore {
    fn backend(&self) -> StorageBackend {
        StorageBackend::FirestoreWithFallback
    }

    async fn find_user_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        match self.primary.find_user_by_email(email).await {
            Ok(Some(user)) => Ok(Some(user)),
            Ok(None) => self.memory.find_user_by_email(email).await,
            Err(e) => {
                self.degraded("find_user_by_email", &e);
                self.memory.find_user_by_email(email).await
            }
        }
    }

    async fn insert_user(&self, user: User) -> StorageResult<User> {
        // An account created during an outage still owns its email.
        if self.memory.find_user_by_email(&user.email).await?.is_some() {
            return Err(StorageError::duplicate("User", user.email));
        }

        match self.primary.insert_user(user.clone()).await {
            Ok(stored) => Ok(stored),
            Err(e @ StorageError::Duplicate { .. }) => Err(e),
            Err(e) => {
                self.degraded("insert_user", &e);
                self.memory.insert_user(user).await
            }
        }
    }

    async fn find_trip(&self, id: &str, owner: Option<&str>) -> StorageResult<Option<Trip>> {
        match self.primary.find_trip(id, owner).await {
            Ok(Some(trip)) => Ok(Some(trip)),
            Ok(None) => self.memory.find_trip(id, owner).await,
            Err(e) => {
                self.degraded("find_trip", &e);
                self.memory.find_trip(id, owner).await
            }
        }
    }

    async fn find_trips_by_user(&self, owner: &str) -> StorageResult<Vec<Trip>> {
        let fallback = self.memory.find_trips_by_user(owner).await?;
        match self.primary.find_trips_by_user(owner).await {
            Ok(mut trips) => {
                trips.extend(fallback);
                trips.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
                Ok(trips)
            }
            Err(e) => {
                self.degraded("find_trips_by_user", &e);
                Ok(fallback)
            }
        }
    }

    async fn insert_trip(&self, trip: Trip) -> StorageResult<Trip> {
        match self.primary.insert_trip(trip.clone()).await {
            Ok(stored) => Ok(stored),
            Err(e) => {
                self.degraded("insert_trip", &e);
                self.memory.insert_trip(trip).await
            }
        }
    }

    async fn delete_trip(&self, id: &str, owner: &str) -> StorageResult<u64> {
        match self.primary.delete_trip(id, owner).await {
            Ok(0) => self.memory.delete_trip(id, owner).await,
            Ok(n) => Ok(n),
            Err(e) => {
                self.degraded("delete_trip", &e);
                self.memory.delete_trip(id, owner).await
            }
        }
    }
}
