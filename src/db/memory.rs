// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process storage.
//!
//! Serves as the whole persistence layer when no database is reachable and
//! as the fallback target for [`super::FallbackStore`]. Contents are lost on
//! restart.

use super::{new_document_id, Storage, StorageBackend, StorageError, StorageResult};
use crate::models::{Trip, User};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Concurrent in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Keyed by normalized email
    users: DashMap<String, User>,
    /// Keyed by trip id
    trips: DashMap<String, Trip>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored trips (all owners).
    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }
}

#[async_trait]
impl Storage for MemoryStore {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Memory
    }

    async fn find_user_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        Ok(self.users.get(email).map(|u| u.value().clone()))
    }

    async fn insert_user(&self, mut user: User) -> StorageResult<User> {
        match self.users.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(StorageError::duplicate("User", user.email)),
            Entry::Vacant(slot) => {
                user.id = new_document_id();
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }

    async fn find_trip(&self, id: &str, owner: Option<&str>) -> StorageResult<Option<Trip>> {
        Ok(self
            .trips
            .get(id)
            .filter(|t| owner.map_or(true, |o| t.is_owned_by(o)))
            .map(|t| t.value().clone()))
    }

    async fn find_trips_by_user(&self, owner: &str) -> StorageResult<Vec<Trip>> {
        let mut trips: Vec<Trip> = self
            .trips
            .iter()
            .filter(|t| t.is_owned_by(owner))
            .map(|t| t.value().clone())
            .collect();
        trips.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(trips)
    }

    async fn insert_trip(&self, mut trip: Trip) -> StorageResult<Trip> {
        trip.id = new_document_id();
        self.trips.insert(trip.id.clone(), trip.clone());
        Ok(trip)
    }

    async fn delete_trip(&self, id: &str, owner: &str) -> StorageResult<u64> {
        let removed = self.trips.remove_if(id, |_, t| t.is_owned_by(owner));
        Ok(u64::from(removed.is_some()))
    }
}
