// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Saved trips, always scoped to the requesting user.

use crate::db::Storage;
use crate::error::AppError;
use crate::models::{DeleteTripResponse, SaveTripRequest, Trip};
use crate::time_utils::now_rfc3339;
use std::sync::Arc;
use validator::Validate;

#[derive(Clone)]
pub struct TripService {
    store: Arc<dyn Storage>,
}

impl TripService {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    pub async fn create(&self, owner: &str, request: SaveTripRequest) -> Result<Trip, AppError> {
        request.validate()?;

        let now = now_rfc3339();
        let trip = self
            .store
            .insert_trip(Trip {
                id: String::new(),
                user_id: owner.to_string(),
                trip_type: request.trip_type,
                location: request.location,
                destination: request.destination,
                budget: request.budget,
                people: request.people,
                days: request.days,
                group_type: request.group_type,
                data: request.data,
                created_at: now.clone(),
                updated_at: now,
            })
            .await?;

        tracing::info!(trip_id = %trip.id, user_id = owner, trip_type = %trip.trip_type, "Saved trip");
        Ok(trip)
    }

    /// Trips owned by `owner`, oldest first.
    pub async fn list(&self, owner: &str) -> Result<Vec<Trip>, AppError> {
        Ok(self.store.find_trips_by_user(owner).await?)
    }

    /// A trip owned by `owner`; someone else's trip is reported as missing.
    pub async fn get(&self, owner: &str, id: &str) -> Result<Trip, AppError> {
        self.store
            .find_trip(id, Some(owner))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Trip {} not found", id)))
    }

    pub async fn delete(&self, owner: &str, id: &str) -> Result<DeleteTripResponse, AppError> {
        match self.store.delete_trip(id, owner).await? {
            0 => Err(AppError::NotFound(format!("Trip {} not found", id))),
            _ => {
                tracing::info!(trip_id = id, user_id = owner, "Deleted trip");
                Ok(DeleteTripResponse {
                    success: true,
                    message: "Trip deleted successfully".to_string(),
                })
            }
        }
    }
}
