// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Saved trip routes.

use crate::error::Result;
use crate::middleware::AuthUser;
use crate::models::{DeleteTripResponse, SaveTripRequest, Trip};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/trips", get(list_trips))
        .route("/api/trips/save", post(save_trip))
        .route("/api/trips/{id}", get(get_trip).delete(delete_trip))
}

async fn list_trips(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Trip>>> {
    Ok(Json(state.trips.list(user.id()).await?))
}

async fn save_trip(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<SaveTripRequest>,
) -> Result<(StatusCode, Json<Trip>)> {
    let trip = state.trips.create(user.id(), request).await?;
    Ok((StatusCode::CREATED, Json(trip)))
}

async fn get_trip(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Trip>> {
    Ok(Json(state.trips.get(user.id(), &id).await?))
}

async fn delete_trip(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<DeleteTripResponse>> {
    Ok(Json(state.trips.delete(user.id(), &id).await?))
}
