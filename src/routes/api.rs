// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Planning routes backed by the LLM gateway.
//! The auth middleware is applied in routes/mod.rs for these routes.

use crate::error::Result;
use crate::middleware::AuthUser;
use crate::models::{PlanRequest, SuggestionRequest};
use crate::AppState;
use axum::{extract::State, routing::post, Extension, Json, Router};
use serde_json::Value;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/suggestions", post(suggest_destinations))
        .route("/api/plans", post(plan_holiday))
}

/// Destinations that fit the budget, starting from the user's location.
async fn suggest_destinations(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<SuggestionRequest>,
) -> Result<Json<Value>> {
    tracing::debug!(user_id = user.id(), "Suggestion request");
    Ok(Json(state.planner.suggest(&request).await?))
}

/// Day-by-day plan for a chosen destination.
async fn plan_holiday(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<Value>> {
    tracing::debug!(user_id = user.id(), "Plan request");
    Ok(Json(state.planner.plan(&request).await?))
}
