// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Deployment smoke-test routes, mounted when `ENABLE_DEBUG_ROUTES` is set.

use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/debug/ping", get(ping))
        .route("/debug/echo", post(echo))
}

async fn ping() -> Json<Value> {
    Json(json!({ "message": "pong", "time": now_rfc3339() }))
}

/// Return the JSON body unchanged.
async fn echo(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "received": body }))
}
