// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Holiday Planner API Server
//!
//! Serves accounts, saved trips, weather and LLM-generated travel plans.

use holiday_planner::{config::Config, db, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Holiday Planner API");

    // Pick durable or in-memory storage for the lifetime of the process
    let store = db::select_backend(&config).await;
    tracing::info!(backend = store.backend().as_str(), "Storage ready");

    if config.model_id.is_none() {
        tracing::warn!("MODEL_ID not set, relying on the endpoint's default model");
    }

    // Build shared state
    let state = Arc::new(AppState::new(config.clone(), store)?);

    // Build router
    let app = holiday_planner::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("holiday_planner=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
