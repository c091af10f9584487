// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod api;
pub mod auth;
pub mod debug;
pub mod trips;
pub mod weather;

use crate::middleware::auth::require_auth;
use crate::AppState;
use axum::http::{header, HeaderValue, Method};
use axum::{extract::State, middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
    pub storage: String,
}

#[derive(Serialize)]
struct WelcomeResponse {
    message: &'static str,
}

async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the Holiday Planner API",
    })
}

/// Health check response
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
        storage: state.storage_backend.as_str().to_string(),
    })
}

/// Origins allowed to make credentialed requests: the configured frontend
/// plus local development servers.
pub fn origin_allowed(frontend_url: &str, origin: &HeaderValue) -> bool {
    let origin = origin.to_str().unwrap_or("");
    origin == frontend_url.trim_end_matches('/') || is_local_dev_origin(origin)
}

/// `http://localhost` or `http://127.0.0.1`, with an optional numeric port and
/// nothing after it.
fn is_local_dev_origin(origin: &str) -> bool {
    let Some(authority) = origin.strip_prefix("http://") else {
        return false;
    };
    let (host, port) = match authority.split_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (authority, None),
    };
    let port_ok = port.is_none_or(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()));
    matches!(host, "localhost" | "127.0.0.1") && port_ok
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let frontend_url = state.config.frontend_url.clone();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _request_parts: &axum::http::request::Parts| {
                origin_allowed(&frontend_url, origin)
            },
        ))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    // Public routes (no auth required)
    let mut public_routes = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(weather::routes())
        .merge(auth::public_routes());

    if state.config.enable_debug_routes {
        public_routes = public_routes.merge(debug::routes());
    }

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .merge(auth::protected_routes())
        .merge(api::routes())
        .merge(trips::routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_allowed() {
        let frontend = "https://holidays.example.com/";
        let allowed = |o: &'static str| origin_allowed(frontend, &HeaderValue::from_static(o));

        assert!(allowed("https://holidays.example.com"));
        assert!(allowed("http://localhost:5173"));
        assert!(allowed("http://127.0.0.1:3000"));
        assert!(!allowed("https://evil.example.com"));
        assert!(!allowed("https://localhost.evil.com"));
    }

    #[test]
    fn test_local_dev_lookalikes_rejected() {
        let allowed = |o: &'static str| {
            origin_allowed("https://holidays.example.com", &HeaderValue::from_static(o))
        };

        assert!(allowed("http://localhost"));
        assert!(allowed("http://127.0.0.1"));
        assert!(!allowed("http://localhost.evil.com"));
        assert!(!allowed("http://localhost.evil.com:5173"));
        assert!(!allowed("http://127.0.0.1.nip.io"));
        assert!(!allowed("http://localhostevil.com"));
        assert!(!allowed("http://localhost:5173.evil.com"));
        assert!(!allowed("http://localhost:"));
        assert!(!allowed("http://localhost/path"));
        assert!(!allowed("http://localhost@evil.com"));
    }
}
