// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer token authentication middleware.

use crate::error::AppError;
use crate::models::UserResponse;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Cookie carrying the access token for browser sessions.
pub const TOKEN_COOKIE: &str = "holiday_token";

/// Authenticated user, inserted as a request extension.
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserResponse);

impl AuthUser {
    pub fn id(&self) -> &str {
        &self.0.id
    }
}

/// Token from `Authorization: Bearer ...`, else from the session cookie.
fn extract_token(headers: &HeaderMap, jar: &CookieJar) -> Option<String> {
    let from_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| {
            h.strip_prefix("Bearer ")
                .or_else(|| h.strip_prefix("bearer "))
        })
        .map(str::trim)
        .filter(|t| !t.is_empty());

    match from_header {
        Some(token) => Some(token.to_string()),
        None => jar
            .get(TOKEN_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|t| !t.is_empty()),
    }
}

/// Middleware that requires a valid access token for an active user.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(request.headers(), &jar).ok_or(AppError::Unauthorized)?;

    let user = state.accounts.resolve_token(&token).await?;

    request.extensions_mut().insert(AuthUser(user.to_response()));
    Ok(next.run(request).await)
}
