// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account routes: registration, password login and the current user.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Form, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::auth::TOKEN_COOKIE;
use crate::middleware::AuthUser;
use crate::models::{LoginForm, RegisterRequest, TokenResponse, UserResponse};
use crate::AppState;

/// Routes reachable without a token.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// Routes behind `require_auth` (applied in routes/mod.rs).
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/auth/me", get(me))
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let user = state.accounts.register(request).await?;
    Ok((StatusCode::CREATED, Json(user.to_response())))
}

/// OAuth2 password-flow login: form fields `username` (the email) and
/// `password`.
///
/// The token is returned in the body and also set as a strict same-site
/// session cookie for browser clients.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Json<TokenResponse>)> {
    let token = state.accounts.login(&form.username, &form.password).await?;

    let cookie = Cookie::build((TOKEN_COOKIE, token.access_token.clone()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict);

    Ok((jar.add(cookie), Json(token)))
}

async fn me(Extension(user): Extension<AuthUser>) -> Json<UserResponse> {
    Json(user.0)
}
