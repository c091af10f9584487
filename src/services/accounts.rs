// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration, login and token resolution.

use crate::db::Storage;
use crate::error::AppError;
use crate::models::user::normalize_email;
use crate::models::{RegisterRequest, TokenResponse, User};
use crate::services::{PasswordService, TokenService};
use crate::time_utils::now_rfc3339;
use std::sync::Arc;
use validator::Validate;

/// Account operations over the configured store.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn Storage>,
    passwords: PasswordService,
    tokens: TokenService,
}

impl AccountService {
    pub fn new(store: Arc<dyn Storage>, passwords: PasswordService, tokens: TokenService) -> Self {
        Self {
            store,
            passwords,
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Create an account. The email is stored trimmed and lower-cased.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AppError> {
        let request = RegisterRequest {
            email: normalize_email(&request.email),
            name: request.name.trim().to_string(),
            ..request
        };
        request.validate()?;

        // Skip the hashing cost for the common case; the insert below is
        // what actually enforces uniqueness.
        if self.store.find_user_by_email(&request.email).await?.is_some() {
            return Err(AppError::BadRequest("Email already registered".to_string()));
        }

        let passwords = self.passwords.clone();
        let password = request.password;
        let hashed_password = tokio::task::spawn_blocking(move || passwords.hash(&password))
            .await
            .map_err(|e| AppError::Internal(anyhow::Error::new(e)))??;

        let now = now_rfc3339();
        let user = self
            .store
            .insert_user(User {
                id: String::new(),
                email: request.email,
                name: request.name,
                hashed_password,
                created_at: now.clone(),
                updated_at: now,
                is_active: true,
            })
            .await?;

        tracing::info!(user_id = %user.id, "Registered new user");
        Ok(user)
    }

    /// Exchange credentials for an access token.
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, AppError> {
        let email = normalize_email(username);
        let user = self.store.find_user_by_email(&email).await?;

        let passwords = self.passwords.clone();
        let password = password.to_string();
        let stored_hash = user.as_ref().map(|u| u.hashed_password.clone());
        let matched = tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => passwords.verify(&password, &hash),
            None => passwords.verify_dummy(&password),
        })
        .await
        .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;

        let user = match user {
            Some(user) if matched => user,
            _ => {
                tracing::info!("Rejected login attempt");
                return Err(AppError::InvalidCredentials);
            }
        };

        let access_token = self.tokens.issue(&user.email)?;
        tracing::debug!(user_id = %user.id, "Issued access token");
        Ok(TokenResponse::bearer(access_token))
    }

    /// Resolve a bearer token to an active user.
    pub async fn resolve_token(&self, token: &str) -> Result<User, AppError> {
        let email = self.tokens.validate(token)?;

        let user = self
            .store
            .find_user_by_email(&email)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if !user.is_active {
            return Err(AppError::InactiveUser);
        }
        Ok(user)
    }
}
