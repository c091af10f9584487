// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Holiday Planner: trip suggestions and itineraries from an LLM
//!
//! This crate provides the backend API: password accounts with bearer
//! tokens, saved trips, weather forecasts, and prompts relayed to an
//! OpenAI-compatible inference endpoint.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::{Storage, StorageBackend};
use error::AppError;
use services::{
    AccountService, InferenceClient, PasswordService, PlannerService, TokenService, TripService,
    WeatherService,
};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub storage_backend: StorageBackend,
    pub accounts: AccountService,
    pub trips: TripService,
    pub planner: PlannerService,
    pub weather: WeatherService,
}

impl AppState {
    /// Wire every service to `store`.
    pub fn new(config: Config, store: Arc<dyn Storage>) -> Result<Self, AppError> {
        let passwords = PasswordService::new(config.bcrypt_cost)?;
        let ttl = chrono::Duration::try_minutes(config.access_token_ttl_minutes)
            .filter(|ttl| *ttl > chrono::Duration::zero())
            .ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "invalid access token lifetime: {} minutes",
                    config.access_token_ttl_minutes
                ))
            })?;
        let tokens = TokenService::new(&config.secret_key, ttl);

        Ok(Self {
            storage_backend: store.backend(),
            accounts: AccountService::new(store.clone(), passwords, tokens),
            trips: TripService::new(store),
            planner: PlannerService::new(InferenceClient::new(&config)?),
            weather: WeatherService::new(&config)?,
            config,
        })
    }
}
