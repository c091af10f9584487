// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Values are read once at startup (a `.env` file is honoured for local
//! development) and shared read-only through `AppState`.

use std::env;
use std::str::FromStr;

/// Default LLM endpoint (OpenAI-compatible chat completions router).
pub const DEFAULT_LLM_API_URL: &str = "https://router.huggingface.co/v1/chat/completions";

/// Default OpenWeather API base.
pub const DEFAULT_WEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5";

/// What the persistence layer does when the durable store fails at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Log the failure and serve the operation from the in-memory store.
    Degrade,
    /// Surface the failure to the caller.
    Fail,
}

impl FromStr for FallbackPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "degrade" | "memory" => Ok(Self::Degrade),
            "fail" | "strict" => Ok(Self::Fail),
            _ => Err(ConfigError::Invalid("STORAGE_FALLBACK", s.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Server ---
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Mount `/debug/*` smoke-test routes
    pub enable_debug_routes: bool,

    // --- Auth ---
    /// JWT signing key for access tokens (raw bytes)
    pub secret_key: Vec<u8>,
    /// Access token lifetime in minutes
    pub access_token_ttl_minutes: i64,
    /// bcrypt work factor
    pub bcrypt_cost: u32,

    // --- Storage ---
    /// GCP project hosting Firestore; `None` means memory-only storage
    pub gcp_project_id: Option<String>,
    /// Firestore database id
    pub firestore_database: String,
    /// Runtime failure policy for the durable store
    pub storage_fallback: FallbackPolicy,
    /// Upper bound on the startup connectivity probe
    pub db_probe_timeout_secs: u64,

    // --- LLM inference ---
    /// Chat completions endpoint
    pub llm_api_url: String,
    /// Bearer token for the inference endpoint
    pub hf_api_token: Option<String>,
    /// Model identifier sent with each request
    pub model_id: Option<String>,
    /// Request timeout for inference calls
    pub llm_timeout_secs: u64,

    // --- Weather ---
    /// OpenWeather API key; synthetic forecasts are served without one
    pub weather_api_key: Option<String>,
    /// OpenWeather API base URL
    pub weather_api_url: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8000,
            frontend_url: "http://localhost:5173".to_string(),
            enable_debug_routes: true,
            secret_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            access_token_ttl_minutes: 30,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            gcp_project_id: None,
            firestore_database: "(default)".to_string(),
            storage_fallback: FallbackPolicy::Degrade,
            db_probe_timeout_secs: 5,
            llm_api_url: DEFAULT_LLM_API_URL.to_string(),
            hf_api_token: None,
            model_id: None,
            llm_timeout_secs: 120,
            weather_api_key: None,
            weather_api_url: DEFAULT_WEATHER_API_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: parse_or("PORT", 8000)?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            enable_debug_routes: parse_or("ENABLE_DEBUG_ROUTES", true)?,

            secret_key: env::var("SECRET_KEY")
                .map(|v| v.trim().to_string())
                .ok()
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing("SECRET_KEY"))?
                .into_bytes(),
            access_token_ttl_minutes: in_range(
                "ACCESS_TOKEN_EXPIRE_MINUTES",
                parse_or("ACCESS_TOKEN_EXPIRE_MINUTES", 30)?,
                MAX_ACCESS_TOKEN_TTL_MINUTES,
            )?,
            bcrypt_cost: parse_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?,

            gcp_project_id: optional("GCP_PROJECT_ID"),
            firestore_database: env::var("FIRESTORE_DATABASE")
                .unwrap_or_else(|_| "(default)".to_string()),
            storage_fallback: parse_or("STORAGE_FALLBACK", FallbackPolicy::Degrade)?,
            db_probe_timeout_secs: parse_or("DB_PROBE_TIMEOUT_SECS", 5)?,

            llm_api_url: env::var("LLM_API_URL")
                .unwrap_or_else(|_| DEFAULT_LLM_API_URL.to_string()),
            hf_api_token: optional("HF_API_TOKEN"),
            model_id: optional("MODEL_ID"),
            llm_timeout_secs: parse_or("LLM_TIMEOUT_SECS", 120)?,

            weather_api_key: optional("WEATHER_API_KEY"),
            weather_api_url: env::var("WEATHER_API_URL")
                .unwrap_or_else(|_| DEFAULT_WEATHER_API_URL.to_string()),
        })
    }
}

/// Read a non-empty, trimmed variable.
fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a variable, falling back to `default` when unset.
fn parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match optional(name) {
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw.clone())),
        None => Ok(default),
    }
}

/// Longest accepted token lifetime: one year.
pub const MAX_ACCESS_TOKEN_TTL_MINUTES: i64 = 365 * 24 * 60;

/// Require `1..=max`.
fn in_range(name: &'static str, value: i64, max: i64) -> Result<i64, ConfigError> {
    if (1..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::Invalid(name, value.to_string()))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
