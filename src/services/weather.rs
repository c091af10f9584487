// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily weather forecasts (OpenWeather 5 day / 3 hour API).
//!
//! Without an API key a deterministic synthetic forecast of the same shape
//! is served so the frontend keeps working in development.

use crate::config::Config;
use crate::error::AppError;
use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde_json::{json, Value};
use std::collections::HashSet;

/// OpenWeather's free forecast covers five days.
pub const MAX_FORECAST_DAYS: u32 = 5;

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

const CONDITIONS: [(&str, &str); 4] = [
    ("clear sky", "01d"),
    ("few clouds", "02d"),
    ("scattered clouds", "03d"),
    ("light rain", "10d"),
];

#[derive(Clone)]
pub struct WeatherService {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl WeatherService {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_url: config.weather_api_url.trim_end_matches('/').to_string(),
            api_key: config.weather_api_key.clone(),
        })
    }

    /// Forecast for `city`, one entry per day, `days` clamped to 1..=5.
    pub async fn forecast(&self, city: &str, days: u32) -> Result<Value, AppError> {
        let days = days.clamp(1, MAX_FORECAST_DAYS);
        let city = city.trim();
        if city.is_empty() {
            return Err(AppError::BadRequest("City is required".to_string()));
        }

        let Some(api_key) = &self.api_key else {
            tracing::debug!(city, "No weather API key, serving synthetic forecast");
            return Ok(synthetic_forecast(city, days, Utc::now()));
        };

        let response = self
            .http
            .get(format!("{}/forecast", self.api_url))
            .query(&[("q", city), ("appid", api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Weather request failed: {}", e)))?;

        let status = response.status();
        let mut body: Value = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Weather JSON parse error: {}", e)))?;

        if !status.is_success() {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            return Err(AppError::Upstream(format!("Weather HTTP {}: {}", status, message)));
        }

        if let Some(list) = body.get_mut("list").and_then(Value::as_array_mut) {
            let daily = one_per_day(std::mem::take(list), days as usize);
            *list = daily;
        }
        Ok(body)
    }
}

/// Keep the first three-hourly entry of each calendar day (UTC), up to `days`.
fn one_per_day(entries: Vec<Value>, days: usize) -> Vec<Value> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| {
            let day = entry.get("dt").and_then(Value::as_i64).map(|dt| dt.div_euclid(86_400));
            match day {
                Some(day) => seen.insert(day),
                None => false,
            }
        })
        .take(days)
        .collect()
}

/// Plausible forecast derived from the city name, stable across calls on
/// the same day.
fn synthetic_forecast(city: &str, days: u32, now: DateTime<Utc>) -> Value {
    let seed = city
        .to_lowercase()
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)));
    let noon = now.date_naive().and_time(NaiveTime::MIN).and_utc() + Duration::hours(12);

    let list: Vec<Value> = (0..days)
        .map(|i| {
            let day = noon + Duration::days(i64::from(i));
            let base = 8.0 + f64::from(seed.wrapping_add(i * 7) % 20);
            let (description, icon) = CONDITIONS[(seed.wrapping_add(i) % 4) as usize];
            json!({
                "dt": day.timestamp(),
                "dt_txt": day.format("%Y-%m-%d %H:%M:%S").to_string(),
                "main": {
                    "temp": base,
                    "temp_min": base - 3.0,
                    "temp_max": base + 4.0,
                    "humidity": 40 + seed.wrapping_add(i * 11) % 50,
                },
                "weather": [{"description": description, "icon": icon}],
            })
        })
        .collect();

    json!({
        "city": {"name": city},
        "cnt": list.len(),
        "list": list,
        "synthetic": true,
    })
}
