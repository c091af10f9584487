// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weather forecast route.
//!
//! Failures are reported as `{"error": ...}` with status 200, which is what
//! the frontend checks for.

use crate::services::weather::MAX_FORECAST_DAYS;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/weather/{city}", get(get_weather))
}

/// `days` is kept as text so a malformed value still gets the `{"error"}`
/// body instead of a query rejection.
#[derive(Deserialize)]
struct ForecastParams {
    #[serde(default)]
    days: Option<String>,
}

fn parse_days(raw: Option<&str>) -> Result<u32, String> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(MAX_FORECAST_DAYS),
        Some(s) => s
            .parse()
            .map_err(|_| format!("Invalid days value: {s:?}")),
    }
}

async fn get_weather(
    State(state): State<Arc<AppState>>,
    Path(city): Path<String>,
    Query(params): Query<ForecastParams>,
) -> Json<Value> {
    let days = match parse_days(params.days.as_deref()) {
        Ok(days) => days,
        Err(message) => return Json(json!({ "error": message })),
    };
    match state.weather.forecast(&city, days).await {
        Ok(forecast) => Json(forecast),
        Err(e) => {
            tracing::warn!(city = %city, error = %e, "Weather lookup failed");
            Json(json!({ "error": e.to_string() }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_days() {
        assert_eq!(parse_days(None), Ok(MAX_FORECAST_DAYS));
        assert_eq!(parse_days(Some("")), Ok(MAX_FORECAST_DAYS));
        assert_eq!(parse_days(Some(" 3 ")), Ok(3));
        assert!(parse_days(Some("abc")).is_err());
        assert!(parse_days(Some("-1")).is_err());
        assert!(parse_days(Some("99999999999")).is_err());
    }
}
