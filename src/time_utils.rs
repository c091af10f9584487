// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 with milliseconds and a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time as stored on records. Millisecond precision keeps records
/// created in the same second in creation order.
pub fn now_rfc3339() -> String {
    format_utc_rfc3339(Utc::now())
}

/// Calendar date (`YYYY-MM-DD`) used as the trip start date in prompts.
pub fn format_ymd(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}
