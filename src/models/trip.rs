// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Saved trip model for storage and API.

use crate::models::planning::GroupType;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

/// A saved trip. Stored and returned with the same shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct Trip {
    /// Opaque identifier assigned by the storage backend
    #[serde(default)]
    pub id: String,
    /// Owning user id
    pub user_id: String,
    /// Client-supplied tag ("suggestion", "plan", "custom", ...)
    pub trip_type: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub people: Option<u32>,
    #[serde(default)]
    pub days: Option<u32>,
    #[serde(default)]
    pub group_type: Option<GroupType>,
    /// Planning/suggestion result or free-form trip fields
    #[cfg_attr(feature = "binding-generation", ts(type = "Record<string, unknown>"))]
    pub data: serde_json::Value,
    pub created_at: String,
    pub updated_at: String,
}

impl Trip {
    /// Whether `user_id` owns this trip.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

/// Body of `POST /api/trips/save`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveTripRequest {
    #[validate(length(min = 1, max = 50, message = "trip_type must be 1-50 characters"))]
    pub trip_type: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub people: Option<u32>,
    #[serde(default)]
    pub days: Option<u32>,
    #[serde(default)]
    pub group_type: Option<GroupType>,
    #[validate(custom(function = "json_object"))]
    pub data: serde_json::Value,
}

fn json_object(value: &serde_json::Value) -> Result<(), ValidationError> {
    if value.is_object() {
        Ok(())
    } else {
        Err(ValidationError::new("json_object").with_message("data must be a JSON object".into()))
    }
}

/// Result of deleting a trip.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct DeleteTripResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_save_request_requires_object_data() {
        let ok: SaveTripRequest = serde_json::from_value(json!({
            "trip_type": "plan",
            "destination": "Kyoto",
            "group_type": "solo",
            "data": {"itinerary": []}
        }))
        .unwrap();
        assert!(ok.validate().is_ok());
        assert_eq!(ok.group_type, Some(GroupType::Solo));

        let list = SaveTripRequest { data: json!([1, 2]), ..ok.clone() };
        assert!(list.validate().is_err());

        let untyped = SaveTripRequest { trip_type: String::new(), ..ok };
        assert!(untyped.validate().is_err());
    }
}
