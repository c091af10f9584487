// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trip planning request parameters.

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Who is travelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub enum GroupType {
    Friends,
    Couple,
    Family,
    Solo,
}

impl GroupType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupType::Friends => "friends",
            GroupType::Couple => "couple",
            GroupType::Family => "family",
            GroupType::Solo => "solo",
        }
    }
}

impl fmt::Display for GroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination suggestions starting from where the travellers are.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SuggestionRequest {
    #[validate(length(min = 1, max = 200, message = "location must be 1-200 characters"))]
    pub location: String,
    #[validate(range(exclusive_min = 0.0, message = "budget must be positive"))]
    pub budget: f64,
    #[validate(range(min = 1, max = 100, message = "people must be between 1 and 100"))]
    pub people: u32,
    #[validate(range(min = 1, max = 60, message = "days must be between 1 and 60"))]
    pub days: u32,
    pub group_type: GroupType,
}

/// Day-by-day plan for a chosen destination.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PlanRequest {
    #[validate(length(min = 1, max = 200, message = "destination must be 1-200 characters"))]
    pub destination: String,
    #[validate(range(exclusive_min = 0.0, message = "budget must be positive"))]
    pub budget: f64,
    #[validate(range(min = 1, max = 100, message = "people must be between 1 and 100"))]
    pub people: u32,
    #[validate(range(min = 1, max = 60, message = "days must be between 1 and 60"))]
    pub days: u32,
    pub group_type: GroupType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_type_wire_format() {
        let parsed: GroupType = serde_json::from_str("\"family\"").unwrap();
        assert_eq!(parsed, GroupType::Family);
        assert_eq!(serde_json::to_string(&GroupType::Solo).unwrap(), "\"solo\"");
        assert!(serde_json::from_str::<GroupType>("\"coworkers\"").is_err());
    }

    #[test]
    fn test_suggestion_request_validation() {
        let ok = SuggestionRequest {
            location: "Lisbon".to_string(),
            budget: 1500.0,
            people: 2,
            days: 4,
            group_type: GroupType::Couple,
        };
        assert!(ok.validate().is_ok());

        let zero_budget = SuggestionRequest { budget: 0.0, ..ok.clone() };
        assert!(zero_budget.validate().is_err());

        let blank = SuggestionRequest { location: String::new(), ..ok.clone() };
        assert!(blank.validate().is_err());

        let no_days = SuggestionRequest { days: 0, ..ok };
        assert!(no_days.validate().is_err());
    }
}
