// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod accounts;
pub mod llm;
pub mod password;
pub mod planner;
pub mod token;
pub mod trips;
pub mod weather;

pub use accounts::AccountService;
pub use llm::InferenceClient;
pub use password::PasswordService;
pub use planner::PlannerService;
pub use token::{Claims, TokenService};
pub use trips::TripService;
pub use weather::WeatherService;
