// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod planning;
pub mod trip;
pub mod user;

pub use planning::{GroupType, PlanRequest, SuggestionRequest};
pub use trip::{DeleteTripResponse, SaveTripRequest, Trip};
pub use user::{LoginForm, RegisterRequest, TokenResponse, User, UserResponse};
