// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

fn default_active() -> bool {
    true
}

/// User record as persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Opaque identifier assigned by the storage backend
    #[serde(default)]
    pub id: String,
    /// Normalized email address (unique)
    pub email: String,
    /// Display name
    pub name: String,
    /// bcrypt hash, never returned to clients
    pub hashed_password: String,
    pub created_at: String,
    pub updated_at: String,
    /// Records written before the flag existed count as active
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl User {
    /// Public view of the user, without the password hash.
    pub fn to_response(&self) -> UserResponse {
        UserResponse {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
            is_active: self.is_active,
        }
    }
}

/// User as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
    pub is_active: bool,
}

/// Registration body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Form body of `POST /auth/login` (OAuth2 password flow field names).
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    /// The account email
    pub username: String,
    pub password: String,
}

/// Issued access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Normalize an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_active_flag_defaults_to_true() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "email": "a@example.com",
            "name": "A",
            "hashed_password": "$2b$04$xyz",
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        }))
        .unwrap();
        assert!(user.is_active);
    }

    #[test]
    fn test_response_omits_password_hash() {
        let user = User {
            id: "abc".to_string(),
            email: "a@example.com".to_string(),
            name: "A".to_string(),
            hashed_password: "secret-hash".to_string(),
            created_at: "2025-01-01T00:00:00Z".to_string(),
            updated_at: "2025-01-01T00:00:00Z".to_string(),
            is_active: true,
        };
        let json = serde_json::to_value(user.to_response()).unwrap();
        assert!(json.get("hashed_password").is_none());
        assert_eq!(json["email"], "a@example.com");
    }

    #[test]
    fn test_register_request_validation() {
        let ok = RegisterRequest {
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
            password: "password123".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad_email = RegisterRequest { email: "not-an-email".to_string(), ..ok.clone() };
        assert!(bad_email.validate().is_err());

        let short = RegisterRequest { password: "1234567".to_string(), ..ok };
        assert!(short.validate().is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
    }
}
