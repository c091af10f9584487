// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Password hashing (bcrypt).
//!
//! bcrypt is deliberately slow; callers on the async runtime should run these
//! methods through `tokio::task::spawn_blocking`.

use crate::error::AppError;

/// Hashes and verifies passwords with a fixed work factor.
#[derive(Clone)]
pub struct PasswordService {
    cost: u32,
    /// Hash of a throwaway password, verified against when the account is
    /// unknown so that login takes the same path either way.
    dummy_hash: String,
}

impl PasswordService {
    /// Create a service with the given bcrypt cost (4..=31).
    pub fn new(cost: u32) -> Result<Self, AppError> {
        let dummy_hash = bcrypt::hash("holiday-planner-dummy-password", cost)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid bcrypt cost {}: {}", cost, e)))?;
        Ok(Self { cost, dummy_hash })
    }

    /// Salted hash of `password`. Two calls produce different strings.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))
    }

    /// Check `plain` against `hash`. Any failure, including a malformed
    /// hash, counts as a mismatch.
    pub fn verify(&self, plain: &str, hash: &str) -> bool {
        match bcrypt::verify(plain, hash) {
            Ok(matched) => matched,
            Err(e) => {
                tracing::error!(error = %e, "Password verification error");
                false
            }
        }
    }

    /// Burn the same work as [`verify`](Self::verify) for an unknown account.
    /// Always returns `false`.
    pub fn verify_dummy(&self, plain: &str) -> bool {
        let _ = bcrypt::verify(plain, &self.dummy_hash);
        false
    }
}
