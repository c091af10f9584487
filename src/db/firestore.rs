// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Layout:
//! - `users/{urlencoded email}`: one document per account, so a create with
//!   the "must not exist" precondition doubles as the uniqueness check
//! - `trips/{id}`: saved trips, queried by `user_id`

use super::{
    collections, new_document_id, Storage, StorageBackend, StorageError, StorageResult,
};
use crate::models::{Trip, User};
use async_trait::async_trait;
use firestore::errors::FirestoreError;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str, database_id: &str) -> StorageResult<Self> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id, database_id).await;
        }

        let options = firestore::FirestoreDbOptions::new(project_id.to_string())
            .with_database_id(database_id.to_string());

        let client = firestore::FirestoreDb::with_options(options)
            .await
            .map_err(|e| {
                StorageError::Unavailable(format!("Failed to connect to Firestore: {}", e))
            })?;

        tracing::info!(project = project_id, database = database_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str, database_id: &str) -> StorageResult<Self> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string())
            .with_database_id(database_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            StorageError::Unavailable(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a disconnected client for testing.
    ///
    /// Every operation fails with [`StorageError::Unavailable`].
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> StorageResult<&firestore::FirestoreDb> {
        self.client.as_ref().ok_or_else(|| {
            StorageError::Unavailable("Database not connected (offline mode)".to_string())
        })
    }

    /// Round-trip a point read to prove the connection works.
    pub async fn ping(&self) -> StorageResult<()> {
        let _: Option<User> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one("__probe__")
            .await
            .map_err(backend_error)?;
        Ok(())
    }
}

/// Document id for a user: emails may contain characters Firestore rejects.
fn user_doc_id(email: &str) -> String {
    urlencoding::encode(email).into_owned()
}

fn backend_error(e: FirestoreError) -> StorageError {
    match e {
        FirestoreError::NetworkError(_) => StorageError::Unavailable(e.to_string()),
        other => StorageError::Backend(other.to_string()),
    }
}

#[async_trait]
impl Storage for FirestoreDb {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Firestore
    }

    // ─── User Operations ─────────────────────────────────────────

    async fn find_user_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(&user_doc_id(email))
            .await
            .map_err(backend_error)
    }

    async fn insert_user(&self, mut user: User) -> StorageResult<User> {
        user.id = new_document_id();

        // `insert` is a create: it fails if the document already exists.
        let result: Result<User, FirestoreError> = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::USERS)
            .document_id(user_doc_id(&user.email))
            .object(&user)
            .execute()
            .await;

        match result {
            Ok(_) => Ok(user),
            Err(FirestoreError::DataConflictError(_)) => {
                Err(StorageError::duplicate("User", user.email))
            }
            Err(e) => Err(backend_error(e)),
        }
    }

    // ─── Trip Operations ─────────────────────────────────────────

    async fn find_trip(&self, id: &str, owner: Option<&str>) -> StorageResult<Option<Trip>> {
        let trip: Option<Trip> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::TRIPS)
            .obj()
            .one(id)
            .await
            .map_err(backend_error)?;

        Ok(trip.filter(|t| owner.map_or(true, |o| t.is_owned_by(o))))
    }

    async fn find_trips_by_user(&self, owner: &str) -> StorageResult<Vec<Trip>> {
        let owner = owner.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::TRIPS)
            .filter(move |q| q.for_all([q.field("user_id").eq(owner.clone())]))
            .order_by([("created_at", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(backend_error)
    }

    async fn insert_trip(&self, mut trip: Trip) -> StorageResult<Trip> {
        trip.id = new_document_id();

        let _: Trip = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::TRIPS)
            .document_id(&trip.id)
            .object(&trip)
            .execute()
            .await
            .map_err(backend_error)?;

        Ok(trip)
    }

    async fn delete_trip(&self, id: &str, owner: &str) -> StorageResult<u64> {
        let client = self.get_client()?;

        // Ownership lives in the document, so check it before deleting.
        let existing: Option<Trip> = client
            .fluent()
            .select()
            .by_id_in(collections::TRIPS)
            .obj()
            .one(id)
            .await
            .map_err(backend_error)?;

        match existing {
            Some(trip) if trip.is_owned_by(owner) => {
                client
                    .fluent()
                    .delete()
                    .from(collections::TRIPS)
                    .document_id(id)
                    .execute()
                    .await
                    .map_err(backend_error)?;
                tracing::debug!(trip_id = id, "Deleted trip");
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}
