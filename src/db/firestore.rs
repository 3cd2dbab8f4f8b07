// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed activity operations.

use crate::db::{sort_newest_first, StoreError};
use crate::models::StoredActivity;

const OFFLINE: &str = "Database not connected (offline mode)";

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, StoreError> {
        // The emulator accepts any token; skip credential discovery entirely.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| StoreError::Connect(e.to_string()))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, StoreError> {
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

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| StoreError::Connect(format!("emulator: {}", e)))?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create an offline client for testing.
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    fn get_client(&self) -> Option<&firestore::FirestoreDb> {
        self.client.as_ref()
    }

    // ─── Activity Operations ─────────────────────────────────────

    /// Insert an activity under a generated document ID and return the ID.
    pub async fn insert_activity(
        &self,
        collection: &str,
        activity: &StoredActivity,
    ) -> Result<String, StoreError> {
        let client = self
            .get_client()
            .ok_or_else(|| StoreError::Write(OFFLINE.to_string()))?;

        let inserted: StoredActivity = client
            .fluent()
            .insert()
            .into(collection)
            .generate_document_id()
            .object(activity)
            .execute()
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        inserted
            .id
            .ok_or_else(|| StoreError::Write("Firestore returned no document ID".to_string()))
    }

    /// Delete an activity by document ID. Deleting a missing document succeeds.
    pub async fn delete_activity(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let client = self.get_client().ok_or_else(|| StoreError::Delete {
            id: id.to_string(),
            reason: OFFLINE.to_string(),
        })?;

        client
            .fluent()
            .delete()
            .from(collection)
            .document_id(id)
            .execute()
            .await
            .map_err(|e| StoreError::Delete {
                id: id.to_string(),
                reason: e.to_string(),
            })
    }

    /// All activities, newest first by creation time.
    ///
    /// Ordering happens here rather than in the query: Firestore leaves out
    /// documents missing the `order_by` field. Those sort last. Documents that
    /// fail to deserialize are kept with only their ID so they can still be
    /// shown and deleted.
    pub async fn list_activities(&self, collection: &str) -> Result<Vec<StoredActivity>, StoreError> {
        let client = self
            .get_client()
            .ok_or_else(|| StoreError::Subscription(OFFLINE.to_string()))?;

        let documents = client
            .fluent()
            .select()
            .from(collection)
            .query()
            .await
            .map_err(|e| StoreError::Subscription(e.to_string()))?;

        let mut activities: Vec<StoredActivity> = documents
            .iter()
            .map(|doc| {
                let id = doc.name.rsplit('/').next().unwrap_or_default().to_string();
                match firestore::FirestoreDb::deserialize_doc_to::<StoredActivity>(doc) {
                    Ok(mut activity) => {
                        activity.id = Some(id);
                        activity
                    }
                    Err(e) => {
                        tracing::warn!(id = %id, error = %e, "Malformed activity document");
                        StoredActivity {
                            id: Some(id),
                            ..Default::default()
                        }
                    }
                }
            })
            .collect();

        sort_newest_first(&mut activities);
        Ok(activities)
    }
}
