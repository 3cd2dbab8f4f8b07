// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer: the activity event store.
//!
//! [`ActivityStore`] fronts either Firestore or an in-memory collection and
//! adds live subscriptions on top: a subscriber receives the complete,
//! newest-first result set whenever it changes.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::config::{Config, StoreBackend};
use crate::models::StoredActivity;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Collection names as constants.
pub mod collections {
    pub const ACTIVITIES: &str = "activities";
}

/// Buffered snapshots per subscription before the poller waits.
const SUBSCRIPTION_BUFFER: usize = 8;

/// Event store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to connect to Firestore: {0}")]
    Connect(String),

    #[error("Failed to write activity: {0}")]
    Write(String),

    #[error("Failed to delete activity {id}: {reason}")]
    Delete { id: String, reason: String },

    #[error("Failed to load activities: {0}")]
    Subscription(String),
}

impl StoreError {
    /// Stable error code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Connect(_) => "store_unavailable",
            StoreError::Write(_) => "write_failed",
            StoreError::Delete { .. } => "delete_failed",
            StoreError::Subscription(_) => "query_failed",
        }
    }
}

/// Complete current result set of the activity query, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub activities: Vec<StoredActivity>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }
}

/// Sort newest first by creation time; documents without one go last.
/// The sort is stable.
pub(crate) fn sort_newest_first(activities: &mut [StoredActivity]) {
    activities.sort_by(|a, b| match (a.created_at, b.created_at) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

#[derive(Clone)]
enum Backend {
    Firestore { db: FirestoreDb, collection: String },
    Memory(MemoryDb),
}

/// Activity event store.
///
/// Cheap to clone; clones share the backend and the change counter.
#[derive(Clone)]
pub struct ActivityStore {
    backend: Backend,
    /// Bumped after every successful write made through this process.
    revision: Arc<watch::Sender<u64>>,
    poll_interval: Duration,
}

impl ActivityStore {
    fn with_backend(backend: Backend, poll_interval: Duration) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            backend,
            revision: Arc::new(revision),
            poll_interval,
        }
    }

    /// Open the backend selected by the configuration.
    pub async fn connect(config: &Config) -> Result<Self, StoreError> {
        match config.store_backend {
            StoreBackend::Firestore => {
                let db = FirestoreDb::new(&config.gcp_project_id).await?;
                Ok(Self::firestore(
                    db,
                    &config.activities_collection,
                    config.snapshot_poll_interval,
                ))
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory activity store; data is lost on restart");
                Ok(Self::memory(config.snapshot_poll_interval))
            }
        }
    }

    pub fn firestore(db: FirestoreDb, collection: &str, poll_interval: Duration) -> Self {
        Self::with_backend(
            Backend::Firestore {
                db,
                collection: collection.to_string(),
            },
            poll_interval,
        )
    }

    pub fn memory(poll_interval: Duration) -> Self {
        Self::with_backend(Backend::Memory(MemoryDb::new()), poll_interval)
    }

    /// A store whose every operation fails, for exercising error paths.
    pub fn offline(poll_interval: Duration) -> Self {
        Self::firestore(
            FirestoreDb::new_mock(),
            collections::ACTIVITIES,
            poll_interval,
        )
    }

    fn bump_revision(&self) {
        self.revision.send_modify(|rev| *rev = rev.wrapping_add(1));
    }

    /// Insert a new activity; returns the store-assigned ID.
    pub async fn insert(&self, activity: &StoredActivity) -> Result<String, StoreError> {
        let id = match &self.backend {
            Backend::Firestore { db, collection } => db.insert_activity(collection, activity).await?,
            Backend::Memory(db) => db.insert_activity(activity).await,
        };
        self.bump_revision();
        Ok(id)
    }

    /// Remove an activity by ID.
    pub async fn remove(&self, id: &str) -> Result<(), StoreError> {
        match &self.backend {
            Backend::Firestore { db, collection } => db.delete_activity(collection, id).await?,
            Backend::Memory(db) => {
                if !db.delete_activity(id).await {
                    tracing::debug!(id, "Delete of missing activity ignored");
                }
            }
        }
        self.bump_revision();
        Ok(())
    }

    /// Run the activity query once.
    pub async fn fetch_snapshot(&self) -> Result<Snapshot, StoreError> {
        let activities = match &self.backend {
            Backend::Firestore { db, collection } => db.list_activities(collection).await?,
            Backend::Memory(db) => db.list_activities().await,
        };
        Ok(Snapshot { activities })
    }

    /// Subscribe to the activity query.
    ///
    /// The first item is the current result set. After that an item is
    /// delivered whenever the result set differs from the last one delivered,
    /// checked after every local write and on the poll interval. Query
    /// failures are delivered as errors and polling continues.
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::channel(SUBSCRIPTION_BUFFER);
        let store = self.clone();
        let mut revision = self.revision.subscribe();

        let task = tokio::spawn(async move {
            let mut poll = tokio::time::interval(store.poll_interval);
            poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last: Option<Snapshot> = None;

            loop {
                tokio::select! {
                    _ = poll.tick() => {}
                    changed = revision.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }

                let update = match store.fetch_snapshot().await {
                    Ok(snapshot) if last.as_ref() == Some(&snapshot) => continue,
                    Ok(snapshot) => {
                        last = Some(snapshot.clone());
                        Ok(snapshot)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Activity subscription query failed");
                        last = None;
                        Err(e)
                    }
                };

                if tx.send(update).await.is_err() {
                    break;
                }
            }

            tracing::debug!("Activity subscription closed");
        });

        Subscription { rx, task }
    }
}

/// Live activity query. Dropping it stops the underlying poller.
pub struct Subscription {
    rx: mpsc::Receiver<Result<Snapshot, StoreError>>,
    task: JoinHandle<()>,
}

impl Subscription {
    /// Wait for the next snapshot or error.
    pub async fn next(&mut self) -> Option<Result<Snapshot, StoreError>> {
        self.rx.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}
