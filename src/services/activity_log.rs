// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity log service.
//!
//! Handles the write path and one-shot rendering:
//! 1. Log an activity (now, or at a manually entered time)
//! 2. Delete an activity by ID
//! 3. Render the current log
//! 4. Start live views
//!
//! Writes go straight to the store. Rendering always re-derives from a
//! snapshot, so a failed write simply never shows up.

use crate::config::Config;
use crate::db::{ActivityStore, StoreError};
use crate::models::{ActivityKind, RenderedLog, StoredActivity};
use crate::services::live_view::{LiveView, ViewSettings};
use crate::services::normalizer::normalize_all;
use crate::services::timeline::Timeline;
use chrono::{DateTime, FixedOffset, Utc};

/// Log, delete and render activities.
#[derive(Clone)]
pub struct ActivityLogService {
    store: ActivityStore,
    settings: ViewSettings,
}

impl ActivityLogService {
    pub fn new(store: ActivityStore, config: &Config) -> Self {
        Self {
            store,
            settings: ViewSettings {
                display_offset: config.display_offset,
                refresh_interval: config.elapsed_refresh_interval,
            },
        }
    }

    pub fn display_offset(&self) -> &FixedOffset {
        &self.settings.display_offset
    }

    /// Record an activity; returns the new document ID.
    pub async fn log_activity(
        &self,
        kind: ActivityKind,
        manual_time: Option<DateTime<Utc>>,
    ) -> Result<String, StoreError> {
        let activity =
            StoredActivity::new_entry(&kind, manual_time, Utc::now(), &self.settings.display_offset);

        match self.store.insert(&activity).await {
            Ok(id) => {
                tracing::info!(
                    id = %id,
                    kind = %kind,
                    manual = manual_time.is_some(),
                    "Activity logged"
                );
                Ok(id)
            }
            Err(e) => {
                tracing::error!(kind = %kind, error = %e, "Error adding activity");
                Err(e)
            }
        }
    }

    /// Delete an activity by ID.
    pub async fn delete_activity(&self, id: &str) -> Result<(), StoreError> {
        match self.store.remove(id).await {
            Ok(()) => {
                tracing::info!(id, "Activity deleted");
                Ok(())
            }
            Err(e) => {
                tracing::error!(id, error = %e, "Error deleting activity");
                Err(e)
            }
        }
    }

    /// Render the log from a fresh snapshot.
    pub async fn render_now(&self) -> Result<RenderedLog, StoreError> {
        let snapshot = self.store.fetch_snapshot().await?;
        let records = normalize_all(&snapshot.activities, &self.settings.display_offset);
        Ok(Timeline::build(&records, &self.settings.display_offset).render(Utc::now()))
    }

    /// Start a live view over the store.
    pub fn live_view(&self) -> LiveView {
        LiveView::start(&self.store, self.settings)
    }
}
