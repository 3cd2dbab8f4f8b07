// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Resolve stored documents into activity records.

use crate::models::{ActivityKind, ActivityRecord, StoredActivity};
use crate::time_utils::parse_activity_time;
use chrono::FixedOffset;

/// Resolve one stored document.
///
/// The activity time is the manually entered time if it parses, else the
/// creation time, else unknown. Never fails.
pub fn normalize(stored: &StoredActivity, tz: &FixedOffset) -> ActivityRecord {
    let manual = stored
        .activity_time
        .as_deref()
        .and_then(|raw| parse_activity_time(raw, tz));

    if manual.is_none() && stored.activity_time.is_some() {
        tracing::debug!(
            id = ?stored.id,
            activity_time = ?stored.activity_time,
            "Unparseable manual activity time, falling back to creation time"
        );
    }

    ActivityRecord {
        id: stored.id.clone().unwrap_or_default(),
        kind: ActivityKind::from(stored.activity_type.as_str()),
        occurred_at: manual.or(stored.created_at),
        recorded_at: stored.created_at,
        fallback_label: stored
            .timestamp
            .as_ref()
            .filter(|t| !t.trim().is_empty())
            .cloned(),
    }
}

/// Resolve a whole snapshot, keeping its order.
pub fn normalize_all(stored: &[StoredActivity], tz: &FixedOffset) -> Vec<ActivityRecord> {
    stored.iter().map(|s| normalize(s, tz)).collect()
}
