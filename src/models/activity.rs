// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity models for storage and display.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened. Stored as a plain string so documents written by older
/// clients with other labels still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityKind {
    Eat,
    Sleep,
    WakeUp,
    /// Any other label, kept verbatim.
    Unknown(String),
}

impl ActivityKind {
    /// Stored form of the kind (`"Wake Up"` matches documents already in
    /// the collection).
    pub fn as_str(&self) -> &str {
        match self {
            ActivityKind::Eat => "Eat",
            ActivityKind::Sleep => "Sleep",
            ActivityKind::WakeUp => "Wake Up",
            ActivityKind::Unknown(other) => other,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &str {
        match self {
            ActivityKind::Unknown(other) if other.trim().is_empty() => "Activity",
            kind => kind.as_str(),
        }
    }

    /// Short icon token for the front end.
    pub fn icon(&self) -> &'static str {
        match self {
            ActivityKind::Eat => "🍼",
            ActivityKind::Sleep => "😴",
            ActivityKind::WakeUp => "☀️",
            ActivityKind::Unknown(_) => "📝",
        }
    }
}

impl From<&str> for ActivityKind {
    fn from(raw: &str) -> Self {
        let normalized: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "eat" => ActivityKind::Eat,
            "sleep" => ActivityKind::Sleep,
            "wakeup" => ActivityKind::WakeUp,
            _ => ActivityKind::Unknown(raw.to_string()),
        }
    }
}

impl From<String> for ActivityKind {
    fn from(raw: String) -> Self {
        ActivityKind::from(raw.as_str())
    }
}

impl From<ActivityKind> for String {
    fn from(kind: ActivityKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activity document as stored in Firestore.
///
/// Every field is optional on read: documents written by earlier versions of
/// the web client lack `activityTime`, and a hand-edited document may lack
/// anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredActivity {
    /// Document ID (filled in from Firestore metadata on read)
    #[serde(
        alias = "_firestore_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// Activity type ("Eat", "Sleep", "Wake Up", ...)
    #[serde(rename = "type", default)]
    pub activity_type: String,
    /// Human-readable local time of the entry. Display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Manually entered time of the activity (RFC3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_time: Option<String>,
    /// When the document was created
    #[serde(
        default,
        with = "firestore::serialize_as_optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl StoredActivity {
    /// Build a new document for insertion.
    ///
    /// `manual_time` is set when the user entered the time by hand; otherwise
    /// the activity happened at `now`.
    pub fn new_entry(
        kind: &ActivityKind,
        manual_time: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        tz: &FixedOffset,
    ) -> Self {
        let occurred = manual_time.unwrap_or(now);
        Self {
            id: None,
            activity_type: kind.as_str().to_string(),
            timestamp: Some(
                occurred
                    .with_timezone(tz)
                    .format("%-m/%-d/%Y, %-I:%M:%S %p")
                    .to_string(),
            ),
            activity_time: manual_time.map(crate::time_utils::format_utc_rfc3339),
            created_at: Some(now),
        }
    }
}

/// A stored activity after timestamp resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRecord {
    pub id: String,
    pub kind: ActivityKind,
    /// When the activity happened; `None` if no usable time was stored.
    pub occurred_at: Option<DateTime<Utc>>,
    /// When the record was created.
    pub recorded_at: Option<DateTime<Utc>>,
    /// Legacy display time, shown when `occurred_at` is unknown.
    pub fallback_label: Option<String>,
}
