// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Presentation model for the activity log.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Shown instead of the list when there is nothing logged.
pub const EMPTY_PLACEHOLDER: &str = "No activities logged yet.";

/// Shown instead of the list when the store query fails.
pub const ERROR_PLACEHOLDER: &str = "Error loading logs. Check Firestore rules.";

/// One row of the log, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(tag = "item", rename_all = "snake_case")]
pub enum TimelineItem {
    /// Starts a new calendar day.
    DayHeader {
        /// Local date, `YYYY-MM-DD`
        date: String,
        /// Long form, e.g. "Sunday, October 18, 2026"
        label: String,
    },
    Entry(EntryView),
}

/// A single activity ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EntryView {
    /// Document ID (for delete)
    pub id: String,
    /// Stored activity type
    pub activity: String,
    pub label: String,
    pub icon: String,
    /// When it happened (RFC3339), if known
    pub occurred_at: Option<String>,
    /// Local wall-clock time, or a fallback when unknown
    pub time_label: String,
    /// Nap length, on Sleep entries followed by a Wake Up
    pub nap_minutes: Option<i64>,
    pub nap_label: Option<String>,
}

/// The rendered log at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RenderedLog {
    pub items: Vec<TimelineItem>,
    /// Set when there are no entries
    pub placeholder: Option<String>,
    /// Time since the most recent Eat
    pub since_last_feed: String,
    /// Time since the most recent Wake Up
    pub since_last_wake: String,
    /// Time since the most recent Sleep
    pub since_last_sleep: String,
    /// Instant the elapsed strings were computed for (RFC3339)
    pub rendered_at: String,
}

/// State of a live view, as pushed to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewFrame {
    Unsubscribed,
    Loading,
    Rendered(RenderedLog),
    Error { message: String },
}

impl ViewFrame {
    /// Error frame with the standard placeholder text.
    pub fn load_error() -> Self {
        ViewFrame::Error {
            message: ERROR_PLACEHOLDER.to_string(),
        }
    }

    /// Event name used on the SSE stream.
    pub fn state_name(&self) -> &'static str {
        match self {
            ViewFrame::Unsubscribed => "unsubscribed",
            ViewFrame::Loading => "loading",
            ViewFrame::Rendered(_) => "rendered",
            ViewFrame::Error { .. } => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_json_shape() {
        let json = serde_json::to_value(ViewFrame::load_error()).unwrap();
        assert_eq!(json["state"], "error");
        assert_eq!(json["message"], ERROR_PLACEHOLDER);

        let header = TimelineItem::DayHeader {
            date: "2026-10-18".to_string(),
            label: "Sunday, October 18, 2026".to_string(),
        };
        let json = serde_json::to_value(header).unwrap();
        assert_eq!(json["item"], "day_header");
        assert_eq!(json["date"], "2026-10-18");
    }
}
