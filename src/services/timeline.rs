// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Day grouping, nap pairing and the rendered log.
//!
//! A [`Timeline`] is built once per snapshot. Rendering it only adds the
//! elapsed-time strings, so a live view can re-render every minute without
//! redoing the grouping.

use crate::models::view::{EntryView, RenderedLog, TimelineItem, EMPTY_PLACEHOLDER};
use crate::models::{ActivityKind, ActivityRecord};
use crate::services::elapsed::{format_elapsed, format_minutes};
use crate::time_utils::{format_clock_time, format_day_label, format_utc_rfc3339};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use std::collections::HashMap;

const UNKNOWN_TIME_LABEL: &str = "Unknown time";

/// Most recent occurrence of each reference kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatestReferences {
    pub eat: Option<DateTime<Utc>>,
    pub wake_up: Option<DateTime<Utc>>,
    pub sleep: Option<DateTime<Utc>>,
}

/// Scan newest-first records for the first Eat, Wake Up and Sleep with a
/// known time.
pub fn latest_references(records: &[ActivityRecord]) -> LatestReferences {
    let mut latest = LatestReferences::default();

    for record in records {
        let Some(at) = record.occurred_at else {
            continue;
        };
        let slot = match record.kind {
            ActivityKind::Eat => &mut latest.eat,
            ActivityKind::WakeUp => &mut latest.wake_up,
            ActivityKind::Sleep => &mut latest.sleep,
            ActivityKind::Unknown(_) => continue,
        };
        slot.get_or_insert(at);
    }

    latest
}

/// Positions (in display order) where a new local calendar day starts.
///
/// Records with an unknown time never start a day.
pub fn day_boundaries(records: &[ActivityRecord], tz: &FixedOffset) -> Vec<(usize, NaiveDate)> {
    let mut boundaries = Vec::new();
    let mut current: Option<NaiveDate> = None;

    for (index, record) in records.iter().enumerate() {
        let Some(at) = record.occurred_at else {
            continue;
        };
        let date = at.with_timezone(tz).date_naive();
        if current != Some(date) {
            boundaries.push((index, date));
            current = Some(date);
        }
    }

    boundaries
}

/// Nap length in minutes for every Sleep whose chronologically next record
/// is a Wake Up, keyed by the Sleep record's ID.
pub fn nap_durations(records: &[ActivityRecord]) -> HashMap<String, i64> {
    let mut chronological: Vec<(&ActivityRecord, DateTime<Utc>)> = records
        .iter()
        .filter_map(|r| r.occurred_at.map(|at| (r, at)))
        .collect();
    // Stable: equal times keep snapshot order.
    chronological.sort_by_key(|(_, at)| *at);

    let mut naps = HashMap::new();
    for pair in chronological.windows(2) {
        if let [(sleep, slept_at), (wake, woke_at)] = pair {
            if sleep.kind == ActivityKind::Sleep && wake.kind == ActivityKind::WakeUp {
                let millis = (*woke_at - *slept_at).num_milliseconds();
                let minutes = (millis as f64 / 60_000.0).round() as i64;
                naps.insert(sleep.id.clone(), minutes);
            }
        }
    }

    naps
}

/// Reorder store-order records newest-first by occurrence time.
///
/// A record with an unknown time stays directly after the record that
/// preceded it in store order; leading unknown records stay at the top.
/// Equal times keep store order.
pub fn display_order(records: &[ActivityRecord]) -> Vec<ActivityRecord> {
    let mut leading = Vec::new();
    let mut runs: Vec<(DateTime<Utc>, Vec<ActivityRecord>)> = Vec::new();

    for record in records {
        if let Some(at) = record.occurred_at {
            runs.push((at, vec![record.clone()]));
        } else if let Some((_, run)) = runs.last_mut() {
            run.push(record.clone());
        } else {
            leading.push(record.clone());
        }
    }

    runs.sort_by(|(a, _), (b, _)| b.cmp(a));

    leading
        .into_iter()
        .chain(runs.into_iter().flat_map(|(_, run)| run))
        .collect()
}

/// Grouped and paired view of one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    items: Vec<TimelineItem>,
    latest: LatestReferences,
    entries: usize,
}

impl Timeline {
    /// Build from records in store order.
    pub fn build(records: &[ActivityRecord], tz: &FixedOffset) -> Self {
        let records = display_order(records);
        let naps = nap_durations(&records);
        let boundaries: HashMap<usize, NaiveDate> =
            day_boundaries(&records, tz).into_iter().collect();

        let mut items = Vec::with_capacity(records.len() + boundaries.len());
        for (index, record) in records.iter().enumerate() {
            if let Some(date) = boundaries.get(&index) {
                items.push(TimelineItem::DayHeader {
                    date: date.format("%Y-%m-%d").to_string(),
                    label: format_day_label(*date),
                });
            }
            let nap_minutes = naps.get(&record.id).copied();
            items.push(TimelineItem::Entry(entry_view(record, nap_minutes, tz)));
        }

        Self {
            items,
            latest: latest_references(&records),
            entries: records.len(),
        }
    }

    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    pub fn latest(&self) -> LatestReferences {
        self.latest
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Attach elapsed-time strings computed for `now`.
    pub fn render(&self, now: DateTime<Utc>) -> RenderedLog {
        RenderedLog {
            items: self.items.clone(),
            placeholder: self.is_empty().then(|| EMPTY_PLACEHOLDER.to_string()),
            since_last_feed: format_elapsed(self.latest.eat, now),
            since_last_wake: format_elapsed(self.latest.wake_up, now),
            since_last_sleep: format_elapsed(self.latest.sleep, now),
            rendered_at: format_utc_rfc3339(now),
        }
    }
}

fn entry_view(record: &ActivityRecord, nap_minutes: Option<i64>, tz: &FixedOffset) -> EntryView {
    let time_label = match (record.occurred_at, record.fallback_label.as_deref()) {
        (Some(at), _) => format_clock_time(at, tz),
        (None, Some(fallback)) => fallback.to_string(),
        (None, None) => UNKNOWN_TIME_LABEL.to_string(),
    };

    EntryView {
        id: record.id.clone(),
        activity: record.kind.as_str().to_string(),
        label: record.kind.label().to_string(),
        icon: record.kind.icon().to_string(),
        occurred_at: record.occurred_at.map(format_utc_rfc3339),
        time_label,
        nap_minutes,
        nap_label: nap_minutes.map(format_minutes),
    }
}
