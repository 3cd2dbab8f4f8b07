// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Process-local activity store for development and tests.

use crate::db::sort_newest_first;
use crate::models::StoredActivity;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory stand-in for the Firestore collection.
#[derive(Clone, Default)]
pub struct MemoryDb {
    activities: Arc<RwLock<Vec<StoredActivity>>>,
    next_id: Arc<AtomicU64>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a copy of `activity` under a fresh ID.
    pub async fn insert_activity(&self, activity: &StoredActivity) -> String {
        let id = format!("mem-{:08}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let mut stored = activity.clone();
        stored.id = Some(id.clone());
        self.activities.write().await.push(stored);
        id
    }

    /// Returns whether a document was removed.
    pub async fn delete_activity(&self, id: &str) -> bool {
        let mut activities = self.activities.write().await;
        let before = activities.len();
        activities.retain(|a| a.id.as_deref() != Some(id));
        activities.len() != before
    }

    /// All activities, newest first by creation time. Documents without a
    /// creation time sort last.
    pub async fn list_activities(&self) -> Vec<StoredActivity> {
        let mut activities = self.activities.read().await.clone();
        // Later insertions first among equal timestamps
        activities.reverse();
        sort_newest_first(&mut activities);
        activities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn doc(kind: &str, hour: u32) -> StoredActivity {
        StoredActivity {
            activity_type: kind.to_string(),
            created_at: Some(Utc.with_ymd_and_hms(2026, 10, 18, hour, 0, 0).unwrap()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let db = MemoryDb::new();
        db.insert_activity(&doc("Sleep", 1)).await;
        db.insert_activity(&doc("Eat", 3)).await;
        db.insert_activity(&StoredActivity::default()).await;
        db.insert_activity(&doc("Wake Up", 2)).await;

        let kinds: Vec<String> = db
            .list_activities()
            .await
            .into_iter()
            .map(|a| a.activity_type)
            .collect();

        assert_eq!(kinds, vec!["Eat", "Wake Up", "Sleep", ""]);
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let db = MemoryDb::new();
        let a = db.insert_activity(&doc("Eat", 1)).await;
        let b = db.insert_activity(&doc("Eat", 1)).await;
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_delete_reports_presence() {
        let db = MemoryDb::new();
        let id = db.insert_activity(&doc("Eat", 1)).await;
        assert!(db.delete_activity(&id).await);
        assert!(!db.delete_activity(&id).await);
        assert!(db.list_activities().await.is_empty());
    }
}
