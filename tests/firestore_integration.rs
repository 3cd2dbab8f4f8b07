// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running and
//! FIRESTORE_EMULATOR_HOST to point at it. Each test writes to its own
//! collection so runs do not interfere.

use baby_tracker::db::{ActivityStore, FirestoreDb};
use baby_tracker::models::{ActivityKind, StoredActivity};
use chrono::{Duration as ChronoDuration, FixedOffset, TimeZone, Utc};
use std::time::Duration;

mod common;

/// Generate a unique collection name for test isolation.
fn unique_collection(prefix: &str) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

async fn test_store(prefix: &str) -> ActivityStore {
    let db = FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to emulator");
    ActivityStore::firestore(db, &unique_collection(prefix), Duration::from_millis(200))
}

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

#[tokio::test]
async fn test_insert_list_delete_round_trip() {
    require_emulator!();

    let store = test_store("round-trip").await;
    let now = Utc::now();

    let id = store
        .insert(&StoredActivity::new_entry(&ActivityKind::Eat, None, now, &utc()))
        .await
        .unwrap();

    let snapshot = store.fetch_snapshot().await.unwrap();
    assert_eq!(snapshot.len(), 1);
    let stored = &snapshot.activities[0];
    assert_eq!(stored.id.as_deref(), Some(id.as_str()));
    assert_eq!(stored.activity_type, "Eat");
    assert!(stored.timestamp.is_some());
    assert!(stored.created_at.is_some());
    assert_eq!(stored.activity_time, None);

    store.remove(&id).await.unwrap();
    assert!(store.fetch_snapshot().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_is_newest_first_by_creation() {
    require_emulator!();

    let store = test_store("ordering").await;
    let base = Utc.with_ymd_and_hms(2026, 10, 17, 8, 0, 0).unwrap();

    for (minutes, kind) in [
        (0, ActivityKind::WakeUp),
        (30, ActivityKind::Eat),
        (90, ActivityKind::Sleep),
    ] {
        let created = base + ChronoDuration::minutes(minutes);
        store
            .insert(&StoredActivity::new_entry(&kind, None, created, &utc()))
            .await
            .unwrap();
    }

    let types: Vec<String> = store
        .fetch_snapshot()
        .await
        .unwrap()
        .activities
        .into_iter()
        .map(|a| a.activity_type)
        .collect();

    assert_eq!(types, vec!["Sleep", "Eat", "Wake Up"]);
}

#[tokio::test]
async fn test_document_without_creation_time_is_listed_last() {
    require_emulator!();

    let store = test_store("undated").await;

    let undated = store
        .insert(&StoredActivity {
            activity_type: "Eat".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    store
        .insert(&StoredActivity::new_entry(
            &ActivityKind::Sleep,
            None,
            Utc::now(),
            &utc(),
        ))
        .await
        .unwrap();

    let snapshot = store.fetch_snapshot().await.unwrap();
    assert_eq!(snapshot.len(), 2);
    let last = &snapshot.activities[1];
    assert_eq!(last.id.as_deref(), Some(undated.as_str()));
    assert_eq!(last.created_at, None);

    store.remove(&undated).await.unwrap();
    assert_eq!(store.fetch_snapshot().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_manual_time_is_stored() {
    require_emulator!();

    let store = test_store("manual").await;
    let manual = Utc.with_ymd_and_hms(2026, 10, 17, 22, 0, 0).unwrap();

    store
        .insert(&StoredActivity::new_entry(
            &ActivityKind::Sleep,
            Some(manual),
            Utc::now(),
            &utc(),
        ))
        .await
        .unwrap();

    let snapshot = store.fetch_snapshot().await.unwrap();
    assert_eq!(
        snapshot.activities[0].activity_time.as_deref(),
        Some("2026-10-17T22:00:00Z")
    );
}

#[tokio::test]
async fn test_delete_missing_document_is_ok() {
    require_emulator!();

    let store = test_store("missing").await;
    store.remove("does-not-exist").await.unwrap();
}

#[tokio::test]
async fn test_subscription_sees_writes() {
    require_emulator!();

    let store = test_store("subscription").await;
    let mut sub = store.subscribe();
    assert!(sub.next().await.unwrap().unwrap().is_empty());

    store
        .insert(&StoredActivity::new_entry(
            &ActivityKind::Eat,
            None,
            Utc::now(),
            &utc(),
        ))
        .await
        .unwrap();

    let snapshot = tokio::time::timeout(Duration::from_secs(10), sub.next())
        .await
        .expect("no snapshot after write")
        .unwrap()
        .unwrap();
    assert_eq!(snapshot.len(), 1);
}
