// ABOUTME: Integration tests for tracker persistence
// ABOUTME: File store round trips, versioned envelopes, legacy-key migration and corrupt data handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
// Test files don't require documentation - this is a rustc lint (not clippy)
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use fittrack::constants::storage_keys as keys;
use fittrack::errors::{ErrorCode, ErrorKind};
use fittrack::models::{DailyMealLog, MealEntry, WaterLog};
use fittrack::storage::{or_missing, FileStore, KeyValueStore, TrackerStore};
use fittrack::trackers::DietTracker;
use serde_json::{json, Value};
use tempfile::TempDir;

// ============================================================================
// File store
// ============================================================================

#[tokio::test]
async fn test_file_store_persists_across_instances() {
    common::init_test_logging();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fittrack.json");

    let first = TrackerStore::new(Arc::new(FileStore::new(&path)));
    first.save_profile(&common::sample_profile()).await.unwrap();

    let second = TrackerStore::new(Arc::new(FileStore::new(&path)));
    let loaded = second.load_profile().await.unwrap().unwrap();
    assert_eq!(loaded, common::sample_profile());

    let on_disk: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk[keys::USER_PROFILE]["version"], json!(1));
    assert_eq!(on_disk[keys::USER_PROFILE]["data"]["name"], json!("Alex"));
}

#[tokio::test]
async fn test_missing_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("nested").join("fittrack.json"));
    assert!(store.keys().await.unwrap().is_empty());
    assert!(store.get(keys::WORKOUT_HISTORY).await.unwrap().is_none());
    assert!(!store.remove(keys::WORKOUT_HISTORY).await.unwrap());

    store.set("b", json!(2)).await.unwrap();
    store.set("a", json!(1)).await.unwrap();
    assert_eq!(store.keys().await.unwrap(), vec!["a", "b"]);
}

#[tokio::test]
async fn test_corrupt_file_is_storage_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fittrack.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = FileStore::new(&path);
    let err = store.get(keys::USER_PROFILE).await.unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Storage | ErrorKind::Parse));
}

// ============================================================================
// Envelopes and migration
// ============================================================================

#[tokio::test]
async fn test_legacy_profile_key_is_migrated() {
    let (store, raw) = common::memory_store();
    let bare = serde_json::to_value(common::sample_profile()).unwrap();
    raw.set(keys::LEGACY_PROFILE, bare).await.unwrap();

    let loaded = store.load_profile().await.unwrap().unwrap();
    assert_eq!(loaded.name, "Alex");

    assert!(raw.get(keys::LEGACY_PROFILE).await.unwrap().is_none());
    let migrated = raw.get(keys::USER_PROFILE).await.unwrap().unwrap();
    assert_eq!(migrated["version"], json!(1));
}

#[tokio::test]
async fn test_canonical_key_wins_over_legacy() {
    let (store, raw) = common::memory_store();
    let mut legacy = common::sample_profile();
    legacy.name = "Old".to_owned();
    let legacy = serde_json::to_value(&legacy).unwrap();

    store.save_profile(&common::sample_profile()).await.unwrap();
    raw.set(keys::LEGACY_PROFILE, legacy.clone()).await.unwrap();
    assert_eq!(store.load_profile().await.unwrap().unwrap().name, "Alex");

    // Saving the canonical key retires the legacy synonym
    store.save_profile(&common::sample_profile()).await.unwrap();
    assert!(raw.get(keys::LEGACY_PROFILE).await.unwrap().is_none());
}

#[tokio::test]
async fn test_bare_canonical_value_is_rewrapped() {
    let (store, raw) = common::memory_store();
    let log = DailyMealLog {
        date: common::day(5),
        meals: vec![MealEntry::new("Toast", 200.0, 6.0)],
    };
    raw.set(keys::TODAY_LOG, serde_json::to_value(&log).unwrap())
        .await
        .unwrap();

    assert_eq!(store.load_meal_log(common::day(5)).await.unwrap().unwrap(), log);
    let stored = raw.get(keys::TODAY_LOG).await.unwrap().unwrap();
    assert_eq!(stored["version"], json!(1));
}

#[tokio::test]
async fn test_bare_meal_array_is_adopted_as_todays_log() {
    let (store, raw) = common::memory_store();
    raw.set(
        keys::TODAY_LOG,
        json!([{"name": "Oats", "calories": 300, "protein": 10}]),
    )
    .await
    .unwrap();

    let meals = DietTracker::new(store.clone());
    let log = meals.today(common::day(5)).await.unwrap();
    assert_eq!(log.date, common::day(5));
    assert_eq!(log.meals, vec![MealEntry::new("Oats", 300.0, 10.0)]);

    let stored = raw.get(keys::TODAY_LOG).await.unwrap().unwrap();
    assert_eq!(stored["version"], json!(1));
    assert_eq!(stored["data"]["date"], json!("2025-03-05"));
}

#[tokio::test]
async fn test_legacy_daily_meals_array_is_migrated_on_add() {
    let (store, raw) = common::memory_store();
    raw.set(
        keys::LEGACY_DAILY_MEALS,
        json!([{"name": "Toast", "calories": 200, "protein": 6}]),
    )
    .await
    .unwrap();

    let meals = DietTracker::new(store);
    let log = meals
        .add_meal(MealEntry::new("Apple", 95.0, 0.5), common::day(5))
        .await
        .unwrap();
    assert_eq!(log.meals.len(), 2);
    assert_eq!(log.meals[0].name, "Toast");
    assert!(raw.get(keys::LEGACY_DAILY_MEALS).await.unwrap().is_none());

    let progress = meals.progress(common::day(5)).await.unwrap();
    assert!((progress.totals.calories - 295.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_newer_envelope_version_is_rejected() {
    let (store, raw) = common::memory_store();
    raw.set(
        keys::WORKOUT_HISTORY,
        json!({"version": 99, "data": []}),
    )
    .await
    .unwrap();

    let err = store.load_workout_history().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::UnsupportedSchemaVersion);
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[tokio::test]
async fn test_legacy_water_pair_is_folded() {
    let (store, raw) = common::memory_store();
    raw.set(keys::WATER_INTAKE, json!(5)).await.unwrap();
    raw.set(keys::LEGACY_WATER_DATE, json!("2025-03-05T09:30:00.000Z"))
        .await
        .unwrap();

    let log = store.load_water().await.unwrap().unwrap();
    assert_eq!(
        log,
        WaterLog {
            glasses: 5,
            date: common::day(5)
        }
    );
    assert!(raw.get(keys::LEGACY_WATER_DATE).await.unwrap().is_none());
}

#[tokio::test]
async fn test_legacy_water_without_date_is_discarded() {
    let (store, raw) = common::memory_store();
    raw.set(keys::WATER_INTAKE, json!("4")).await.unwrap();

    assert!(store.load_water().await.unwrap().is_none());
    assert!(raw.keys().await.unwrap().is_empty());
}

// ============================================================================
// Validation at the boundary
// ============================================================================

#[tokio::test]
async fn test_invalid_values_are_not_saved() {
    let (store, raw) = common::memory_store();
    let mut profile = common::sample_profile();
    profile.age = 4;

    let err = store.save_profile(&profile).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(raw.keys().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_stored_value_degrades_to_missing() {
    let (store, raw) = common::memory_store();
    raw.set(keys::SAVED_ANALYSES, json!({"version": 1, "data": "oops"}))
        .await
        .unwrap();

    let result = store.load_analyses().await;
    assert_eq!(result.as_ref().unwrap_err().kind(), ErrorKind::Parse);
    assert!(or_missing(keys::SAVED_ANALYSES, result).is_none());
}

#[tokio::test]
async fn test_clear_all_removes_canonical_and_legacy_keys() {
    let (store, raw) = common::memory_store();
    store.save_profile(&common::sample_profile()).await.unwrap();
    raw.set(keys::LEGACY_DAILY_MEALS, json!([])).await.unwrap();
    raw.set("unrelated", json!(true)).await.unwrap();

    store.clear_all().await.unwrap();
    assert_eq!(raw.keys().await.unwrap(), vec!["unrelated"]);
}
