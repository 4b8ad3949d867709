// ABOUTME: Integration tests for the profile, diet, hydration, workout and analysis trackers
// ABOUTME: Day rollover, aggregate summaries, not-found paths and target recalculation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
// Test files don't require documentation - this is a rustc lint (not clippy)
#![allow(missing_docs)]

mod common;

use fittrack::errors::{ErrorCode, ErrorKind};
use fittrack::models::{BodyAnalysis, ExerciseEntry, MealEntry, WorkoutSession};
use fittrack::trackers::{
    AnalysisTracker, DietTracker, HydrationTracker, ProfileTracker, WorkoutTracker,
};
use uuid::Uuid;

fn squat(sets: u32, reps: u32, weight_kg: f64) -> ExerciseEntry {
    ExerciseEntry {
        name: "Squat".to_owned(),
        sets,
        reps,
        weight_kg,
    }
}

// ============================================================================
// Diet
// ============================================================================

#[tokio::test]
async fn test_meal_totals_and_progress() {
    common::init_test_logging();
    let (store, _) = common::memory_store();
    let profiles = ProfileTracker::new(store.clone());
    profiles.save(&common::sample_profile()).await.unwrap();
    profiles.recalculate_targets().await.unwrap();

    let diet = DietTracker::new(store);
    diet.add_meal(MealEntry::new("Eggs", 150.0, 12.0), common::day(5))
        .await
        .unwrap();
    let log = diet
        .add_meal(MealEntry::new("Rice bowl", 650.0, 25.0), common::day(5))
        .await
        .unwrap();
    assert_eq!(log.meals.len(), 2);

    let progress = diet.progress(common::day(5)).await.unwrap();
    assert!((progress.totals.calories - 800.0).abs() < 1e-9);
    assert!((progress.totals.protein - 37.0).abs() < 1e-9);
    assert_eq!(progress.goal_calories, Some(2056.0));
    assert_eq!(progress.remaining_calories, Some(1256.0));
    assert_eq!(progress.calorie_percent, Some(39));
}

#[tokio::test]
async fn test_meal_log_resets_on_a_new_day() {
    let (store, _) = common::memory_store();
    let diet = DietTracker::new(store);
    diet.add_meal(MealEntry::new("Toast", 200.0, 6.0), common::day(5))
        .await
        .unwrap();

    let tomorrow = diet.today(common::day(6)).await.unwrap();
    assert!(tomorrow.meals.is_empty());
    assert_eq!(tomorrow.date, common::day(6));

    let progress = diet.progress(common::day(6)).await.unwrap();
    assert_eq!(progress.goal_calories, None);
    assert!(progress.totals.calories.abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_remove_meal_out_of_range_is_not_found() {
    let (store, _) = common::memory_store();
    let diet = DietTracker::new(store);
    diet.add_meal(MealEntry::new("Apple", 95.0, 0.5), common::day(5))
        .await
        .unwrap();

    let err = diet.remove_meal(3, common::day(5)).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let removed = diet.remove_meal(0, common::day(5)).await.unwrap();
    assert_eq!(removed.name, "Apple");
    assert!(diet.today(common::day(5)).await.unwrap().meals.is_empty());
}

#[tokio::test]
async fn test_negative_meal_is_rejected() {
    let (store, _) = common::memory_store();
    let diet = DietTracker::new(store);
    let err = diet
        .add_meal(MealEntry::new("Mystery", -10.0, 0.0), common::day(5))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

// ============================================================================
// Hydration
// ============================================================================

#[tokio::test]
async fn test_water_count_resets_on_a_new_day() {
    let (store, _) = common::memory_store();
    let water = HydrationTracker::new(store);
    for _ in 0..3 {
        water.add_glass(common::day(5)).await.unwrap();
    }
    assert_eq!(water.today(common::day(5)).await.unwrap().glasses, 3);
    assert_eq!(water.today(common::day(6)).await.unwrap().glasses, 0);

    let log = water.add_glass(common::day(6)).await.unwrap();
    assert_eq!(log.glasses, 1);
    assert_eq!(log.date, common::day(6));
}

#[tokio::test]
async fn test_remove_glass_saturates_at_zero() {
    let (store, _) = common::memory_store();
    let water = HydrationTracker::new(store);
    let log = water.remove_glass(common::day(5)).await.unwrap();
    assert_eq!(log.glasses, 0);
}

#[tokio::test]
async fn test_hydration_progress_with_custom_goal() {
    let (store, _) = common::memory_store();
    let water = HydrationTracker::with_goal(store, 10);
    water.set(5, common::day(5)).await.unwrap();

    let progress = water.progress(common::day(5)).await.unwrap();
    assert_eq!(progress.goal, 10);
    assert_eq!(progress.millilitres, 1250);
    assert_eq!(progress.percent, 50);
    assert!(!progress.goal_met());

    assert!(water.set(500, common::day(5)).await.is_err());
}

// ============================================================================
// Workouts
// ============================================================================

#[tokio::test]
async fn test_workout_volume_and_summary() {
    let (store, _) = common::memory_store();
    let workouts = WorkoutTracker::new(store);

    let old = WorkoutSession::new(common::day(1), vec![squat(3, 10, 60.0)], 300.0);
    let recent = WorkoutSession::new(
        common::day(10),
        vec![squat(5, 5, 100.0), squat(2, 10, 0.0)],
        400.0,
    )
    .with_duration(45);
    workouts.log(old).await.unwrap();
    let recent = workouts.log(recent).await.unwrap();
    assert!((recent.volume - 2500.0).abs() < 1e-9);

    let summary = workouts.summary(common::day(12)).await.unwrap();
    assert_eq!(summary.total_workouts, 2);
    assert!((summary.total_volume - 4300.0).abs() < 1e-9);
    assert!((summary.average_calories - 350.0).abs() < 1e-9);
    assert_eq!(summary.sessions_last_7_days, 1);
    assert_eq!(summary.last_workout, Some(common::day(10)));

    let newest = workouts.recent(1).await.unwrap();
    assert_eq!(newest[0].id, recent.id);
}

#[tokio::test]
async fn test_remove_unknown_workout_is_not_found() {
    let (store, _) = common::memory_store();
    let workouts = WorkoutTracker::new(store);
    let err = workouts.remove(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let zero_sets = WorkoutSession::new(common::day(1), vec![squat(0, 10, 20.0)], 100.0);
    assert_eq!(
        workouts.log(zero_sets).await.unwrap_err().kind(),
        ErrorKind::Validation
    );
}

#[tokio::test]
async fn test_empty_history_summary() {
    let (store, _) = common::memory_store();
    let summary = WorkoutTracker::new(store)
        .summary(common::day(5))
        .await
        .unwrap();
    assert_eq!(summary.total_workouts, 0);
    assert!(summary.average_calories.abs() < f64::EPSILON);
    assert_eq!(summary.last_workout, None);
}

// ============================================================================
// Body analyses
// ============================================================================

#[tokio::test]
async fn test_analysis_add_get_delete() {
    let (store, _) = common::memory_store();
    let analyses = AnalysisTracker::new(store);
    let saved = analyses
        .add(BodyAnalysis::new(
            "Front pose",
            vec!["core".to_owned()],
            common::day(5),
            b"\x89PNG fake",
        ))
        .await
        .unwrap();

    let fetched = analyses.get(saved.id).await.unwrap();
    assert_eq!(fetched.image_bytes().unwrap(), b"\x89PNG fake");

    analyses.delete(saved.id).await.unwrap();
    let err = analyses.get(saved.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    assert!(analyses.list().await.unwrap().is_empty());
}

// ============================================================================
// Profile
// ============================================================================

#[tokio::test]
async fn test_profile_targets_and_summary() {
    let (store, _) = common::memory_store();
    let profiles = ProfileTracker::new(store);

    let err = profiles.recalculate_targets().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    profiles.save(&common::sample_profile()).await.unwrap();
    let targets = profiles.recalculate_targets().await.unwrap();
    assert_eq!(profiles.targets().await.unwrap(), Some(targets));

    let summary = profiles.summary().await.unwrap();
    assert!((summary.bmi - 22.9).abs() < 1e-9);
    assert_eq!(summary.weight_to_goal_kg, Some(5.0));

    let updated = profiles.update_weight(68.0).await.unwrap();
    assert!((updated.current_weight_kg - 68.0).abs() < f64::EPSILON);
    assert!(profiles.update_weight(-1.0).await.is_err());
}
