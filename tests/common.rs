// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, in-memory stores and sample tracker data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `fittrack`

use std::sync::{Arc, Once};

use chrono::NaiveDate;
use fittrack::models::{ActivityLevel, FitnessGoal, Gender, UserProfile};
use fittrack::storage::{InMemoryStore, TrackerStore};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls the level; tests stay quiet by default
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fixed calendar day in March 2025
pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
}

/// Empty in-memory store plus a handle to its raw backend
pub fn memory_store() -> (TrackerStore, InMemoryStore) {
    init_test_logging();
    let raw = InMemoryStore::new();
    (TrackerStore::new(Arc::new(raw.clone())), raw)
}

/// A valid profile: 30 year old male, 175 cm, 70 kg
pub fn sample_profile() -> UserProfile {
    UserProfile {
        name: "Alex".to_owned(),
        age: 30,
        gender: Gender::Male,
        height_cm: 175.0,
        current_weight_kg: 70.0,
        goal_weight_kg: Some(65.0),
        activity_level: ActivityLevel::Moderate,
        fitness_goal: FitnessGoal::Lose,
        join_date: day(1),
    }
}
