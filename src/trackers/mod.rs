// ABOUTME: Tracker operations behind each screen of the app
// ABOUTME: Profile, diet, hydration, workout and body-analysis trackers over TrackerStore
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Trackers
//!
//! Each tracker owns one area of the shared store and never reaches into
//! another's keys. Day-scoped trackers take `today` explicitly so a log from
//! an earlier day is recognised and reset.

/// Body-composition analyses
pub mod analysis;
/// Daily meal log and calorie progress
pub mod diet;
/// Daily water intake
pub mod hydration;
/// Profile and calculated targets
pub mod profile;
/// Workout history and aggregates
pub mod workout;

pub use analysis::AnalysisTracker;
pub use diet::{DietProgress, DietTracker};
pub use hydration::{HydrationProgress, HydrationTracker};
pub use profile::{ProfileSummary, ProfileTracker};
pub use workout::{WorkoutSummary, WorkoutTracker};

/// Share of a goal reached, as a whole percentage capped at 100
#[must_use]
pub fn percent_of(value: f64, goal: f64) -> u32 {
    if goal <= 0.0 || !value.is_finite() {
        return 0;
    }
    (value / goal * 100.0).round().clamp(0.0, 100.0) as u32
}
