// ABOUTME: Core data models for the FitTrack tracker
// ABOUTME: Typed profile, nutrition, workout, hydration and body-analysis records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Every value the tracker persists is one of the types in this module. They
//! serialize with the camelCase field names the tracker has always used, so
//! values written by older builds deserialize unchanged, and each implements
//! [`Validate`] so the storage layer can reject bad shapes at the boundary.

mod analysis;
mod hydration;
mod nutrition;
mod profile;
mod workout;

pub use analysis::BodyAnalysis;
pub use hydration::WaterLog;
pub use nutrition::{CalorieTargets, DailyMealLog, MealEntry, NutritionTotals};
pub use profile::{ActivityLevel, FitnessGoal, Gender, UserProfile};
pub use workout::{ExerciseEntry, WorkoutSession};

use crate::errors::{AppError, AppResult};

/// Boundary validation for stored and user-entered records
pub trait Validate {
    /// Check every invariant of the record
    ///
    /// # Errors
    ///
    /// Returns a validation-kind `AppError` describing the first violated rule
    fn validate(&self) -> AppResult<()>;
}

impl<T: Validate> Validate for [T] {
    fn validate(&self) -> AppResult<()> {
        self.iter().try_for_each(Validate::validate)
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> AppResult<()> {
        self.as_slice().validate()
    }
}

/// Reject NaN, infinities and negative numbers
pub(crate) fn ensure_non_negative(field: &str, value: f64) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::invalid_input(format!(
            "{field} must be a finite number"
        )));
    }
    if value < 0.0 {
        return Err(AppError::out_of_range(format!(
            "{field} must not be negative"
        )));
    }
    Ok(())
}

/// Reject values outside an inclusive range
pub(crate) fn ensure_in_range(field: &str, value: f64, min: f64, max: f64) -> AppResult<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(AppError::out_of_range(format!(
            "{field} must be between {min} and {max}"
        )));
    }
    Ok(())
}

/// Reject empty or whitespace-only strings
pub(crate) fn ensure_not_blank(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::missing_field(field));
    }
    Ok(())
}
