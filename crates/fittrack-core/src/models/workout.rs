// ABOUTME: Workout history models for the workout tracker
// ABOUTME: ExerciseEntry with volume calculation and WorkoutSession records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ensure_non_negative, ensure_not_blank, Validate};
use crate::errors::{AppError, AppResult};

/// One exercise performed during a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseEntry {
    /// Exercise name
    pub name: String,
    /// Number of sets
    pub sets: u32,
    /// Repetitions per set
    pub reps: u32,
    /// Load per repetition in kilograms (0 for bodyweight)
    #[serde(rename = "weight", default)]
    pub weight_kg: f64,
}

impl ExerciseEntry {
    /// Training volume: sets x reps x load
    #[must_use]
    pub fn volume(&self) -> f64 {
        f64::from(self.sets) * f64::from(self.reps) * self.weight_kg
    }
}

impl Validate for ExerciseEntry {
    fn validate(&self) -> AppResult<()> {
        ensure_not_blank("exercise name", &self.name)?;
        if self.sets == 0 || self.reps == 0 {
            return Err(AppError::out_of_range(format!(
                "{}: sets and reps must be at least 1",
                self.name
            )));
        }
        ensure_non_negative("weight", self.weight_kg)
    }
}

/// A logged workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    /// Stable identifier used for deletion
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Day of the workout
    pub date: NaiveDate,
    /// Exercises performed
    pub exercises: Vec<ExerciseEntry>,
    /// Total volume (kg)
    pub volume: f64,
    /// Estimated energy burned (kcal)
    pub calories: f64,
    /// Session length in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

impl WorkoutSession {
    /// Build a session, deriving its volume from the exercises
    #[must_use]
    pub fn new(date: NaiveDate, exercises: Vec<ExerciseEntry>, calories: f64) -> Self {
        let volume = exercises.iter().map(ExerciseEntry::volume).sum();
        Self {
            id: Uuid::new_v4(),
            date,
            exercises,
            volume,
            calories,
            duration_minutes: None,
        }
    }

    /// Set the session duration
    #[must_use]
    pub const fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }
}

impl Validate for WorkoutSession {
    fn validate(&self) -> AppResult<()> {
        self.exercises.validate()?;
        ensure_non_negative("volume", self.volume)?;
        ensure_non_negative("calories", self.calories)
    }
}
