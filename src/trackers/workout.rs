// ABOUTME: Workout tracker logging sessions and summarising the history
// ABOUTME: Totals, averages and recent-activity counts used by the coach and report
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{Validate, WorkoutSession};
use crate::storage::TrackerStore;

/// Days counted as "recent" activity
const RECENT_WINDOW_DAYS: i64 = 7;

/// Aggregates over the workout history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutSummary {
    /// Number of logged sessions
    pub total_workouts: usize,
    /// Sum of session volumes (kg)
    pub total_volume: f64,
    /// Sum of calories burned (kcal)
    pub total_calories: f64,
    /// Mean calories per session (kcal), 0 with no sessions
    pub average_calories: f64,
    /// Sessions within the last seven days, today included
    pub sessions_last_7_days: usize,
    /// Date of the most recent session
    pub last_workout: Option<NaiveDate>,
}

impl WorkoutSummary {
    /// Reduce a history into its aggregates
    #[must_use]
    pub fn summarize(history: &[WorkoutSession], today: NaiveDate) -> Self {
        let window_start = today - Duration::days(RECENT_WINDOW_DAYS - 1);
        let total_volume = history.iter().map(|s| s.volume).sum();
        let total_calories: f64 = history.iter().map(|s| s.calories).sum();
        let average_calories = if history.is_empty() {
            0.0
        } else {
            (total_calories / history.len() as f64).round()
        };
        Self {
            total_workouts: history.len(),
            total_volume,
            total_calories,
            average_calories,
            sessions_last_7_days: history
                .iter()
                .filter(|s| s.date >= window_start && s.date <= today)
                .count(),
            last_workout: history.iter().map(|s| s.date).max(),
        }
    }
}

/// Workout screen operations
#[derive(Clone)]
pub struct WorkoutTracker {
    store: TrackerStore,
}

impl WorkoutTracker {
    /// Create the tracker
    #[must_use]
    pub const fn new(store: TrackerStore) -> Self {
        Self { store }
    }

    /// Full history in logging order
    ///
    /// # Errors
    ///
    /// Returns an error if the stored history cannot be read
    pub async fn history(&self) -> AppResult<Vec<WorkoutSession>> {
        self.store.load_workout_history().await
    }

    /// The `limit` most recent sessions, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the stored history cannot be read
    pub async fn recent(&self, limit: usize) -> AppResult<Vec<WorkoutSession>> {
        let mut history = self.history().await?;
        history.sort_by(|a, b| b.date.cmp(&a.date));
        history.truncate(limit);
        Ok(history)
    }

    /// Append a session
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid session, or a storage error
    pub async fn log(&self, session: WorkoutSession) -> AppResult<WorkoutSession> {
        session.validate()?;
        let mut history = self.history().await?;
        history.push(session.clone());
        self.store.save_workout_history(&history).await?;
        info!(
            id = %session.id,
            exercises = session.exercises.len(),
            volume = session.volume,
            "Workout logged"
        );
        Ok(session)
    }

    /// Delete a session by id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no session has that id
    pub async fn remove(&self, id: Uuid) -> AppResult<WorkoutSession> {
        let mut history = self.history().await?;
        let index = history
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| AppError::not_found(format!("Workout {id}")))?;
        let removed = history.remove(index);
        self.store.save_workout_history(&history).await?;
        Ok(removed)
    }

    /// Aggregates over the stored history
    ///
    /// # Errors
    ///
    /// Returns an error if the stored history cannot be read
    pub async fn summary(&self, today: NaiveDate) -> AppResult<WorkoutSummary> {
        Ok(WorkoutSummary::summarize(&self.history().await?, today))
    }
}
