// ABOUTME: Diet tracker for today's meals and progress toward the calorie goal
// ABOUTME: Resets the log when the stored day is not today
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::percent_of;
use crate::errors::{AppError, AppResult};
use crate::models::{DailyMealLog, MealEntry, NutritionTotals, Validate};
use crate::storage::TrackerStore;

/// Intake against the saved calorie targets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DietProgress {
    /// What has been eaten today
    pub totals: NutritionTotals,
    /// Daily calorie goal, when targets were saved
    pub goal_calories: Option<f64>,
    /// Protein goal (g), when targets were saved
    pub goal_protein: Option<f64>,
    /// Calories left (negative when over)
    pub remaining_calories: Option<f64>,
    /// Calorie goal reached, 0-100
    pub calorie_percent: Option<u32>,
}

/// Diet screen operations
#[derive(Clone)]
pub struct DietTracker {
    store: TrackerStore,
}

impl DietTracker {
    /// Create the tracker
    #[must_use]
    pub const fn new(store: TrackerStore) -> Self {
        Self { store }
    }

    /// Today's log; a log from another day reads as empty
    ///
    /// # Errors
    ///
    /// Returns an error if the stored log cannot be read
    pub async fn today(&self, today: NaiveDate) -> AppResult<DailyMealLog> {
        Ok(match self.store.load_meal_log(today).await? {
            Some(log) if log.date == today => log,
            Some(log) => {
                debug!(stored = %log.date, %today, "Meal log is from an earlier day; starting fresh");
                DailyMealLog::empty(today)
            }
            None => DailyMealLog::empty(today),
        })
    }

    /// Append a meal to today's log
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid entry, or a storage error
    pub async fn add_meal(&self, meal: MealEntry, today: NaiveDate) -> AppResult<DailyMealLog> {
        meal.validate()?;
        let mut log = self.today(today).await?;
        log.meals.push(meal);
        self.store.save_meal_log(&log).await?;
        Ok(log)
    }

    /// Remove the meal at `index` (0-based, in logging order)
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an index past the end
    pub async fn remove_meal(&self, index: usize, today: NaiveDate) -> AppResult<MealEntry> {
        let mut log = self.today(today).await?;
        if index >= log.meals.len() {
            return Err(AppError::not_found(format!("Meal #{}", index + 1)));
        }
        let removed = log.meals.remove(index);
        self.store.save_meal_log(&log).await?;
        Ok(removed)
    }

    /// Empty today's log
    ///
    /// # Errors
    ///
    /// Returns a storage error if the log cannot be written
    pub async fn clear(&self, today: NaiveDate) -> AppResult<()> {
        self.store.save_meal_log(&DailyMealLog::empty(today)).await
    }

    /// Today's intake against saved targets
    ///
    /// # Errors
    ///
    /// Returns an error if the log or targets cannot be read
    pub async fn progress(&self, today: NaiveDate) -> AppResult<DietProgress> {
        let totals = self.today(today).await?.totals();
        let targets = self.store.load_calorie_targets().await?;
        let goal_calories = targets.as_ref().map(|t| t.goal_calories);
        Ok(DietProgress {
            totals,
            goal_calories,
            goal_protein: targets.as_ref().map(|t| t.protein),
            remaining_calories: goal_calories.map(|goal| goal - totals.calories),
            calorie_percent: goal_calories.map(|goal| percent_of(totals.calories, goal)),
        })
    }
}
