// ABOUTME: Hydration tracker counting glasses of water per day
// ABOUTME: Count resets on a new day; progress is reported against a daily goal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::Serialize;

use super::percent_of;
use crate::constants::hydration::{DEFAULT_DAILY_GOAL_GLASSES, ML_PER_GLASS};
use crate::errors::AppResult;
use crate::models::{Validate, WaterLog};
use crate::storage::TrackerStore;

/// Today's water intake against the goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HydrationProgress {
    /// Glasses drunk today
    pub glasses: u32,
    /// Daily goal in glasses
    pub goal: u32,
    /// Volume drunk today
    pub millilitres: u32,
    /// Goal reached, 0-100
    pub percent: u32,
}

impl HydrationProgress {
    /// Whether the goal has been met
    #[must_use]
    pub const fn goal_met(&self) -> bool {
        self.glasses >= self.goal
    }
}

/// Water screen operations
#[derive(Clone)]
pub struct HydrationTracker {
    store: TrackerStore,
    goal_glasses: u32,
}

impl HydrationTracker {
    /// Tracker with the default goal of 8 glasses
    #[must_use]
    pub const fn new(store: TrackerStore) -> Self {
        Self::with_goal(store, DEFAULT_DAILY_GOAL_GLASSES)
    }

    /// Tracker with a custom goal
    #[must_use]
    pub const fn with_goal(store: TrackerStore, goal_glasses: u32) -> Self {
        Self {
            store,
            goal_glasses,
        }
    }

    /// Today's log; a count from another day reads as zero
    ///
    /// # Errors
    ///
    /// Returns an error if the stored log cannot be read
    pub async fn today(&self, today: NaiveDate) -> AppResult<WaterLog> {
        Ok(self
            .store
            .load_water()
            .await?
            .map_or_else(|| WaterLog::empty(today), |log| log.for_day(today)))
    }

    /// Set today's count
    ///
    /// # Errors
    ///
    /// Returns a validation error for an implausible count, or a storage error
    pub async fn set(&self, glasses: u32, today: NaiveDate) -> AppResult<WaterLog> {
        let log = WaterLog {
            glasses,
            date: today,
        };
        log.validate()?;
        self.store.save_water(&log).await?;
        Ok(log)
    }

    /// Add one glass
    ///
    /// # Errors
    ///
    /// Returns a validation error past the daily maximum, or a storage error
    pub async fn add_glass(&self, today: NaiveDate) -> AppResult<WaterLog> {
        let current = self.today(today).await?;
        self.set(current.glasses + 1, today).await
    }

    /// Remove one glass; never goes below zero
    ///
    /// # Errors
    ///
    /// Returns a storage error if the log cannot be written
    pub async fn remove_glass(&self, today: NaiveDate) -> AppResult<WaterLog> {
        let current = self.today(today).await?;
        self.set(current.glasses.saturating_sub(1), today).await
    }

    /// Today's progress
    ///
    /// # Errors
    ///
    /// Returns an error if the stored log cannot be read
    pub async fn progress(&self, today: NaiveDate) -> AppResult<HydrationProgress> {
        let glasses = self.today(today).await?.glasses;
        Ok(HydrationProgress {
            glasses,
            goal: self.goal_glasses,
            millilitres: glasses * ML_PER_GLASS,
            percent: percent_of(f64::from(glasses), f64::from(self.goal_glasses)),
        })
    }
}
