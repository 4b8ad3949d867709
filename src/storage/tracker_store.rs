// ABOUTME: Typed, validated access to every tracker key in the shared store
// ABOUTME: Migrates legacy synonym keys and bare values to versioned canonical entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Typed tracker storage
//!
//! Canonical keys win. A legacy synonym is only read when its canonical key
//! is absent; it is then rewritten under the canonical key and deleted.
//! Saving always removes leftover synonyms so the two can never disagree.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::envelope::{self, Opened};
use super::KeyValueStore;
use crate::constants::schema::LEGACY_VERSION;
use crate::constants::storage_keys as keys;
use crate::errors::{AppError, AppResult, ErrorKind};
use crate::logging::AppLogger;
use crate::models::{
    BodyAnalysis, CalorieTargets, DailyMealLog, MealEntry, UserProfile, Validate, WaterLog,
    WorkoutSession,
};

/// Typed facade over a [`KeyValueStore`]
#[derive(Clone)]
pub struct TrackerStore {
    store: Arc<dyn KeyValueStore>,
}

impl TrackerStore {
    /// Wrap a raw store
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The underlying raw store
    #[must_use]
    pub fn raw(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Backend identifier
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    fn decode<T: DeserializeOwned + Validate>(key: &str, opened: Opened) -> AppResult<T> {
        let value: T = serde_json::from_value(opened.data).map_err(|e| {
            AppError::parse(format!("Stored value '{key}' has an unexpected shape: {e}"))
                .with_source(e)
        })?;
        value.validate()?;
        Ok(value)
    }

    async fn save<T: Serialize + Validate + Sync + ?Sized>(
        &self,
        key: &str,
        legacy: &[&str],
        value: &T,
    ) -> AppResult<()> {
        value.validate()?;
        let result = self.store.set(key, envelope::seal(value)?).await;
        AppLogger::log_store_operation(self.backend_name(), "set", key, result.is_ok());
        result?;
        for old in legacy {
            if self.store.remove(old).await? {
                AppLogger::log_store_operation(self.backend_name(), "remove", old, true);
            }
        }
        Ok(())
    }

    async fn load<T>(&self, key: &str, legacy: &[&str]) -> AppResult<Option<T>>
    where
        T: DeserializeOwned + Serialize + Validate + Sync,
    {
        if let Some(raw) = self.store.get(key).await? {
            let opened = envelope::open(key, raw)?;
            let version = opened.version;
            let value: T = Self::decode(key, opened)?;
            if version == LEGACY_VERSION {
                self.save(key, legacy, &value).await?;
                AppLogger::log_migration(key, key, version);
            }
            return Ok(Some(value));
        }

        for old in legacy {
            if let Some(raw) = self.store.get(old).await? {
                let opened = envelope::open(old, raw)?;
                let version = opened.version;
                let value: T = Self::decode(old, opened)?;
                self.save(key, legacy, &value).await?;
                AppLogger::log_migration(old, key, version);
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    async fn remove_all(&self, key: &str, legacy: &[&str]) -> AppResult<bool> {
        let mut removed = self.store.remove(key).await?;
        for old in legacy {
            removed |= self.store.remove(old).await?;
        }
        Ok(removed)
    }

    /// Load the user profile
    ///
    /// # Errors
    ///
    /// Returns a parse or validation error if the stored profile is malformed
    pub async fn load_profile(&self) -> AppResult<Option<UserProfile>> {
        self.load(keys::USER_PROFILE, &[keys::LEGACY_PROFILE]).await
    }

    /// Save the user profile
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid profile, or a storage error
    pub async fn save_profile(&self, profile: &UserProfile) -> AppResult<()> {
        self.save(keys::USER_PROFILE, &[keys::LEGACY_PROFILE], profile)
            .await
    }

    /// Load the saved calorie and macro targets
    ///
    /// # Errors
    ///
    /// Returns a parse or validation error if the stored targets are malformed
    pub async fn load_calorie_targets(&self) -> AppResult<Option<CalorieTargets>> {
        self.load(keys::CALORIE_TARGETS, &[keys::LEGACY_CALORIE_TARGETS])
            .await
    }

    /// Save calorie and macro targets
    ///
    /// # Errors
    ///
    /// Returns a validation error for negative targets, or a storage error
    pub async fn save_calorie_targets(&self, targets: &CalorieTargets) -> AppResult<()> {
        self.save(
            keys::CALORIE_TARGETS,
            &[keys::LEGACY_CALORIE_TARGETS],
            targets,
        )
        .await
    }

    /// Load the workout history, oldest first; missing history is empty
    ///
    /// # Errors
    ///
    /// Returns a parse or validation error if the stored history is malformed
    pub async fn load_workout_history(&self) -> AppResult<Vec<WorkoutSession>> {
        Ok(self
            .load(keys::WORKOUT_HISTORY, &[])
            .await?
            .unwrap_or_default())
    }

    /// Replace the workout history
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid session, or a storage error
    pub async fn save_workout_history(&self, history: &[WorkoutSession]) -> AppResult<()> {
        self.save(keys::WORKOUT_HISTORY, &[], history).await
    }

    /// Load the meal log as stored (it may belong to an earlier day)
    ///
    /// Older builds kept a bare array of meals with no date under `todayLog`
    /// or `dailyMeals`. Such an array is adopted as the log for `today` and
    /// rewritten under the canonical key.
    ///
    /// # Errors
    ///
    /// Returns a parse or validation error if the stored log is malformed
    pub async fn load_meal_log(&self, today: NaiveDate) -> AppResult<Option<DailyMealLog>> {
        for key in [keys::TODAY_LOG, keys::LEGACY_DAILY_MEALS] {
            let Some(raw) = self.store.get(key).await? else {
                continue;
            };
            let opened = envelope::open(key, raw)?;
            if !(opened.needs_migration() && opened.data.is_array()) {
                break;
            }
            let meals: Vec<MealEntry> = serde_json::from_value(opened.data).map_err(|e| {
                AppError::parse(format!("Stored value '{key}' has an unexpected shape: {e}"))
                    .with_source(e)
            })?;
            let log = DailyMealLog { date: today, meals };
            self.save_meal_log(&log).await?;
            AppLogger::log_migration(key, keys::TODAY_LOG, LEGACY_VERSION);
            return Ok(Some(log));
        }
        self.load(keys::TODAY_LOG, &[keys::LEGACY_DAILY_MEALS])
            .await
    }

    /// Save the meal log
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid entry, or a storage error
    pub async fn save_meal_log(&self, log: &DailyMealLog) -> AppResult<()> {
        self.save(keys::TODAY_LOG, &[keys::LEGACY_DAILY_MEALS], log)
            .await
    }

    /// Load the water log as stored (it may belong to an earlier day)
    ///
    /// Older builds kept a bare glass count under `waterIntake` and its ISO
    /// date under `waterDate`; the pair is folded into one [`WaterLog`].
    ///
    /// # Errors
    ///
    /// Returns a parse or validation error if the stored log is malformed
    pub async fn load_water(&self) -> AppResult<Option<WaterLog>> {
        let Some(raw) = self.store.get(keys::WATER_INTAKE).await? else {
            return Ok(None);
        };
        let opened = envelope::open(keys::WATER_INTAKE, raw)?;
        if !opened.needs_migration() {
            return Self::decode(keys::WATER_INTAKE, opened).map(Some);
        }

        let Some(glasses) = legacy_glass_count(&opened.data) else {
            let log: WaterLog = Self::decode(keys::WATER_INTAKE, opened)?;
            self.save_water(&log).await?;
            AppLogger::log_migration(keys::WATER_INTAKE, keys::WATER_INTAKE, LEGACY_VERSION);
            return Ok(Some(log));
        };
        let date = match self.store.get(keys::LEGACY_WATER_DATE).await? {
            Some(raw) => legacy_date(&raw),
            None => None,
        };
        let Some(date) = date else {
            warn!("Legacy water count has no usable date; discarding it");
            self.remove_all(keys::WATER_INTAKE, &[keys::LEGACY_WATER_DATE])
                .await?;
            return Ok(None);
        };
        let log = WaterLog { glasses, date };
        self.save_water(&log).await?;
        AppLogger::log_migration(keys::LEGACY_WATER_DATE, keys::WATER_INTAKE, LEGACY_VERSION);
        Ok(Some(log))
    }

    /// Save the water log
    ///
    /// # Errors
    ///
    /// Returns a validation error for an implausible count, or a storage error
    pub async fn save_water(&self, log: &WaterLog) -> AppResult<()> {
        self.save(keys::WATER_INTAKE, &[keys::LEGACY_WATER_DATE], log)
            .await
    }

    /// Load saved body analyses; missing list is empty
    ///
    /// # Errors
    ///
    /// Returns a parse or validation error if the stored list is malformed
    pub async fn load_analyses(&self) -> AppResult<Vec<BodyAnalysis>> {
        Ok(self
            .load(keys::SAVED_ANALYSES, &[])
            .await?
            .unwrap_or_default())
    }

    /// Replace the saved analyses
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid analysis, or a storage error
    pub async fn save_analyses(&self, analyses: &[BodyAnalysis]) -> AppResult<()> {
        self.save(keys::SAVED_ANALYSES, &[], analyses).await
    }

    /// Delete every tracker key, canonical and legacy
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend cannot be written
    pub async fn clear_all(&self) -> AppResult<()> {
        self.remove_all(keys::USER_PROFILE, &[keys::LEGACY_PROFILE])
            .await?;
        self.remove_all(keys::CALORIE_TARGETS, &[keys::LEGACY_CALORIE_TARGETS])
            .await?;
        self.remove_all(keys::WORKOUT_HISTORY, &[]).await?;
        self.remove_all(keys::TODAY_LOG, &[keys::LEGACY_DAILY_MEALS])
            .await?;
        self.remove_all(keys::WATER_INTAKE, &[keys::LEGACY_WATER_DATE])
            .await?;
        self.remove_all(keys::SAVED_ANALYSES, &[]).await?;
        Ok(())
    }
}

/// Treat unreadable stored data as missing, logging why
///
/// Used by read-only consumers such as the coach context, where a corrupt
/// key should degrade the answer rather than abort it.
pub fn or_missing<T>(key: &str, result: AppResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            if matches!(e.kind(), ErrorKind::Storage) {
                warn!(key, error = %e, "Store read failed; treating data as missing");
            } else {
                warn!(key, error = %e, "Ignoring malformed stored data");
            }
            None
        }
    }
}

fn legacy_glass_count(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn legacy_date(raw: &Value) -> Option<NaiveDate> {
    let inner = match raw {
        Value::Object(map) if map.contains_key("data") => map.get("data")?,
        other => other,
    };
    let text = inner.as_str()?;
    // ISO timestamps as well as plain dates
    let day = text.get(..10).unwrap_or(text);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_legacy_date_accepts_timestamps() {
        let date = legacy_date(&json!("2025-04-02T08:15:00.000Z"));
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 4, 2));
        assert_eq!(legacy_date(&json!("yesterday")), None);
    }

    #[test]
    fn test_legacy_glass_count_accepts_strings() {
        assert_eq!(legacy_glass_count(&json!(5)), Some(5));
        assert_eq!(legacy_glass_count(&json!("3")), Some(3));
        assert_eq!(legacy_glass_count(&json!(-1)), None);
    }
}
