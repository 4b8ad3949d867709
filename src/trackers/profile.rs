// ABOUTME: Profile tracker storing the user profile and its calculated calorie targets
// ABOUTME: Derives BMI classification, healthy weight band and progress toward goal weight
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::Serialize;
use tracing::info;

use crate::config::health_metrics::HealthMetricsConfig;
use crate::errors::{AppError, AppResult};
use crate::intelligence::health_metrics::{
    bmi_category, calculate_bmi, calculate_nutrition_targets, ideal_weight_range,
    BmiClassification, WeightRange,
};
use crate::models::{CalorieTargets, UserProfile, Validate};
use crate::storage::TrackerStore;

/// Derived figures shown on the profile screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSummary {
    /// Current BMI
    pub bmi: f64,
    /// BMI band
    pub classification: BmiClassification,
    /// Healthy weight band for the user's height
    pub healthy_range: WeightRange,
    /// Kilograms left to the goal weight, if one is set
    pub weight_to_goal_kg: Option<f64>,
}

impl ProfileSummary {
    /// Compute the summary for a profile
    ///
    /// # Errors
    ///
    /// Returns a validation error if the profile's measurements are invalid
    pub fn for_profile(profile: &UserProfile) -> AppResult<Self> {
        let bmi = calculate_bmi(profile.current_weight_kg, profile.height_cm)?;
        Ok(Self {
            bmi,
            classification: bmi_category(bmi)?,
            healthy_range: ideal_weight_range(profile.height_cm)?,
            weight_to_goal_kg: profile.weight_to_goal_kg(),
        })
    }
}

/// Profile and calculator screen operations
#[derive(Clone)]
pub struct ProfileTracker {
    store: TrackerStore,
    metrics: HealthMetricsConfig,
}

impl ProfileTracker {
    /// Tracker using default formula coefficients
    #[must_use]
    pub fn new(store: TrackerStore) -> Self {
        Self::with_config(store, HealthMetricsConfig::default())
    }

    /// Tracker with explicit coefficients
    #[must_use]
    pub const fn with_config(store: TrackerStore, metrics: HealthMetricsConfig) -> Self {
        Self { store, metrics }
    }

    /// Stored profile, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the stored profile cannot be read
    pub async fn load(&self) -> AppResult<Option<UserProfile>> {
        self.store.load_profile().await
    }

    /// Stored profile, or a not-found error
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when no profile has been saved
    pub async fn require(&self) -> AppResult<UserProfile> {
        self.load()
            .await?
            .ok_or_else(|| AppError::not_found("User profile"))
    }

    /// Validate and save the profile
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid profile, or a storage error
    pub async fn save(&self, profile: &UserProfile) -> AppResult<()> {
        profile.validate()?;
        self.store.save_profile(profile).await?;
        info!(name = %profile.name, "Profile saved");
        Ok(())
    }

    /// Record a new body weight
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` without a profile, or a validation error
    pub async fn update_weight(&self, weight_kg: f64) -> AppResult<UserProfile> {
        let mut profile = self.require().await?;
        profile.current_weight_kg = weight_kg;
        self.save(&profile).await?;
        Ok(profile)
    }

    /// Calculate targets for a profile without saving them
    ///
    /// # Errors
    ///
    /// Returns a validation error if the profile cannot be calculated
    pub fn calculate_targets(&self, profile: &UserProfile) -> AppResult<CalorieTargets> {
        calculate_nutrition_targets(profile, &self.metrics)
    }

    /// Calculate targets for the stored profile and save them
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` without a profile, or a validation/storage error
    pub async fn recalculate_targets(&self) -> AppResult<CalorieTargets> {
        let profile = self.require().await?;
        let targets = self.calculate_targets(&profile)?;
        self.store.save_calorie_targets(&targets).await?;
        info!(
            goal_calories = targets.goal_calories,
            tdee = targets.tdee,
            "Calorie targets saved"
        );
        Ok(targets)
    }

    /// Save targets produced elsewhere (the calculator screen's "save" action)
    ///
    /// # Errors
    ///
    /// Returns a validation error for negative targets, or a storage error
    pub async fn save_targets(&self, targets: &CalorieTargets) -> AppResult<()> {
        self.store.save_calorie_targets(targets).await
    }

    /// Saved targets, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the stored targets cannot be read
    pub async fn targets(&self) -> AppResult<Option<CalorieTargets>> {
        self.store.load_calorie_targets().await
    }

    /// Summary for the stored profile
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` without a profile
    pub async fn summary(&self) -> AppResult<ProfileSummary> {
        ProfileSummary::for_profile(&self.require().await?)
    }
}
