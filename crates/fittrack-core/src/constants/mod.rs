// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Storage keys, schema versions, energy densities, and validation limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// Fixed keys of the tracker's key/value namespace
pub mod storage_keys {
    /// User profile (canonical)
    pub const USER_PROFILE: &str = "userProfile";
    /// User profile written by older builds of the profile screen
    pub const LEGACY_PROFILE: &str = "profileData";

    /// Calculated calorie and macro targets (canonical)
    pub const CALORIE_TARGETS: &str = "userCalorieData";
    /// Calorie targets written by older builds of the calculator screen
    pub const LEGACY_CALORIE_TARGETS: &str = "calorieData";

    /// Logged workout sessions
    pub const WORKOUT_HISTORY: &str = "workoutHistory";

    /// Today's meal log (canonical)
    pub const TODAY_LOG: &str = "todayLog";
    /// Meal log written by older builds of the diet screen
    pub const LEGACY_DAILY_MEALS: &str = "dailyMeals";

    /// Water intake for the current day
    pub const WATER_INTAKE: &str = "waterIntake";
    /// Separate ISO date that used to accompany a bare glass count
    pub const LEGACY_WATER_DATE: &str = "waterDate";

    /// Saved body-composition analyses
    pub const SAVED_ANALYSES: &str = "savedAnalyses";
}

/// Versioning of stored values
pub mod schema {
    /// Version written by this build
    pub const CURRENT_VERSION: u32 = 1;
    /// Version assigned to bare values written before envelopes existed
    pub const LEGACY_VERSION: u32 = 0;
}

/// Physiological energy density of macronutrients (kcal per gram)
pub mod energy {
    /// Protein energy density
    pub const PROTEIN_KCAL_PER_G: f64 = 4.0;
    /// Carbohydrate energy density
    pub const CARBS_KCAL_PER_G: f64 = 4.0;
    /// Fat energy density
    pub const FAT_KCAL_PER_G: f64 = 9.0;
}

/// Hydration tracking defaults
pub mod hydration {
    /// Default daily water goal in glasses
    pub const DEFAULT_DAILY_GOAL_GLASSES: u32 = 8;
    /// Volume of one glass in millilitres
    pub const ML_PER_GLASS: u32 = 250;
    /// Upper bound accepted for a single day
    pub const MAX_GLASSES_PER_DAY: u32 = 40;
}

/// Validation limits for user-entered measurements
pub mod limits {
    /// Minimum supported age (Mifflin-St Jeor is validated from age 10)
    pub const MIN_AGE: u32 = 10;
    /// Maximum supported age
    pub const MAX_AGE: u32 = 120;
    /// Minimum plausible height in centimetres
    pub const MIN_HEIGHT_CM: f64 = 50.0;
    /// Maximum plausible height in centimetres
    pub const MAX_HEIGHT_CM: f64 = 300.0;
    /// Minimum plausible body weight in kilograms
    pub const MIN_WEIGHT_KG: f64 = 20.0;
    /// Maximum plausible body weight in kilograms
    pub const MAX_WEIGHT_KG: f64 = 500.0;
    /// Maximum calories accepted for a single meal entry
    pub const MAX_MEAL_CALORIES: f64 = 10_000.0;
    /// Maximum number of user/assistant messages kept as chat history
    pub const MAX_CHAT_HISTORY: usize = 20;
}
