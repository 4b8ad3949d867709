// ABOUTME: Nutrition models for calorie targets and the daily meal log
// ABOUTME: CalorieTargets, MealEntry, DailyMealLog and aggregated NutritionTotals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ensure_in_range, ensure_non_negative, ensure_not_blank, Validate};
use crate::constants::limits;
use crate::errors::AppResult;

/// Calculator screen output, consumed by the diet tracker and the coach
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieTargets {
    /// Total daily energy expenditure (kcal)
    pub tdee: f64,
    /// Daily calorie goal after the goal offset (kcal)
    pub goal_calories: f64,
    /// Protein target (g)
    pub protein: f64,
    /// Carbohydrate target (g)
    pub carbs: f64,
    /// Fat target (g)
    pub fats: f64,
    /// Body mass index
    pub bmi: f64,
    /// Basal metabolic rate (kcal)
    pub bmr: f64,
}

impl Validate for CalorieTargets {
    fn validate(&self) -> AppResult<()> {
        ensure_non_negative("tdee", self.tdee)?;
        ensure_non_negative("goalCalories", self.goal_calories)?;
        ensure_non_negative("protein", self.protein)?;
        ensure_non_negative("carbs", self.carbs)?;
        ensure_non_negative("fats", self.fats)?;
        ensure_non_negative("bmi", self.bmi)?;
        ensure_non_negative("bmr", self.bmr)
    }
}

/// One food logged in the diet tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealEntry {
    /// Food or meal name
    pub name: String,
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (g)
    #[serde(default)]
    pub protein: f64,
}

impl MealEntry {
    /// Create a meal entry
    #[must_use]
    pub fn new(name: impl Into<String>, calories: f64, protein: f64) -> Self {
        Self {
            name: name.into(),
            calories,
            protein,
        }
    }
}

impl Validate for MealEntry {
    fn validate(&self) -> AppResult<()> {
        ensure_not_blank("name", &self.name)?;
        ensure_in_range("calories", self.calories, 0.0, limits::MAX_MEAL_CALORIES)?;
        ensure_non_negative("protein", self.protein)
    }
}

/// Sum of everything eaten on one day
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NutritionTotals {
    /// Total energy (kcal)
    pub calories: f64,
    /// Total protein (g)
    pub protein: f64,
    /// Number of logged entries
    pub meal_count: usize,
}

/// Meals logged for a single day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMealLog {
    /// Day the meals belong to
    pub date: NaiveDate,
    /// Entries in the order they were logged
    pub meals: Vec<MealEntry>,
}

impl DailyMealLog {
    /// Empty log for a day
    #[must_use]
    pub const fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            meals: Vec::new(),
        }
    }

    /// Aggregate calories, protein and entry count
    #[must_use]
    pub fn totals(&self) -> NutritionTotals {
        self.meals
            .iter()
            .fold(NutritionTotals::default(), |acc, meal| NutritionTotals {
                calories: acc.calories + meal.calories,
                protein: acc.protein + meal.protein,
                meal_count: acc.meal_count + 1,
            })
    }
}

impl Validate for DailyMealLog {
    fn validate(&self) -> AppResult<()> {
        self.meals.validate()
    }
}
