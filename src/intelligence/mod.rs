// ABOUTME: Intelligence module hosting the health-metric calculators
// ABOUTME: Re-exports BMI, BMR, TDEE, calorie-goal and macro functions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intelligence Module
//!
//! Stateless calculators used by the calculator and profile screens and by
//! the coach when it describes the user's numbers.

/// BMI, BMR, TDEE, calorie goals and macro split
pub mod health_metrics;

pub use health_metrics::{
    bmi_category, calculate_bmi, calculate_bmr, calculate_calorie_goals, calculate_macros,
    calculate_nutrition_targets, calculate_tdee, ideal_weight_range, BmiCategory,
    BmiClassification, BmiColor, CalorieGoal, MacroSplit, WeightRange,
};
