// ABOUTME: Integration tests for the health-metric calculators
// ABOUTME: Reference values, band boundaries, monotonicity, macro energy balance and idempotence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
// Test files don't require documentation - this is a rustc lint (not clippy)
#![allow(missing_docs)]

mod common;

use fittrack::config::HealthMetricsConfig;
use fittrack::constants::energy::{CARBS_KCAL_PER_G, FAT_KCAL_PER_G, PROTEIN_KCAL_PER_G};
use fittrack::errors::ErrorKind;
use fittrack::intelligence::health_metrics::{
    bmi_category, calculate_bmi, calculate_bmr, calculate_calorie_goals, calculate_macros,
    calculate_nutrition_targets, calculate_tdee, ideal_weight_range, BmiCategory, BmiColor,
};
use fittrack::models::{ActivityLevel, FitnessGoal, Gender};

// ============================================================================
// BMI
// ============================================================================

#[test]
fn test_reference_bmi_is_normal() {
    let bmi = calculate_bmi(70.0, 175.0).unwrap();
    assert!((bmi - 22.9).abs() < 1e-9);
    let class = bmi_category(bmi).unwrap();
    assert_eq!(class.category, BmiCategory::Normal);
    assert_eq!(class.category.to_string(), "Normal");
    assert_eq!(class.color, BmiColor::Green);
}

#[test]
fn test_bmi_band_boundaries() {
    let cases = [
        (0.0, BmiCategory::Underweight),
        (18.4, BmiCategory::Underweight),
        (18.5, BmiCategory::Normal),
        (24.9, BmiCategory::Normal),
        (25.0, BmiCategory::Overweight),
        (29.9, BmiCategory::Overweight),
        (30.0, BmiCategory::Obese),
        (55.0, BmiCategory::Obese),
    ];
    for (bmi, expected) in cases {
        assert_eq!(bmi_category(bmi).unwrap().category, expected, "bmi {bmi}");
    }
}

#[test]
fn test_invalid_bmi_inputs_are_validation_errors() {
    for (w, h) in [(70.0, 0.0), (0.0, 175.0), (-5.0, 175.0), (f64::NAN, 175.0)] {
        let err = calculate_bmi(w, h).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation, "({w}, {h})");
    }
    assert!(bmi_category(-1.0).is_err());
    assert!(bmi_category(f64::INFINITY).is_err());
}

// ============================================================================
// BMR / TDEE
// ============================================================================

#[test]
fn test_male_female_bmr_differ_by_166() {
    let config = HealthMetricsConfig::default();
    for (w, h, age) in [(70.0, 175.0, 30), (55.0, 160.0, 45), (95.0, 190.0, 22)] {
        let male = calculate_bmr(w, h, age, Gender::Male, &config.bmr).unwrap();
        let female = calculate_bmr(w, h, age, Gender::Female, &config.bmr).unwrap();
        assert!((male - female - 166.0).abs() < 1e-9);
    }
}

#[test]
fn test_reference_bmr_value() {
    let config = HealthMetricsConfig::default();
    // 10*70 + 6.25*175 - 5*30 + 5 = 1648.75
    let bmr = calculate_bmr(70.0, 175.0, 30, Gender::Male, &config.bmr).unwrap();
    assert!((bmr - 1649.0).abs() < 1e-9);
}

#[test]
fn test_unknown_gender_is_rejected() {
    let err = "other".parse::<Gender>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn test_tdee_monotonic_in_activity() {
    let config = HealthMetricsConfig::default();
    let tdees: Vec<f64> = ActivityLevel::ALL
        .iter()
        .map(|level| calculate_tdee(1650.0, *level, &config.activity_factors).unwrap())
        .collect();
    assert!(tdees.windows(2).all(|w| w[0] < w[1]), "{tdees:?}");
    assert!((tdees[0] - 1980.0).abs() < 1e-9);
    assert!(calculate_tdee(0.0, ActivityLevel::Light, &config.activity_factors).is_err());
}

// ============================================================================
// Goals and macros
// ============================================================================

#[test]
fn test_goal_ordering() {
    let config = HealthMetricsConfig::default();
    let tdee = 2500.0;
    let lose = calculate_calorie_goals(tdee, FitnessGoal::Lose, &config.calorie_goals).unwrap();
    let keep =
        calculate_calorie_goals(tdee, FitnessGoal::Maintain, &config.calorie_goals).unwrap();
    let gain = calculate_calorie_goals(tdee, FitnessGoal::Gain, &config.calorie_goals).unwrap();
    assert!(lose.calories < keep.calories && keep.calories < gain.calories);
    assert!((lose.calories - 2000.0).abs() < 1e-9);
    assert!((gain.calories - 3000.0).abs() < 1e-9);
    assert!(!lose.description.is_empty());
}

#[test]
fn test_low_tdee_loss_goal_is_still_a_deficit() {
    let config = HealthMetricsConfig::default();
    for tdee in [800.0, 932.0, 1150.0, 1200.0, 1500.0, 1700.0, 2500.0] {
        let lose =
            calculate_calorie_goals(tdee, FitnessGoal::Lose, &config.calorie_goals).unwrap();
        let gain =
            calculate_calorie_goals(tdee, FitnessGoal::Gain, &config.calorie_goals).unwrap();
        assert!(lose.calories < tdee, "lose {} at tdee {tdee}", lose.calories);
        assert!(tdee < gain.calories);
    }

    // 80 year old, 40 kg, 150 cm, sedentary: BMR 777, TDEE 932
    let mut profile = common::sample_profile();
    profile.gender = Gender::Female;
    profile.age = 80;
    profile.current_weight_kg = 40.0;
    profile.goal_weight_kg = None;
    profile.height_cm = 150.0;
    profile.activity_level = ActivityLevel::Sedentary;
    let targets = calculate_nutrition_targets(&profile, &config).unwrap();
    assert!((targets.tdee - 932.0).abs() < 1e-9);
    assert!(targets.goal_calories < targets.tdee);
}

#[test]
fn test_macro_grams_match_calories() {
    let config = HealthMetricsConfig::default();
    for goal in [FitnessGoal::Lose, FitnessGoal::Maintain, FitnessGoal::Gain] {
        for calories in [1500.0, 2123.0, 3100.0] {
            let m = calculate_macros(calories, goal, &config.macro_ratios).unwrap();
            let energy = m.protein * PROTEIN_KCAL_PER_G
                + m.carbs * CARBS_KCAL_PER_G
                + m.fats * FAT_KCAL_PER_G;
            // Each gram count is rounded, so allow half a gram per macro
            let tolerance = 0.5 * (PROTEIN_KCAL_PER_G + CARBS_KCAL_PER_G + FAT_KCAL_PER_G);
            assert!((energy - calories).abs() <= tolerance, "{goal:?} {calories}");
        }
    }
}

#[test]
fn test_lose_split_is_40_30_30() {
    let config = HealthMetricsConfig::default();
    let m = calculate_macros(2000.0, FitnessGoal::Lose, &config.macro_ratios).unwrap();
    assert!((m.protein - 200.0).abs() < 1e-9);
    assert!((m.carbs - 150.0).abs() < 1e-9);
    assert!((m.fats - 67.0).abs() < 1e-9);
}

// ============================================================================
// Chained targets
// ============================================================================

#[test]
fn test_nutrition_targets_chain_and_idempotence() {
    let config = HealthMetricsConfig::default();
    let profile = common::sample_profile();
    let first = calculate_nutrition_targets(&profile, &config).unwrap();
    let second = calculate_nutrition_targets(&profile, &config).unwrap();
    assert_eq!(first, second);

    assert!((first.bmi - 22.9).abs() < 1e-9);
    assert!((first.bmr - 1649.0).abs() < 1e-9);
    // 1649 * 1.55 = 2555.95
    assert!((first.tdee - 2556.0).abs() < 1e-9);
    assert!((first.goal_calories - 2056.0).abs() < 1e-9);
}

#[test]
fn test_ideal_weight_range() {
    let range = ideal_weight_range(175.0).unwrap();
    assert!((range.min_kg - 56.7).abs() < 1e-9);
    assert!((range.max_kg - 76.3).abs() < 1e-9);
    assert!(ideal_weight_range(0.0).is_err());
}
