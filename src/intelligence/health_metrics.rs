// ABOUTME: Health-metric calculators using standard textbook formulas
// ABOUTME: BMI with category bands, Mifflin-St Jeor BMR, TDEE, calorie goals and macro split
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health Metrics Module
//!
//! Pure, deterministic calculators behind the calculator and profile screens.
//! Invalid input is rejected with a validation error rather than producing
//! `NaN` or infinity.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>
//!
//! - World Health Organization (2000). Obesity: preventing and managing the global epidemic.
//!   WHO Technical Report Series 894 (BMI classification).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::health_metrics::{
    ActivityFactorsConfig, BmrConfig, CalorieGoalConfig, HealthMetricsConfig, MacroRatioConfig,
};
use crate::constants::{energy, limits};
use crate::errors::{AppError, AppResult};
use crate::models::{ActivityLevel, CalorieTargets, FitnessGoal, Gender, UserProfile};

/// Lower BMI bound of the normal band
const BMI_NORMAL_MIN: f64 = 18.5;
/// Lower BMI bound of the overweight band
const BMI_OVERWEIGHT_MIN: f64 = 25.0;
/// Lower BMI bound of the obese band
const BMI_OBESE_MIN: f64 = 30.0;
/// Upper BMI used for the ideal weight range
const BMI_IDEAL_MAX: f64 = 24.9;

/// BMI category band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    /// BMI below 18.5
    Underweight,
    /// BMI in [18.5, 25)
    Normal,
    /// BMI in [25, 30)
    Overweight,
    /// BMI of 30 or more
    Obese,
}

impl BmiCategory {
    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display tag paired with a BMI category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BmiColor {
    /// Underweight
    Blue,
    /// Normal
    Green,
    /// Overweight
    Yellow,
    /// Obese
    Red,
}

impl BmiColor {
    /// Lowercase tag
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

/// Result of [`bmi_category`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BmiClassification {
    /// Category band
    pub category: BmiCategory,
    /// Display tag
    pub color: BmiColor,
}

/// Daily calorie goal with a short explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieGoal {
    /// Target intake (kcal/day)
    pub calories: f64,
    /// Human-readable description of the adjustment
    pub description: String,
}

/// Macronutrient targets in grams
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroSplit {
    /// Protein (g)
    pub protein: f64,
    /// Carbohydrates (g)
    pub carbs: f64,
    /// Fat (g)
    pub fats: f64,
}

impl MacroSplit {
    /// Energy contained in the split (kcal)
    #[must_use]
    pub fn calories(&self) -> f64 {
        self.protein * energy::PROTEIN_KCAL_PER_G
            + self.carbs * energy::CARBS_KCAL_PER_G
            + self.fats * energy::FAT_KCAL_PER_G
    }
}

/// Healthy weight band for a height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    /// Weight at BMI 18.5 (kg)
    pub min_kg: f64,
    /// Weight at BMI 24.9 (kg)
    pub max_kg: f64,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

fn ensure_positive(field: &str, value: f64) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::invalid_input(format!(
            "{field} must be a finite number"
        )));
    }
    if value <= 0.0 {
        return Err(AppError::out_of_range(format!("{field} must be positive")));
    }
    Ok(())
}

/// Calculate Body Mass Index
///
/// Formula: BMI = weight (kg) / height (m)^2, rounded to one decimal
///
/// # Errors
///
/// Returns a validation error if weight or height is not a positive finite number
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> AppResult<f64> {
    ensure_positive("Weight", weight_kg)?;
    ensure_positive("Height", height_cm)?;
    let height_m = height_cm / 100.0;
    Ok(round_to(weight_kg / (height_m * height_m), 1))
}

/// Map a BMI value onto its closed-open category band
///
/// # Errors
///
/// Returns a validation error for negative or non-finite input
pub fn bmi_category(bmi: f64) -> AppResult<BmiClassification> {
    if !bmi.is_finite() || bmi < 0.0 {
        return Err(AppError::out_of_range(
            "BMI must be a non-negative finite number",
        ));
    }
    let (category, color) = if bmi < BMI_NORMAL_MIN {
        (BmiCategory::Underweight, BmiColor::Blue)
    } else if bmi < BMI_OVERWEIGHT_MIN {
        (BmiCategory::Normal, BmiColor::Green)
    } else if bmi < BMI_OBESE_MIN {
        (BmiCategory::Overweight, BmiColor::Yellow)
    } else {
        (BmiCategory::Obese, BmiColor::Red)
    };
    Ok(BmiClassification { category, color })
}

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation
///
/// Formula:
/// - Men: BMR = 10 x weight(kg) + 6.25 x height(cm) - 5 x age(y) + 5
/// - Women: BMR = 10 x weight(kg) + 6.25 x height(cm) - 5 x age(y) - 161
///
/// The result is rounded to the nearest kcal.
///
/// # Reference
/// Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
///
/// # Errors
///
/// Returns an error if input values are out of valid ranges
pub fn calculate_bmr(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: Gender,
    config: &BmrConfig,
) -> AppResult<f64> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 || weight_kg > limits::MAX_WEIGHT_KG {
        return Err(AppError::out_of_range(format!(
            "Weight must be between 0 and {} kg",
            limits::MAX_WEIGHT_KG
        )));
    }
    if !height_cm.is_finite() || height_cm <= 0.0 || height_cm > limits::MAX_HEIGHT_CM {
        return Err(AppError::out_of_range(format!(
            "Height must be between 0 and {} cm",
            limits::MAX_HEIGHT_CM
        )));
    }
    if !(limits::MIN_AGE..=limits::MAX_AGE).contains(&age) {
        return Err(AppError::out_of_range(format!(
            "Age must be between {} and {} years (Mifflin-St Jeor formula validated for ages 10+)",
            limits::MIN_AGE,
            limits::MAX_AGE
        )));
    }

    let weight_component = config.msj_weight_coef * weight_kg;
    let height_component = config.msj_height_coef * height_cm;
    let age_component = config.msj_age_coef * f64::from(age);
    let gender_constant = match gender {
        Gender::Male => config.msj_male_constant,
        Gender::Female => config.msj_female_constant,
    };

    let bmr = weight_component + height_component + age_component + gender_constant;
    if bmr <= 0.0 {
        return Err(AppError::out_of_range(
            "Inputs produce a non-positive BMR",
        ));
    }
    Ok(bmr.round())
}

/// Activity multiplier for a level
#[must_use]
pub const fn activity_factor(level: ActivityLevel, config: &ActivityFactorsConfig) -> f64 {
    match level {
        ActivityLevel::Sedentary => config.sedentary,
        ActivityLevel::Light => config.light,
        ActivityLevel::Moderate => config.moderate,
        ActivityLevel::Active => config.active,
        ActivityLevel::VeryActive => config.very_active,
    }
}

/// Calculate Total Daily Energy Expenditure
///
/// Formula: TDEE = BMR x activity factor, rounded to the nearest kcal
///
/// # Errors
///
/// Returns an error if BMR is not positive
pub fn calculate_tdee(
    bmr: f64,
    activity_level: ActivityLevel,
    config: &ActivityFactorsConfig,
) -> AppResult<f64> {
    ensure_positive("BMR", bmr)?;
    Ok((bmr * activity_factor(activity_level, config)).round())
}

/// Apply the goal offset to TDEE
///
/// Weight loss never drops below the configured floor, and the floor itself
/// stays below TDEE so a loss goal is always a deficit.
///
/// # Errors
///
/// Returns an error if TDEE is not positive
pub fn calculate_calorie_goals(
    tdee: f64,
    goal: FitnessGoal,
    config: &CalorieGoalConfig,
) -> AppResult<CalorieGoal> {
    ensure_positive("TDEE", tdee)?;
    let goal = match goal {
        FitnessGoal::Lose => {
            let target = tdee - config.deficit_kcal;
            if target < config.minimum_kcal {
                let floor = config.minimum_kcal.min(tdee - 1.0);
                CalorieGoal {
                    calories: floor,
                    description: format!(
                        "Weight loss at {floor} kcal, limited by the {} kcal minimum safe intake",
                        config.minimum_kcal
                    ),
                }
            } else {
                CalorieGoal {
                    calories: target,
                    description: format!(
                        "Weight loss with a {} kcal daily deficit",
                        config.deficit_kcal
                    ),
                }
            }
        }
        FitnessGoal::Maintain => CalorieGoal {
            calories: tdee,
            description: "Maintain current weight".to_owned(),
        },
        FitnessGoal::Gain => CalorieGoal {
            calories: tdee + config.surplus_kcal,
            description: format!(
                "Muscle gain with a {} kcal daily surplus",
                config.surplus_kcal
            ),
        },
    };
    Ok(goal)
}

/// Split a calorie budget into macronutrient grams for a goal
///
/// Protein and carbohydrates carry 4 kcal/g, fat 9 kcal/g; grams are rounded.
///
/// # Errors
///
/// Returns an error if calories are not positive
pub fn calculate_macros(
    calories: f64,
    goal: FitnessGoal,
    config: &MacroRatioConfig,
) -> AppResult<MacroSplit> {
    ensure_positive("Calories", calories)?;
    let ratio = config.for_goal(goal);
    Ok(MacroSplit {
        protein: (calories * ratio.protein / energy::PROTEIN_KCAL_PER_G).round(),
        carbs: (calories * ratio.carbs / energy::CARBS_KCAL_PER_G).round(),
        fats: (calories * ratio.fats / energy::FAT_KCAL_PER_G).round(),
    })
}

/// Run the full calculator chain for a profile
///
/// BMI, BMR, TDEE, goal calories and macros in one record, ready to be saved
/// as the user's calorie targets.
///
/// # Errors
///
/// Returns the first validation error raised along the chain
pub fn calculate_nutrition_targets(
    profile: &UserProfile,
    config: &HealthMetricsConfig,
) -> AppResult<CalorieTargets> {
    let bmi = calculate_bmi(profile.current_weight_kg, profile.height_cm)?;
    let bmr = calculate_bmr(
        profile.current_weight_kg,
        profile.height_cm,
        profile.age,
        profile.gender,
        &config.bmr,
    )?;
    let tdee = calculate_tdee(bmr, profile.activity_level, &config.activity_factors)?;
    let goal = calculate_calorie_goals(tdee, profile.fitness_goal, &config.calorie_goals)?;
    let macros = calculate_macros(goal.calories, profile.fitness_goal, &config.macro_ratios)?;

    Ok(CalorieTargets {
        tdee,
        goal_calories: goal.calories,
        protein: macros.protein,
        carbs: macros.carbs,
        fats: macros.fats,
        bmi,
        bmr,
    })
}

/// Weight band for BMI 18.5 to 24.9 at a given height, rounded to 0.1 kg
///
/// # Errors
///
/// Returns an error if height is not positive
pub fn ideal_weight_range(height_cm: f64) -> AppResult<WeightRange> {
    ensure_positive("Height", height_cm)?;
    let height_m_sq = (height_cm / 100.0).powi(2);
    Ok(WeightRange {
        min_kg: round_to(BMI_NORMAL_MIN * height_m_sq, 1),
        max_kg: round_to(BMI_IDEAL_MAX * height_m_sq, 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_rounds_to_one_decimal() {
        let bmi = calculate_bmi(70.0, 175.0).unwrap();
        assert!((bmi - 22.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bmi_rejects_zero_height() {
        let err = calculate_bmi(70.0, 0.0).unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::ValueOutOfRange);
        assert!(calculate_bmi(f64::NAN, 170.0).is_err());
    }

    #[test]
    fn test_bmi_bands_are_closed_open() {
        assert_eq!(bmi_category(18.4).unwrap().category, BmiCategory::Underweight);
        assert_eq!(bmi_category(18.5).unwrap().category, BmiCategory::Normal);
        assert_eq!(bmi_category(24.9).unwrap().category, BmiCategory::Normal);
        assert_eq!(bmi_category(25.0).unwrap().category, BmiCategory::Overweight);
        assert_eq!(bmi_category(30.0).unwrap().color, BmiColor::Red);
        assert!(bmi_category(-1.0).is_err());
    }

    #[test]
    fn test_reference_bmr() {
        // 10*70 + 6.25*175 - 5*30 + 5 = 1648.75
        let bmr = calculate_bmr(70.0, 175.0, 30, Gender::Male, &BmrConfig::default()).unwrap();
        assert!((bmr - 1649.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lose_goal_has_floor() {
        let goal =
            calculate_calorie_goals(1500.0, FitnessGoal::Lose, &CalorieGoalConfig::default())
                .unwrap();
        assert!((goal.calories - 1200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lose_goal_stays_below_low_tdee() {
        let config = CalorieGoalConfig::default();
        for tdee in [932.0, 1000.0, 1199.0, 1200.0, 1201.0, 1699.0] {
            let lose = calculate_calorie_goals(tdee, FitnessGoal::Lose, &config).unwrap();
            let gain = calculate_calorie_goals(tdee, FitnessGoal::Gain, &config).unwrap();
            assert!(lose.calories < tdee && tdee < gain.calories, "tdee {tdee}");
            assert!(lose.calories > 0.0);
        }
    }
}
