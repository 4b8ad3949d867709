// ABOUTME: Coefficients for the BMI, BMR, TDEE, calorie-goal and macro calculators
// ABOUTME: Mifflin-St Jeor constants, activity multipliers, goal offsets and macro ratios
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::models::FitnessGoal;

/// All coefficients used by `intelligence::health_metrics`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HealthMetricsConfig {
    /// BMR equation coefficients
    pub bmr: BmrConfig,
    /// TDEE activity multipliers
    pub activity_factors: ActivityFactorsConfig,
    /// Daily calorie offsets per goal
    pub calorie_goals: CalorieGoalConfig,
    /// Macro shares per goal
    pub macro_ratios: MacroRatioConfig,
}

/// BMR (Basal Metabolic Rate) calculation configuration
///
/// Reference: Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
/// American Journal of Clinical Nutrition, 51(2), 241-247. DOI: 10.1093/ajcn/51.2.241
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Male constant (+5)
    pub msj_male_constant: f64,
    /// Female constant (-161)
    pub msj_female_constant: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
        }
    }
}

/// Activity factor multipliers for TDEE calculation
///
/// Reference: `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Sedentary (little/no exercise): 1.2
    pub sedentary: f64,
    /// Lightly active (1-3 days/week): 1.375
    pub light: f64,
    /// Moderately active (3-5 days/week): 1.55
    pub moderate: f64,
    /// Very active (6-7 days/week): 1.725
    pub active: f64,
    /// Extra active (physical job or 2x/day): 1.9
    pub very_active: f64,
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            light: 1.375,
            moderate: 1.55,
            active: 1.725,
            very_active: 1.9,
        }
    }
}

/// Daily calorie adjustment relative to TDEE
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalorieGoalConfig {
    /// Deficit applied for weight loss (kcal)
    pub deficit_kcal: f64,
    /// Surplus applied for weight gain (kcal)
    pub surplus_kcal: f64,
    /// Lowest goal ever suggested for weight loss (kcal)
    pub minimum_kcal: f64,
}

impl Default for CalorieGoalConfig {
    fn default() -> Self {
        Self {
            deficit_kcal: 500.0,
            surplus_kcal: 500.0,
            minimum_kcal: 1200.0,
        }
    }
}

/// Share of calories from each macronutrient, as fractions summing to 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroRatio {
    /// Protein share
    pub protein: f64,
    /// Carbohydrate share
    pub carbs: f64,
    /// Fat share
    pub fats: f64,
}

/// Macro shares per fitness goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroRatioConfig {
    /// 40/30/30 for weight loss
    pub lose: MacroRatio,
    /// 30/40/30 for maintenance
    pub maintain: MacroRatio,
    /// 30/45/25 for weight gain
    pub gain: MacroRatio,
}

impl MacroRatioConfig {
    /// Ratio for a goal
    #[must_use]
    pub const fn for_goal(&self, goal: FitnessGoal) -> MacroRatio {
        match goal {
            FitnessGoal::Lose => self.lose,
            FitnessGoal::Maintain => self.maintain,
            FitnessGoal::Gain => self.gain,
        }
    }
}

impl Default for MacroRatioConfig {
    fn default() -> Self {
        Self {
            lose: MacroRatio {
                protein: 0.40,
                carbs: 0.30,
                fats: 0.30,
            },
            maintain: MacroRatio {
                protein: 0.30,
                carbs: 0.40,
                fats: 0.30,
            },
            gain: MacroRatio {
                protein: 0.30,
                carbs: 0.45,
                fats: 0.25,
            },
        }
    }
}
