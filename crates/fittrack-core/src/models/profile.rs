// ABOUTME: User profile model with biometric enums used by the health calculators
// ABOUTME: Gender, ActivityLevel, FitnessGoal parsing and UserProfile validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ensure_in_range, ensure_not_blank, Validate};
use crate::constants::limits;
use crate::errors::{AppError, AppResult};

/// Gender for BMR calculations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male (+5 kcal Mifflin-St Jeor constant)
    Male,
    /// Female (-161 kcal Mifflin-St Jeor constant)
    Female,
}

impl Gender {
    /// Lowercase identifier as stored
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl FromStr for Gender {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            other => Err(AppError::invalid_input(format!(
                "Unrecognized gender '{other}' (expected 'male' or 'female')"
            ))),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise or a physical job
    VeryActive,
}

impl ActivityLevel {
    /// All levels, least to most active
    pub const ALL: [Self; 5] = [
        Self::Sedentary,
        Self::Light,
        Self::Moderate,
        Self::Active,
        Self::VeryActive,
    ];

    /// Identifier as stored
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Active => "active",
            Self::VeryActive => "veryActive",
        }
    }

    /// Short human-readable description
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Sedentary => "Sedentary (little or no exercise)",
            Self::Light => "Lightly active (1-3 days/week)",
            Self::Moderate => "Moderately active (3-5 days/week)",
            Self::Active => "Very active (6-7 days/week)",
            Self::VeryActive => "Extra active (physical job or 2x training)",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "sedentary" => Ok(Self::Sedentary),
            "light" | "lightlyactive" => Ok(Self::Light),
            "moderate" | "moderatelyactive" => Ok(Self::Moderate),
            "active" => Ok(Self::Active),
            "veryactive" | "extraactive" => Ok(Self::VeryActive),
            _ => Err(AppError::invalid_input(format!(
                "Unrecognized activity level '{s}' (expected sedentary, light, moderate, active or veryActive)"
            ))),
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body-weight goal that drives the calorie offset and macro ratios
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FitnessGoal {
    /// Caloric deficit
    Lose,
    /// Caloric balance
    Maintain,
    /// Caloric surplus
    Gain,
}

impl FitnessGoal {
    /// Identifier as stored
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lose => "lose",
            Self::Maintain => "maintain",
            Self::Gain => "gain",
        }
    }
}

impl FromStr for FitnessGoal {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lose" | "loss" | "cut" => Ok(Self::Lose),
            "maintain" | "maintenance" => Ok(Self::Maintain),
            "gain" | "bulk" => Ok(Self::Gain),
            other => Err(AppError::invalid_input(format!(
                "Unrecognized fitness goal '{other}' (expected lose, maintain or gain)"
            ))),
        }
    }
}

impl fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile screen record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Display name
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Gender used for BMR
    pub gender: Gender,
    /// Height in centimetres
    #[serde(rename = "height")]
    pub height_cm: f64,
    /// Current body weight in kilograms
    #[serde(rename = "currentWeight")]
    pub current_weight_kg: f64,
    /// Target body weight in kilograms
    #[serde(rename = "goalWeight", default, skip_serializing_if = "Option::is_none")]
    pub goal_weight_kg: Option<f64>,
    /// Typical weekly activity
    pub activity_level: ActivityLevel,
    /// Weight goal
    pub fitness_goal: FitnessGoal,
    /// Day the profile was created
    pub join_date: NaiveDate,
}

impl UserProfile {
    /// Kilograms left to reach the goal weight (negative when gaining)
    #[must_use]
    pub fn weight_to_goal_kg(&self) -> Option<f64> {
        self.goal_weight_kg
            .map(|goal| self.current_weight_kg - goal)
    }
}

impl Validate for UserProfile {
    fn validate(&self) -> AppResult<()> {
        ensure_not_blank("name", &self.name)?;
        if !(limits::MIN_AGE..=limits::MAX_AGE).contains(&self.age) {
            return Err(AppError::out_of_range(format!(
                "age must be between {} and {}",
                limits::MIN_AGE,
                limits::MAX_AGE
            )));
        }
        ensure_in_range(
            "height",
            self.height_cm,
            limits::MIN_HEIGHT_CM,
            limits::MAX_HEIGHT_CM,
        )?;
        ensure_in_range(
            "currentWeight",
            self.current_weight_kg,
            limits::MIN_WEIGHT_KG,
            limits::MAX_WEIGHT_KG,
        )?;
        if let Some(goal) = self.goal_weight_kg {
            ensure_in_range(
                "goalWeight",
                goal,
                limits::MIN_WEIGHT_KG,
                limits::MAX_WEIGHT_KG,
            )?;
        }
        Ok(())
    }
}
