// ABOUTME: Calculator commands for fittrack-cli
// ABOUTME: BMI, BMR, TDEE and full nutrition targets without touching the store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Local;
use clap::Subcommand;
use fittrack::config::HealthMetricsConfig;
use fittrack::errors::AppResult;
use fittrack::intelligence::health_metrics::{
    bmi_category, calculate_bmi, calculate_bmr, calculate_nutrition_targets, calculate_tdee,
    ideal_weight_range,
};
use fittrack::models::{ActivityLevel, FitnessGoal, Gender, UserProfile};

use crate::helpers::display::{display_targets, print_header};

/// Calculator subcommands
#[non_exhaustive]
#[derive(Subcommand)]
pub enum CalcCommand {
    /// Body Mass Index with category and healthy weight range
    Bmi {
        /// Weight in kilograms
        #[arg(long)]
        weight: f64,
        /// Height in centimetres
        #[arg(long)]
        height: f64,
    },

    /// Basal Metabolic Rate (Mifflin-St Jeor)
    Bmr {
        /// Weight in kilograms
        #[arg(long)]
        weight: f64,
        /// Height in centimetres
        #[arg(long)]
        height: f64,
        /// Age in years
        #[arg(long)]
        age: u32,
        /// male or female
        #[arg(long)]
        gender: Gender,
    },

    /// Total Daily Energy Expenditure from a BMR
    Tdee {
        /// BMR in kcal
        #[arg(long)]
        bmr: f64,
        /// sedentary, light, moderate, active or veryActive
        #[arg(long)]
        activity: ActivityLevel,
    },

    /// Full chain: BMI, BMR, TDEE, calorie goal and macros
    Targets {
        /// Weight in kilograms
        #[arg(long)]
        weight: f64,
        /// Height in centimetres
        #[arg(long)]
        height: f64,
        /// Age in years
        #[arg(long)]
        age: u32,
        /// male or female
        #[arg(long)]
        gender: Gender,
        /// sedentary, light, moderate, active or veryActive
        #[arg(long)]
        activity: ActivityLevel,
        /// lose, maintain or gain
        #[arg(long)]
        goal: FitnessGoal,
    },
}

/// Run a calculator
pub fn run(command: CalcCommand) -> AppResult<()> {
    let config = HealthMetricsConfig::default();
    match command {
        CalcCommand::Bmi { weight, height } => {
            let bmi = calculate_bmi(weight, height)?;
            let class = bmi_category(bmi)?;
            let range = ideal_weight_range(height)?;
            print_header("BMI");
            println!("   BMI:      {bmi:.1}");
            println!("   Category: {} ({})", class.category, class.color.as_str());
            println!(
                "   Healthy weight for {height:.0} cm: {:.1} to {:.1} kg",
                range.min_kg, range.max_kg
            );
        }
        CalcCommand::Bmr {
            weight,
            height,
            age,
            gender,
        } => {
            let bmr = calculate_bmr(weight, height, age, gender, &config.bmr)?;
            println!("BMR: {bmr:.0} kcal/day");
        }
        CalcCommand::Tdee { bmr, activity } => {
            let tdee = calculate_tdee(bmr, activity, &config.activity_factors)?;
            println!("TDEE ({}): {tdee:.0} kcal/day", activity.description());
        }
        CalcCommand::Targets {
            weight,
            height,
            age,
            gender,
            activity,
            goal,
        } => {
            let profile = UserProfile {
                name: "calculator".to_owned(),
                age,
                gender,
                height_cm: height,
                current_weight_kg: weight,
                goal_weight_kg: None,
                activity_level: activity,
                fitness_goal: goal,
                join_date: Local::now().date_naive(),
            };
            let targets = calculate_nutrition_targets(&profile, &config)?;
            display_targets(&targets);
        }
    }
    Ok(())
}
