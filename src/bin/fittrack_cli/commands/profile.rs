// ABOUTME: Profile commands for fittrack-cli
// ABOUTME: Save and show the profile, record weight, compute targets, and reset all data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use clap::Subcommand;
use fittrack::errors::{AppError, AppResult};
use fittrack::models::{ActivityLevel, FitnessGoal, Gender, UserProfile};
use fittrack::trackers::{ProfileSummary, ProfileTracker};
use tracing::{info, warn};

use crate::helpers::display::{display_profile, display_targets};
use crate::CliContext;

/// Profile subcommands
#[non_exhaustive]
#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Create or replace the profile
    Set {
        /// Display name
        #[arg(long)]
        name: String,
        /// Age in years
        #[arg(long)]
        age: u32,
        /// male or female
        #[arg(long)]
        gender: Gender,
        /// Height in centimetres
        #[arg(long)]
        height: f64,
        /// Current weight in kilograms
        #[arg(long)]
        weight: f64,
        /// Goal weight in kilograms
        #[arg(long)]
        goal_weight: Option<f64>,
        /// sedentary, light, moderate, active or veryActive
        #[arg(long)]
        activity: ActivityLevel,
        /// lose, maintain or gain
        #[arg(long)]
        goal: FitnessGoal,
    },

    /// Show the profile with BMI and healthy range
    Show,

    /// Record a new body weight
    Weight {
        /// Weight in kilograms
        kg: f64,
    },

    /// Calculate daily calorie and macro targets from the profile
    Targets {
        /// Save the targets for the diet tracker and coach
        #[arg(long)]
        save: bool,
    },

    /// Delete every stored tracker value
    Reset {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

/// Run a profile command
pub async fn run(ctx: &CliContext, command: ProfileCommand) -> AppResult<()> {
    let tracker = ProfileTracker::new(ctx.store.clone());
    match command {
        ProfileCommand::Set {
            name,
            age,
            gender,
            height,
            weight,
            goal_weight,
            activity,
            goal,
        } => {
            // Keep the original join date when replacing a profile
            let join_date = tracker
                .load()
                .await?
                .map_or(ctx.today, |existing| existing.join_date);
            let profile = UserProfile {
                name,
                age,
                gender,
                height_cm: height,
                current_weight_kg: weight,
                goal_weight_kg: goal_weight,
                activity_level: activity,
                fitness_goal: goal,
                join_date,
            };
            tracker.save(&profile).await?;
            println!("Profile saved for {}.", profile.name);
            display_profile(&profile, &ProfileSummary::for_profile(&profile)?);
        }
        ProfileCommand::Show => {
            let profile = tracker.require().await.map_err(|e| {
                warn!(error = %e, "No profile to show");
                AppError::not_found("User profile (run `fittrack-cli profile set` first)")
            })?;
            display_profile(&profile, &ProfileSummary::for_profile(&profile)?);
            if let Some(targets) = tracker.targets().await? {
                display_targets(&targets);
            }
        }
        ProfileCommand::Weight { kg } => {
            let profile = tracker.update_weight(kg).await?;
            println!("Weight updated to {:.1} kg.", profile.current_weight_kg);
        }
        ProfileCommand::Targets { save } => {
            let targets = if save {
                tracker.recalculate_targets().await?
            } else {
                let profile = tracker.require().await?;
                tracker.calculate_targets(&profile)?
            };
            display_targets(&targets);
            if save {
                println!("\nTargets saved.");
            }
        }
        ProfileCommand::Reset { yes } => {
            if !yes {
                return Err(AppError::invalid_input(
                    "Refusing to delete all data without --yes",
                ));
            }
            ctx.store.clear_all().await?;
            info!("All tracker data deleted");
            println!("All tracker data deleted.");
        }
    }
    Ok(())
}
