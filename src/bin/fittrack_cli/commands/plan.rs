// ABOUTME: Workout-plan command for fittrack-cli
// ABOUTME: Asks the AI coach for a weekly plan, printing a template plan when it cannot answer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use clap::Args;
use fittrack::coach::{ExperienceLevel, PlanRequest, WorkoutPlanner};
use fittrack::constants::storage_keys;
use fittrack::models::FitnessGoal;
use fittrack::storage::or_missing;

use crate::helpers::display::display_plan;
use crate::{llm_provider, CliContext};

/// Plan generation arguments
#[derive(Args)]
pub struct PlanArgs {
    /// lose, maintain or gain (defaults to the profile's goal)
    #[arg(long)]
    goal: Option<FitnessGoal>,
    /// beginner, intermediate or advanced
    #[arg(long, default_value = "beginner")]
    level: ExperienceLevel,
    /// Training days per week (1-7)
    #[arg(long, default_value = "3")]
    days: u32,
    /// Preferences such as equipment or injuries
    #[arg(long)]
    notes: Option<String>,
    /// Print the plan as JSON
    #[arg(long)]
    json: bool,
}

/// Generate and print a plan
pub async fn run(ctx: &CliContext, args: PlanArgs) -> Result<()> {
    let profile =
        or_missing(storage_keys::USER_PROFILE, ctx.store.load_profile().await).flatten();
    let goal = args
        .goal
        .or_else(|| profile.as_ref().map(|p| p.fitness_goal))
        .unwrap_or(FitnessGoal::Maintain);

    let mut request = PlanRequest::new(goal, args.level, args.days)?;
    if let Some(notes) = args.notes {
        request = request.with_notes(notes);
    }

    let planner = WorkoutPlanner::new(llm_provider(ctx)?).with_llm_config(&ctx.config.llm);
    let generated = planner.generate(&request, profile.as_ref()).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&generated)?);
    } else {
        display_plan(&generated);
    }
    Ok(())
}
