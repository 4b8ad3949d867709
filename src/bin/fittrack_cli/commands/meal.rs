// ABOUTME: Meal log commands for fittrack-cli
// ABOUTME: Add, remove, list and clear today's meals with calorie progress
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use clap::Subcommand;
use fittrack::errors::AppResult;
use fittrack::models::MealEntry;
use fittrack::trackers::DietTracker;

use crate::helpers::display::display_diet;
use crate::CliContext;

/// Meal subcommands
#[non_exhaustive]
#[derive(Subcommand)]
pub enum MealCommand {
    /// Log a meal for today
    Add {
        /// Meal name
        name: String,
        /// Energy in kcal
        #[arg(long)]
        calories: f64,
        /// Protein in grams
        #[arg(long, default_value = "0")]
        protein: f64,
    },

    /// Remove a meal by its position in today's list
    Remove {
        /// Index shown by `meal list`
        index: usize,
    },

    /// Show today's meals and calorie progress
    List,

    /// Delete all of today's meals
    Clear,
}

/// Run a meal command
pub async fn run(ctx: &CliContext, command: MealCommand) -> AppResult<()> {
    let tracker = DietTracker::new(ctx.store.clone());
    match command {
        MealCommand::Add {
            name,
            calories,
            protein,
        } => {
            let log = tracker
                .add_meal(MealEntry::new(name, calories, protein), ctx.today)
                .await?;
            println!("Meal logged ({} today).", log.meals.len());
        }
        MealCommand::Remove { index } => {
            let removed = tracker.remove_meal(index, ctx.today).await?;
            println!("Removed {}.", removed.name);
        }
        MealCommand::List => {}
        MealCommand::Clear => {
            tracker.clear(ctx.today).await?;
            println!("Today's meals cleared.");
        }
    }
    let log = tracker.today(ctx.today).await?;
    let progress = tracker.progress(ctx.today).await?;
    display_diet(&log, &progress);
    Ok(())
}
