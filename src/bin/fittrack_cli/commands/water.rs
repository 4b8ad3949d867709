// ABOUTME: Water intake commands for fittrack-cli
// ABOUTME: Add, remove or set today's glass count against the daily goal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use clap::Subcommand;
use fittrack::errors::AppResult;
use fittrack::trackers::HydrationTracker;

use crate::helpers::display::display_hydration;
use crate::CliContext;

/// Water subcommands
#[non_exhaustive]
#[derive(Subcommand)]
pub enum WaterCommand {
    /// Drink one glass
    Add,
    /// Undo one glass
    Remove,
    /// Set today's count
    Set {
        /// Glasses drunk today
        glasses: u32,
    },
    /// Show today's progress
    Show,
}

/// Run a water command
pub async fn run(ctx: &CliContext, command: WaterCommand) -> AppResult<()> {
    let tracker = HydrationTracker::with_goal(
        ctx.store.clone(),
        ctx.config.tracker.water_goal_glasses,
    );
    match command {
        WaterCommand::Add => {
            tracker.add_glass(ctx.today).await?;
        }
        WaterCommand::Remove => {
            tracker.remove_glass(ctx.today).await?;
        }
        WaterCommand::Set { glasses } => {
            tracker.set(glasses, ctx.today).await?;
        }
        WaterCommand::Show => {}
    }
    display_hydration(&tracker.progress(ctx.today).await?);
    Ok(())
}
