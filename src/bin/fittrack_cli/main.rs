// ABOUTME: FitTrack CLI - command-line front end for the fitness tracker
// ABOUTME: Calculators, profile, meals, water, workouts, analyses, AI plans, chat and reports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # One-off calculators
//! fittrack-cli calc bmi --weight 70 --height 175
//! fittrack-cli calc targets --weight 70 --height 175 --age 30 --gender male --activity moderate --goal lose
//!
//! # Save a profile and compute daily targets
//! fittrack-cli profile set --name Sam --age 30 --gender female --height 165 --weight 62 --activity light --goal maintain
//! fittrack-cli profile targets --save
//!
//! # Daily logging
//! fittrack-cli meal add "Chicken salad" --calories 450 --protein 38
//! fittrack-cli water add
//! fittrack-cli workout log --exercise "Squat:3x8@80" --calories 300
//!
//! # AI coach (falls back to local answers when offline)
//! fittrack-cli plan --goal gain --level beginner --days 3
//! fittrack-cli chat "How am I doing today?"
//!
//! # Markdown progress report
//! fittrack-cli report --output progress.md
//! ```

mod commands;
mod helpers;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use fittrack::config::AppConfig;
use fittrack::logging::LoggingConfig;
use fittrack::storage::{open_store, TrackerStore};
use tracing::{debug, error};

use commands::{
    analysis::AnalysisCommand, calc::CalcCommand, meal::MealCommand, profile::ProfileCommand,
    water::WaterCommand, workout::WorkoutCommand,
};

#[derive(Parser)]
#[command(
    name = "fittrack-cli",
    about = "FitTrack personal fitness tracker",
    long_about = "Track workouts, meals, water and body analyses, compute health metrics, and ask the AI coach."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Data directory override (defaults to FITTRACK_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<std::path::PathBuf>,

    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Health-metric calculators (no data is saved)
    Calc {
        #[command(subcommand)]
        action: CalcCommand,
    },

    /// Profile and daily targets
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },

    /// Today's meal log
    Meal {
        #[command(subcommand)]
        action: MealCommand,
    },

    /// Today's water intake
    Water {
        #[command(subcommand)]
        action: WaterCommand,
    },

    /// Workout history
    Workout {
        #[command(subcommand)]
        action: WorkoutCommand,
    },

    /// Saved body analyses
    Analysis {
        #[command(subcommand)]
        action: AnalysisCommand,
    },

    /// Generate a weekly workout plan with the AI coach
    Plan(commands::plan::PlanArgs),

    /// Ask the AI coach a question (streams the reply)
    Chat(commands::chat::ChatArgs),

    /// Write a Markdown progress report
    Report {
        /// Output file (prints to stdout when omitted)
        #[arg(long, short = 'o')]
        output: Option<std::path::PathBuf>,
    },
}

/// Shared state for every command
pub struct CliContext {
    /// Environment configuration
    pub config: AppConfig,
    /// Typed store over the on-disk data file
    pub store: TrackerStore,
    /// Day used for daily logs
    pub today: NaiveDate,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    if let Err(e) = logging.init() {
        eprintln!("Failed to initialize logging: {e:#}");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::from_env().context("Invalid configuration")?;
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = dir;
    }
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    debug!(data = %config.storage.store_path().display(), %today, "Starting fittrack-cli");

    let store = TrackerStore::new(open_store(&config.storage));
    let ctx = CliContext {
        config,
        store,
        today,
    };

    match cli.command {
        Command::Calc { action } => commands::calc::run(action)?,
        Command::Profile { action } => commands::profile::run(&ctx, action).await?,
        Command::Meal { action } => commands::meal::run(&ctx, action).await?,
        Command::Water { action } => commands::water::run(&ctx, action).await?,
        Command::Workout { action } => commands::workout::run(&ctx, action).await?,
        Command::Analysis { action } => commands::analysis::run(&ctx, action).await?,
        Command::Plan(args) => commands::plan::run(&ctx, args).await?,
        Command::Chat(args) => commands::chat::run(&ctx, args).await?,
        Command::Report { output } => commands::report::run(&ctx, output.as_deref()).await?,
    }
    Ok(())
}

/// Provider shared by the AI commands, `None` in offline mode
fn llm_provider(ctx: &CliContext) -> Result<Option<Arc<dyn fittrack::llm::LlmProvider>>> {
    let provider = fittrack::llm::ChatProvider::from_config(&ctx.config.llm)
        .context("Failed to initialize the LLM provider")?;
    Ok(provider.map(|p| Arc::new(p) as Arc<dyn fittrack::llm::LlmProvider>))
}
