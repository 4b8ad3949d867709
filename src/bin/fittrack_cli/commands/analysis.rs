// ABOUTME: Body-analysis commands for fittrack-cli
// ABOUTME: Save photos with target areas, list, export and delete saved analyses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::PathBuf;

use clap::Subcommand;
use fittrack::errors::{AppError, AppResult};
use fittrack::models::BodyAnalysis;
use fittrack::trackers::AnalysisTracker;
use uuid::Uuid;

use crate::helpers::display::{display_analysis, print_header};
use crate::CliContext;

/// Analysis subcommands
#[non_exhaustive]
#[derive(Subcommand)]
pub enum AnalysisCommand {
    /// Save a photo analysis
    Add {
        /// Analysis name
        #[arg(long)]
        name: String,
        /// Body area to track (repeatable)
        #[arg(long = "area", required = true)]
        areas: Vec<String>,
        /// Photo file
        #[arg(long)]
        image: PathBuf,
    },

    /// List saved analyses
    List,

    /// Write an analysis photo to a file
    Export {
        /// Analysis id
        id: Uuid,
        /// Destination file
        #[arg(long, short = 'o')]
        output: PathBuf,
    },

    /// Delete an analysis
    Delete {
        /// Analysis id
        id: Uuid,
    },
}

/// Run an analysis command
pub async fn run(ctx: &CliContext, command: AnalysisCommand) -> AppResult<()> {
    let tracker = AnalysisTracker::new(ctx.store.clone());
    match command {
        AnalysisCommand::Add { name, areas, image } => {
            let bytes = tokio::fs::read(&image).await.map_err(|e| {
                AppError::invalid_input(format!("Cannot read image {}: {e}", image.display()))
            })?;
            let analysis = tracker
                .add(BodyAnalysis::new(name, areas, ctx.today, &bytes))
                .await?;
            println!("Analysis saved.");
            display_analysis(&analysis);
        }
        AnalysisCommand::List => {
            print_header("Saved Analyses");
            let analyses = tracker.list().await?;
            if analyses.is_empty() {
                println!("   No analyses saved.");
            }
            for analysis in &analyses {
                display_analysis(analysis);
            }
        }
        AnalysisCommand::Export { id, output } => {
            let analysis = tracker.get(id).await?;
            tokio::fs::write(&output, analysis.image_bytes()?).await?;
            println!("Wrote {} to {}.", analysis.name, output.display());
        }
        AnalysisCommand::Delete { id } => {
            let removed = tracker.delete(id).await?;
            println!("Deleted {}.", removed.name);
        }
    }
    Ok(())
}
