// ABOUTME: Report command for fittrack-cli
// ABOUTME: Renders the Markdown progress report to stdout or a file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;

use fittrack::errors::AppResult;
use fittrack::report::{render_markdown, ReportData};
use tracing::info;

use crate::CliContext;

/// Render the report
pub async fn run(ctx: &CliContext, output: Option<&Path>) -> AppResult<()> {
    let data = ReportData::load(
        &ctx.store,
        ctx.today,
        ctx.config.tracker.water_goal_glasses,
    )
    .await;
    let markdown = render_markdown(&data);
    match output {
        Some(path) => {
            tokio::fs::write(path, markdown).await?;
            info!(path = %path.display(), "Report written");
            println!("Report written to {}.", path.display());
        }
        None => print!("{markdown}"),
    }
    Ok(())
}
