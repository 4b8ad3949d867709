// ABOUTME: Chat command for fittrack-cli
// ABOUTME: Streams coach replies to the terminal; Ctrl-C cancels the reply in progress
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use fittrack::coach::{AssistantContext, CoachSession, ReplyOutcome};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::{llm_provider, CliContext};

/// Chat arguments
#[derive(Args)]
pub struct ChatArgs {
    /// Question to ask; starts an interactive session when omitted
    message: Option<String>,
}

/// Ask one question, or chat until `exit`
pub async fn run(ctx: &CliContext, args: ChatArgs) -> Result<()> {
    let context = AssistantContext::load(
        &ctx.store,
        ctx.today,
        ctx.config.tracker.water_goal_glasses,
    )
    .await;
    let mut session =
        CoachSession::new(llm_provider(ctx)?, context).with_llm_config(&ctx.config.llm);
    if session.is_offline() {
        eprintln!("(offline mode: answers come from your tracker data only)");
    }

    if let Some(message) = args.message {
        ask(&mut session, &message).await;
        return Ok(());
    }

    println!("FitTrack Coach. Type `exit` to quit, Ctrl-C stops a reply.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\nyou> ");
        io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if matches!(message, "exit" | "quit") {
            break;
        }
        ask(&mut session, message).await;
    }
    Ok(())
}

async fn ask(session: &mut CoachSession, message: &str) {
    print!("coach> ");
    // Terminal writes are best effort
    let _ = io::stdout().flush();

    let (handle, reply) = session.stream_reply(message, |delta| {
        print!("{delta}");
        let _ = io::stdout().flush();
    });
    tokio::pin!(reply);
    let reply = tokio::select! {
        reply = &mut reply => reply,
        _ = tokio::signal::ctrl_c() => {
            handle.cancel();
            reply.await
        }
    };

    match &reply.outcome {
        ReplyOutcome::Completed => println!(),
        ReplyOutcome::Cancelled => println!(" [stopped]"),
        ReplyOutcome::Fallback { reason } => {
            debug!(%reason, "Showing fallback reply");
            // Streamed text, if any, is replaced by the fallback
            if reply.chunks_received > 0 {
                println!("\n[connection lost, answering offline]");
            }
            println!("{}", reply.text);
        }
    }
}
