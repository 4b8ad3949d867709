// ABOUTME: Workout commands for fittrack-cli
// ABOUTME: Log sessions from compact exercise strings, list history, remove sessions, summarize
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use clap::Subcommand;
use fittrack::errors::{AppError, AppResult};
use fittrack::models::{ExerciseEntry, WorkoutSession};
use fittrack::trackers::WorkoutTracker;
use uuid::Uuid;

use crate::helpers::display::{display_session, display_workout_summary, print_header};
use crate::CliContext;

/// Workout subcommands
#[non_exhaustive]
#[derive(Subcommand)]
pub enum WorkoutCommand {
    /// Log a session for today
    Log {
        /// Exercise as NAME:SETSxREPS[@KG], e.g. "Bench Press:3x8@60" (repeatable)
        #[arg(long = "exercise", short = 'e', required = true)]
        exercises: Vec<String>,
        /// Estimated calories burned
        #[arg(long, default_value = "0")]
        calories: f64,
        /// Session length in minutes
        #[arg(long)]
        duration: Option<u32>,
    },

    /// Show recent sessions, newest first
    List {
        /// Number of sessions to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Delete a session by id
    Remove {
        /// Session id shown by `workout list`
        id: Uuid,
    },

    /// Totals and recent activity
    Summary,
}

/// Parse `NAME:SETSxREPS[@KG]`
fn parse_exercise(raw: &str) -> AppResult<ExerciseEntry> {
    let invalid = || {
        AppError::invalid_input(format!(
            "Invalid exercise '{raw}' (expected NAME:SETSxREPS[@KG])"
        ))
    };
    let (name, rest) = raw.rsplit_once(':').ok_or_else(invalid)?;
    let (volume, weight) = rest
        .split_once('@')
        .map_or((rest, None), |(v, w)| (v, Some(w)));
    let (sets, reps) = volume
        .to_lowercase()
        .split_once('x')
        .map(|(s, r)| (s.trim().parse::<u32>(), r.trim().parse::<u32>()))
        .ok_or_else(invalid)?;
    let weight_kg = match weight {
        Some(w) => w
            .trim()
            .trim_end_matches("kg")
            .parse::<f64>()
            .map_err(|_| invalid())?,
        None => 0.0,
    };
    Ok(ExerciseEntry {
        name: name.trim().to_owned(),
        sets: sets.map_err(|_| invalid())?,
        reps: reps.map_err(|_| invalid())?,
        weight_kg,
    })
}

/// Run a workout command
pub async fn run(ctx: &CliContext, command: WorkoutCommand) -> AppResult<()> {
    let tracker = WorkoutTracker::new(ctx.store.clone());
    match command {
        WorkoutCommand::Log {
            exercises,
            calories,
            duration,
        } => {
            let exercises = exercises
                .iter()
                .map(|raw| parse_exercise(raw))
                .collect::<AppResult<Vec<_>>>()?;
            let mut session = WorkoutSession::new(ctx.today, exercises, calories);
            if let Some(minutes) = duration {
                session = session.with_duration(minutes);
            }
            let session = tracker.log(session).await?;
            println!("Workout logged.");
            display_session(&session);
        }
        WorkoutCommand::List { limit } => {
            print_header("Recent Workouts");
            let recent = tracker.recent(limit).await?;
            if recent.is_empty() {
                println!("   No workouts logged yet.");
            }
            for session in &recent {
                display_session(session);
            }
        }
        WorkoutCommand::Remove { id } => {
            let removed = tracker.remove(id).await?;
            println!("Removed workout from {}.", removed.date);
        }
        WorkoutCommand::Summary => {
            display_workout_summary(&tracker.summary(ctx.today).await?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exercise_strings() {
        let bench = parse_exercise("Bench Press:3x8@60").unwrap();
        assert_eq!(bench.name, "Bench Press");
        assert_eq!((bench.sets, bench.reps), (3, 8));
        assert!((bench.weight_kg - 60.0).abs() < f64::EPSILON);

        let pushups = parse_exercise("Push-Up:4X15").unwrap();
        assert!(pushups.weight_kg.abs() < f64::EPSILON);

        assert!(parse_exercise("Squat").is_err());
        assert!(parse_exercise("Squat:threex5").is_err());
    }
}
