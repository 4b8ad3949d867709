// ABOUTME: Markdown progress report across every tracker
// ABOUTME: Profile, targets, today's food and water, workout history and saved analyses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Progress Report
//!
//! A shareable Markdown summary of the user's data. Rendering is pure over
//! [`ReportData`]; [`ReportData::load`] gathers it from the store with the
//! same missing-data tolerance as the coach.

use std::fmt::Write as _;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::coach::context::{AssistantContext, ContextSources};
use crate::constants::{hydration::ML_PER_GLASS, storage_keys as keys};
use crate::models::{MealEntry, WorkoutSession};
use crate::storage::{or_missing, TrackerStore};
use crate::trackers::{percent_of, ProfileSummary};

/// Sessions listed in the recent-workouts table
pub const RECENT_WORKOUTS_SHOWN: usize = 5;

/// Everything the report renders
#[derive(Debug, Clone)]
pub struct ReportData {
    /// Aggregates shared with the coach
    pub context: AssistantContext,
    /// Most recent sessions, newest first
    pub recent_workouts: Vec<WorkoutSession>,
    /// Today's meals in logging order
    pub meals_today: Vec<MealEntry>,
}

impl ReportData {
    /// Build report data from raw stored values
    #[must_use]
    pub fn from_sources(sources: ContextSources, today: NaiveDate, water_goal: u32) -> Self {
        let mut recent_workouts = sources.workouts.clone();
        recent_workouts.sort_by(|a, b| b.date.cmp(&a.date));
        recent_workouts.truncate(RECENT_WORKOUTS_SHOWN);
        let meals_today = sources
            .meal_log
            .as_ref()
            .filter(|log| log.date == today)
            .map(|log| log.meals.clone())
            .unwrap_or_default();
        Self {
            context: AssistantContext::from_sources(sources, today, water_goal),
            recent_workouts,
            meals_today,
        }
    }

    /// Gather report data from the store
    pub async fn load(store: &TrackerStore, today: NaiveDate, water_goal: u32) -> Self {
        let sources = ContextSources {
            profile: or_missing(keys::USER_PROFILE, store.load_profile().await).flatten(),
            targets: or_missing(keys::CALORIE_TARGETS, store.load_calorie_targets().await)
                .flatten(),
            workouts: or_missing(keys::WORKOUT_HISTORY, store.load_workout_history().await)
                .unwrap_or_default(),
            meal_log: or_missing(keys::TODAY_LOG, store.load_meal_log(today).await).flatten(),
            water: or_missing(keys::WATER_INTAKE, store.load_water().await).flatten(),
            analyses: or_missing(keys::SAVED_ANALYSES, store.load_analyses().await)
                .unwrap_or_default(),
        };
        debug!(workouts = sources.workouts.len(), "Loaded report data");
        Self::from_sources(sources, today, water_goal)
    }
}

/// Render the report as Markdown
#[must_use]
pub fn render_markdown(data: &ReportData) -> String {
    let ctx = &data.context;
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "# FitTrack Progress Report\n\n_Generated {}_\n", ctx.today);

    out.push_str("## Profile\n\n");
    match &ctx.profile {
        Some(p) => {
            let _ = writeln!(out, "| Field | Value |\n|---|---|");
            let _ = writeln!(out, "| Name | {} |", p.name);
            let _ = writeln!(out, "| Age | {} |", p.age);
            let _ = writeln!(out, "| Height | {:.0} cm |", p.height_cm);
            let _ = writeln!(out, "| Weight | {:.1} kg |", p.current_weight_kg);
            if let Some(goal) = p.goal_weight_kg {
                let _ = writeln!(out, "| Goal weight | {goal:.1} kg |");
            }
            let _ = writeln!(out, "| Activity | {} |", p.activity_level.description());
            let _ = writeln!(out, "| Goal | {} |", p.fitness_goal);
            match ProfileSummary::for_profile(p) {
                Ok(summary) => {
                    let _ = writeln!(
                        out,
                        "| BMI | {:.1} ({}) |\n| Healthy weight | {:.1} to {:.1} kg |",
                        summary.bmi,
                        summary.classification.category,
                        summary.healthy_range.min_kg,
                        summary.healthy_range.max_kg
                    );
                }
                Err(e) => warn!(error = %e, "Skipping BMI in report"),
            }
            out.push('\n');
        }
        None => out.push_str("No profile saved.\n\n"),
    }

    if let Some(t) = &ctx.targets {
        out.push_str("## Daily Targets\n\n");
        let _ = writeln!(
            out,
            "- BMR: {:.0} kcal\n- TDEE: {:.0} kcal\n- Calorie goal: {:.0} kcal\n- Protein {:.0} g, carbs {:.0} g, fats {:.0} g\n",
            t.bmr, t.tdee, t.goal_calories, t.protein, t.carbs, t.fats
        );
    }

    out.push_str("## Today\n\n");
    let n = &ctx.nutrition;
    match n.goal_calories {
        Some(goal) => {
            let _ = writeln!(
                out,
                "- Calories: {:.0} of {goal:.0} kcal ({}%)",
                n.totals.calories,
                percent_of(n.totals.calories, goal)
            );
        }
        None => {
            let _ = writeln!(out, "- Calories: {:.0} kcal", n.totals.calories);
        }
    }
    let _ = writeln!(out, "- Protein: {:.0} g", n.totals.protein);
    let h = &ctx.hydration;
    let _ = writeln!(
        out,
        "- Water: {} of {} glasses ({} ml)\n",
        h.glasses,
        h.goal,
        h.glasses * ML_PER_GLASS
    );
    if !data.meals_today.is_empty() {
        out.push_str("| Meal | Calories | Protein |\n|---|---|---|\n");
        for meal in &data.meals_today {
            let _ = writeln!(
                out,
                "| {} | {:.0} kcal | {:.0} g |",
                meal.name, meal.calories, meal.protein
            );
        }
        out.push('\n');
    }

    out.push_str("## Workouts\n\n");
    let w = &ctx.workouts;
    if w.total_workouts == 0 {
        out.push_str("No workouts logged.\n\n");
    } else {
        let _ = writeln!(
            out,
            "- Sessions: {} ({} in the last 7 days)\n- Total volume: {:.0} kg\n- Calories burned: {:.0} kcal (average {:.0})\n",
            w.total_workouts,
            w.sessions_last_7_days,
            w.total_volume,
            w.total_calories,
            w.average_calories
        );
        out.push_str("| Date | Exercises | Volume | Calories |\n|---|---|---|---|\n");
        for session in &data.recent_workouts {
            let names: Vec<&str> = session.exercises.iter().map(|e| e.name.as_str()).collect();
            let _ = writeln!(
                out,
                "| {} | {} | {:.0} kg | {:.0} kcal |",
                session.date,
                names.join(", "),
                session.volume,
                session.calories
            );
        }
        out.push('\n');
    }

    out.push_str("## Body Analyses\n\n");
    match &ctx.analyses.latest_name {
        Some(latest) => {
            let _ = writeln!(
                out,
                "{} saved, latest: {latest}.",
                ctx.analyses.count
            );
        }
        None => out.push_str("No analyses saved.\n"),
    }
    out
}
