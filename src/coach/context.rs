// ABOUTME: Assembles the user's tracker data into aggregates for the AI coach
// ABOUTME: Renders the aggregates as the natural-language system prompt sent with every chat
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::constants::{hydration::DEFAULT_DAILY_GOAL_GLASSES, storage_keys as keys};
use crate::llm::prompts::coach_system_prompt;
use crate::models::{
    BodyAnalysis, CalorieTargets, DailyMealLog, NutritionTotals, UserProfile, WaterLog,
    WorkoutSession,
};
use crate::storage::{or_missing, TrackerStore};
use crate::trackers::WorkoutSummary;

/// Raw stored values the context is reduced from
#[derive(Debug, Clone, Default)]
pub struct ContextSources {
    /// Saved profile
    pub profile: Option<UserProfile>,
    /// Saved calorie targets
    pub targets: Option<CalorieTargets>,
    /// Every logged workout
    pub workouts: Vec<WorkoutSession>,
    /// Latest meal log, any day
    pub meal_log: Option<DailyMealLog>,
    /// Latest water log, any day
    pub water: Option<WaterLog>,
    /// Saved body analyses
    pub analyses: Vec<BodyAnalysis>,
}

/// Today's nutrition aggregates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NutritionContext {
    /// Calories and protein eaten today
    pub totals: NutritionTotals,
    /// Calorie goal, when targets are saved
    pub goal_calories: Option<f64>,
    /// Protein goal in grams, when targets are saved
    pub goal_protein: Option<f64>,
}

/// Today's water aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HydrationContext {
    /// Glasses drunk today
    pub glasses: u32,
    /// Daily goal in glasses
    pub goal: u32,
}

/// Saved analysis aggregates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisContext {
    /// Number of saved analyses
    pub count: usize,
    /// Name of the most recent analysis
    pub latest_name: Option<String>,
}

/// Everything the coach knows about the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistantContext {
    /// Day the aggregates were computed for
    pub today: NaiveDate,
    /// Saved profile
    pub profile: Option<UserProfile>,
    /// Saved calorie targets
    pub targets: Option<CalorieTargets>,
    /// Workout aggregates
    pub workouts: WorkoutSummary,
    /// Today's nutrition
    pub nutrition: NutritionContext,
    /// Today's water
    pub hydration: HydrationContext,
    /// Saved analyses
    pub analyses: AnalysisContext,
}

impl AssistantContext {
    /// Reduce raw stored values into aggregates
    ///
    /// Meal and water logs from another day count as empty.
    #[must_use]
    pub fn from_sources(sources: ContextSources, today: NaiveDate, water_goal: u32) -> Self {
        let totals = sources
            .meal_log
            .filter(|log| log.date == today)
            .map(|log| log.totals())
            .unwrap_or_default();
        let glasses = sources
            .water
            .filter(|w| w.date == today)
            .map_or(0, |w| w.glasses);
        let latest_name = sources
            .analyses
            .iter()
            .max_by_key(|a| a.date)
            .map(|a| a.name.clone());

        Self {
            today,
            workouts: WorkoutSummary::summarize(&sources.workouts, today),
            nutrition: NutritionContext {
                totals,
                goal_calories: sources.targets.as_ref().map(|t| t.goal_calories),
                goal_protein: sources.targets.as_ref().map(|t| t.protein),
            },
            hydration: HydrationContext {
                glasses,
                goal: if water_goal == 0 {
                    DEFAULT_DAILY_GOAL_GLASSES
                } else {
                    water_goal
                },
            },
            analyses: AnalysisContext {
                count: sources.analyses.len(),
                latest_name,
            },
            profile: sources.profile,
            targets: sources.targets,
        }
    }

    /// Read every tracker key and reduce it
    ///
    /// Unreadable or malformed keys are treated as missing, so the coach
    /// always has a context to answer from.
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
        let context = Self::from_sources(sources, today, water_goal);
        debug!(
            has_profile = context.profile.is_some(),
            workouts = context.workouts.total_workouts,
            meals = context.nutrition.totals.meal_count,
            "Assembled coach context"
        );
        context
    }

    /// Plain-text summary of the aggregates, one fact per line
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail
        let _ = writeln!(out, "- Today is {}.", self.today);

        match &self.profile {
            Some(p) => {
                let _ = writeln!(
                    out,
                    "- Profile: {}, {} years, {}, {:.0} cm, {:.1} kg, activity {}, goal {}.",
                    p.name,
                    p.age,
                    p.gender.as_str(),
                    p.height_cm,
                    p.current_weight_kg,
                    p.activity_level.as_str(),
                    p.fitness_goal.as_str()
                );
                if let Some(goal) = p.goal_weight_kg {
                    let _ = writeln!(out, "- Goal weight: {goal:.1} kg.");
                }
            }
            None => out.push_str("- No profile saved yet.\n"),
        }

        if let Some(t) = &self.targets {
            let _ = writeln!(
                out,
                "- Targets: BMI {:.1}, BMR {:.0} kcal, TDEE {:.0} kcal, goal {:.0} kcal, protein {:.0} g, carbs {:.0} g, fats {:.0} g.",
                t.bmi, t.bmr, t.tdee, t.goal_calories, t.protein, t.carbs, t.fats
            );
        }

        let w = &self.workouts;
        if w.total_workouts == 0 {
            out.push_str("- No workouts logged yet.\n");
        } else {
            let _ = writeln!(
                out,
                "- Workouts: {} logged, total volume {:.0} kg, average {:.0} kcal per session, {} in the last 7 days.",
                w.total_workouts, w.total_volume, w.average_calories, w.sessions_last_7_days
            );
        }

        let n = &self.nutrition;
        let _ = write!(
            out,
            "- Today's food: {:.0} kcal and {:.0} g protein across {} meals",
            n.totals.calories, n.totals.protein, n.totals.meal_count
        );
        match n.goal_calories {
            Some(goal) => {
                let _ = writeln!(out, " (goal {goal:.0} kcal).");
            }
            None => out.push_str(".\n"),
        }

        let _ = writeln!(
            out,
            "- Water: {} of {} glasses today.",
            self.hydration.glasses, self.hydration.goal
        );

        match &self.analyses.latest_name {
            Some(name) => {
                let _ = writeln!(
                    out,
                    "- Body analyses saved: {} (latest: {name}).",
                    self.analyses.count
                );
            }
            None => out.push_str("- No body analyses saved.\n"),
        }
        out
    }

    /// System prompt: coach persona followed by the user's summary
    #[must_use]
    pub fn system_prompt(&self) -> String {
        format!("{}\n{}", coach_system_prompt().trim_end(), self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MealEntry, WaterLog};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_stale_logs_count_as_empty() {
        let mut log = DailyMealLog::empty(day(1));
        log.meals.push(MealEntry::new("Oats", 350.0, 12.0));
        let sources = ContextSources {
            meal_log: Some(log),
            water: Some(WaterLog {
                glasses: 5,
                date: day(1),
            }),
            ..ContextSources::default()
        };
        let ctx = AssistantContext::from_sources(sources, day(2), 8);
        assert_eq!(ctx.nutrition.totals.meal_count, 0);
        assert_eq!(ctx.hydration.glasses, 0);
        assert_eq!(ctx.hydration.goal, 8);
    }

    #[test]
    fn test_summary_mentions_missing_data() {
        let ctx = AssistantContext::from_sources(ContextSources::default(), day(2), 8);
        let summary = ctx.summary();
        assert!(summary.contains("No profile saved yet"));
        assert!(summary.contains("No workouts logged yet"));
        assert!(summary.contains("0 of 8 glasses"));
        assert!(ctx.system_prompt().starts_with("You are FitTrack Coach"));
    }
}
