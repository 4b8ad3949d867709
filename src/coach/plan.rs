// ABOUTME: One-shot AI workout-plan generation with a strict JSON schema
// ABOUTME: Single parse-or-fallback decision: valid model JSON, otherwise a local template plan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Plan Generation
//!
//! The planner asks the model for a [`WorkoutPlan`] document. The response
//! (optionally wrapped in one Markdown code fence) must deserialize and
//! validate; otherwise, or on any provider error, a deterministic template
//! plan for the requested goal, level and days is returned instead.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::LlmConfig;
use crate::errors::{AppError, AppResult};
use crate::llm::prompts::workout_plan_prompt;
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::logging::AppLogger;
use crate::models::{FitnessGoal, UserProfile, Validate};

/// Fewest training days a plan may have
pub const MIN_DAYS_PER_WEEK: u32 = 1;
/// Most training days a plan may have
pub const MAX_DAYS_PER_WEEK: u32 = 7;

/// Training experience of the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    /// New to training
    #[default]
    Beginner,
    /// Trains regularly
    Intermediate,
    /// Years of structured training
    Advanced,
}

impl ExperienceLevel {
    /// Lowercase identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    const fn sets(self) -> u32 {
        match self {
            Self::Beginner => 2,
            Self::Intermediate => 3,
            Self::Advanced => 4,
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(AppError::invalid_input(format!(
                "Unknown experience level '{other}' (expected beginner, intermediate or advanced)"
            ))),
        }
    }
}

/// What the user asked the planner for
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanRequest {
    /// Training goal
    pub goal: FitnessGoal,
    /// Experience level
    pub level: ExperienceLevel,
    /// Training days per week
    pub days_per_week: u32,
    /// Free-text preferences (equipment, injuries, focus)
    pub notes: Option<String>,
}

impl PlanRequest {
    /// Request with no extra notes
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` if `days_per_week` is outside 1..=7
    pub fn new(goal: FitnessGoal, level: ExperienceLevel, days_per_week: u32) -> AppResult<Self> {
        let request = Self {
            goal,
            level,
            days_per_week,
            notes: None,
        };
        request.validate()?;
        Ok(request)
    }

    /// Attach free-text preferences
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    fn prompt(&self, profile: Option<&UserProfile>) -> String {
        let mut prompt = format!(
            "{}\n## User\n\n- Goal: {}\n- Experience: {}\n- Training days per week: {}\n",
            workout_plan_prompt().trim_end(),
            self.goal.as_str(),
            self.level,
            self.days_per_week
        );
        if let Some(p) = profile {
            prompt.push_str(&format!(
                "- Age: {}\n- Gender: {}\n- Weight: {:.1} kg\n- Activity: {}\n",
                p.age,
                p.gender.as_str(),
                p.current_weight_kg,
                p.activity_level.as_str()
            ));
        }
        if let Some(notes) = &self.notes {
            prompt.push_str(&format!("- Preferences: {notes}\n"));
        }
        prompt
    }
}

impl Validate for PlanRequest {
    fn validate(&self) -> AppResult<()> {
        if (MIN_DAYS_PER_WEEK..=MAX_DAYS_PER_WEEK).contains(&self.days_per_week) {
            Ok(())
        } else {
            Err(AppError::out_of_range(format!(
                "days_per_week must be between {MIN_DAYS_PER_WEEK} and {MAX_DAYS_PER_WEEK}"
            )))
        }
    }
}

/// One exercise prescription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedExercise {
    /// Exercise name
    pub name: String,
    /// Working sets
    pub sets: u32,
    /// Repetitions per set
    pub reps: u32,
    /// Rest between sets
    pub rest_seconds: u32,
}

/// One training day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDay {
    /// Day label, e.g. "Day 1"
    pub day: String,
    /// Focus of the session
    pub focus: String,
    /// Exercises in order
    pub exercises: Vec<PlannedExercise>,
}

/// A weekly workout plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    /// Plan title
    pub title: String,
    /// Training days per week
    pub days_per_week: u32,
    /// One entry per training day
    pub days: Vec<PlanDay>,
    /// General advice
    #[serde(default)]
    pub notes: Vec<String>,
}

impl Validate for WorkoutPlan {
    fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::invalid_input("plan title is empty"));
        }
        if !(MIN_DAYS_PER_WEEK..=MAX_DAYS_PER_WEEK).contains(&self.days_per_week) {
            return Err(AppError::out_of_range(format!(
                "days_per_week {} is outside {MIN_DAYS_PER_WEEK}..={MAX_DAYS_PER_WEEK}",
                self.days_per_week
            )));
        }
        if self.days.len() != self.days_per_week as usize {
            return Err(AppError::invalid_input(format!(
                "plan lists {} days but days_per_week is {}",
                self.days.len(),
                self.days_per_week
            )));
        }
        for day in &self.days {
            if day.exercises.is_empty() {
                return Err(AppError::invalid_input(format!(
                    "{} has no exercises",
                    day.day
                )));
            }
            if let Some(bad) = day
                .exercises
                .iter()
                .find(|e| e.name.trim().is_empty() || e.sets == 0 || e.reps == 0)
            {
                return Err(AppError::invalid_input(format!(
                    "invalid exercise '{}' on {}",
                    bad.name, day.day
                )));
            }
        }
        Ok(())
    }
}

/// Where a plan came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PlanSource {
    /// Parsed from the model's response
    Model,
    /// Local template
    Fallback {
        /// Why the model's plan was not used
        reason: String,
    },
}

/// Planner output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedPlan {
    /// The plan to show
    pub plan: WorkoutPlan,
    /// Where it came from
    pub source: PlanSource,
}

/// Parse a model response into a validated plan
///
/// # Errors
///
/// Returns a parse error for malformed JSON and a validation error for a
/// plan that breaks the schema rules
pub fn parse_plan_response(text: &str) -> AppResult<WorkoutPlan> {
    let plan: WorkoutPlan = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| AppError::parse(format!("Workout plan is not valid JSON: {e}")))?;
    plan.validate()?;
    Ok(plan)
}

/// Reject a well-formed plan that answers a different question
fn ensure_matches_request(plan: WorkoutPlan, request: &PlanRequest) -> AppResult<WorkoutPlan> {
    if plan.days_per_week != request.days_per_week {
        return Err(AppError::invalid_input(format!(
            "plan has {} training days but {} were requested",
            plan.days_per_week, request.days_per_week
        )));
    }
    Ok(plan)
}

/// Remove one surrounding Markdown code fence, if present
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn exercise(name: &str, sets: u32, reps: u32, rest_seconds: u32) -> PlannedExercise {
    PlannedExercise {
        name: name.to_owned(),
        sets,
        reps,
        rest_seconds,
    }
}

/// Deterministic template plan for a request
#[must_use]
pub fn fallback_plan(request: &PlanRequest) -> WorkoutPlan {
    let sets = request.level.sets();
    let (reps, rest, title, cardio_note) = match request.goal {
        FitnessGoal::Lose => (
            15,
            45,
            "Fat-Loss Circuit Plan",
            "Add 20-30 minutes of brisk walking or cycling on rest days.",
        ),
        FitnessGoal::Maintain => (
            12,
            60,
            "Balanced Fitness Plan",
            "Mix in one or two easy cardio sessions each week.",
        ),
        FitnessGoal::Gain => (
            8,
            120,
            "Muscle-Building Plan",
            "Eat in a small calorie surplus with plenty of protein.",
        ),
    };

    let rotation: [(&str, [&str; 3]); 3] = [
        ("Lower body", ["Goblet Squat", "Romanian Deadlift", "Walking Lunge"]),
        ("Upper body push", ["Push-Up", "Overhead Press", "Dips"]),
        ("Upper body pull", ["Bent-Over Row", "Lat Pulldown", "Face Pull"]),
    ];

    let days = (0..request.days_per_week)
        .map(|i| {
            let (focus, names) = rotation[i as usize % rotation.len()];
            let mut exercises: Vec<PlannedExercise> = names
                .iter()
                .map(|name| exercise(name, sets, reps, rest))
                .collect();
            exercises.push(exercise("Plank", sets, 1, 60));
            PlanDay {
                day: format!("Day {}", i + 1),
                focus: focus.to_owned(),
                exercises,
            }
        })
        .collect();

    WorkoutPlan {
        title: format!("{title} ({}, {} days)", request.level, request.days_per_week),
        days_per_week: request.days_per_week,
        days,
        notes: vec![
            "Warm up for 5-10 minutes before every session.".to_owned(),
            cardio_note.to_owned(),
            "Increase weight or reps a little each week while form stays clean.".to_owned(),
        ],
    }
}

/// Generates workout plans with an optional model
pub struct WorkoutPlanner {
    provider: Option<Arc<dyn LlmProvider>>,
    model: Option<String>,
    temperature: f32,
    max_tokens: u32,
}

impl WorkoutPlanner {
    /// Planner over a provider; `None` always returns template plans
    #[must_use]
    pub const fn new(provider: Option<Arc<dyn LlmProvider>>) -> Self {
        Self {
            provider,
            model: None,
            temperature: LlmConfig::DEFAULT_TEMPERATURE,
            max_tokens: LlmConfig::DEFAULT_MAX_TOKENS,
        }
    }

    /// Apply model and sampling settings
    #[must_use]
    pub fn with_llm_config(mut self, config: &LlmConfig) -> Self {
        self.model.clone_from(&config.model);
        self.temperature = config.temperature;
        self.max_tokens = config.max_tokens;
        self
    }

    /// Generate a plan, never failing once the request is valid
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` only for an invalid request
    pub async fn generate(
        &self,
        request: &PlanRequest,
        profile: Option<&UserProfile>,
    ) -> AppResult<GeneratedPlan> {
        request.validate()?;
        let Some(provider) = self.provider.as_deref() else {
            return Ok(Self::fallback(request, "offline mode"));
        };

        let mut chat = ChatRequest::new(vec![ChatMessage::user(request.prompt(profile))])
            .with_optional_model(self.model.as_deref())
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);
        if provider.capabilities().supports_json_mode() {
            chat = chat.with_json_response();
        }

        info!(
            provider = provider.name(),
            goal = request.goal.as_str(),
            days = request.days_per_week,
            "Requesting workout plan"
        );
        let parsed = match provider.complete(&chat).await {
            Ok(response) => parse_plan_response(&response.content)
                .and_then(|plan| ensure_matches_request(plan, request)),
            Err(e) => Err(e),
        };
        Ok(match parsed {
            Ok(plan) => GeneratedPlan {
                plan,
                source: PlanSource::Model,
            },
            Err(e) => {
                warn!(error = %e, "Model plan unusable; using template plan");
                Self::fallback(request, &e.to_string())
            }
        })
    }

    fn fallback(request: &PlanRequest, reason: &str) -> GeneratedPlan {
        AppLogger::log_fallback("workout_plan", reason);
        GeneratedPlan {
            plan: fallback_plan(request),
            source: PlanSource::Fallback {
                reason: reason.to_owned(),
            },
        }
    }
}
