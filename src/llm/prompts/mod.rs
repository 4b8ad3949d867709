// ABOUTME: Prompts for LLM interactions loaded at compile time
// ABOUTME: Provides the coaching system prompt and the workout-plan instructions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompts
//!
//! Prompts are loaded at compile time from markdown files for easy maintenance.
//! The coach appends the user's live context to [`COACH_SYSTEM_PROMPT`].

/// Fitness coach persona and answering rules
pub const COACH_SYSTEM_PROMPT: &str = include_str!("coach_system.md");

/// Instructions and JSON schema for workout-plan generation
pub const WORKOUT_PLAN_PROMPT: &str = include_str!("workout_plan.md");

/// Get the coach system prompt
#[must_use]
pub const fn coach_system_prompt() -> &'static str {
    COACH_SYSTEM_PROMPT
}

/// Get the workout-plan prompt
#[must_use]
pub const fn workout_plan_prompt() -> &'static str {
    WORKOUT_PLAN_PROMPT
}
