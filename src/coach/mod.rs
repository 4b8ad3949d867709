// ABOUTME: AI coaching features built on the LLM provider layer
// ABOUTME: Context assembly, streaming chat with fallbacks, and workout-plan generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Coach
//!
//! Every coach feature works without a network: when no provider is
//! configured, or the provider fails, answers come from deterministic
//! templates built on the same [`AssistantContext`].

/// Streaming chat session with cancellation
pub mod chat;
/// Append-only log of streamed deltas
pub mod chunk_log;
/// Tracker data reduced into prompt-ready aggregates
pub mod context;
/// Templated offline replies
pub mod fallback;
/// Workout-plan generation
pub mod plan;

pub use chat::{CoachReply, CoachSession, ReplyHandle, ReplyOutcome};
pub use chunk_log::ChunkLog;
pub use context::{AssistantContext, ContextSources};
pub use fallback::{fallback_reply, FallbackTopic};
pub use plan::{
    fallback_plan, parse_plan_response, ExperienceLevel, GeneratedPlan, PlanDay, PlanRequest,
    PlanSource, PlannedExercise, WorkoutPlan, WorkoutPlanner,
};
