// ABOUTME: Main library entry point for the FitTrack personal fitness tracker
// ABOUTME: Health calculators, versioned tracker storage, and streaming AI coaching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `FitTrack`
//!
//! A personal fitness tracker for workouts, diet, water intake and body
//! analyses, with an AI coach that streams replies from a hosted model and
//! falls back to deterministic local answers whenever the model is
//! unavailable.
//!
//! ## Architecture
//!
//! - **intelligence**: pure BMI, BMR, TDEE, calorie-goal and macro calculators
//! - **storage**: injected key/value store with versioned envelopes and legacy-key migration
//! - **trackers**: profile, diet, hydration, workout and analysis operations over the store
//! - **llm**: provider trait with Gemini and `OpenAI`-compatible streaming clients
//! - **coach**: context assembly, streaming chat with cancellation, workout-plan generation
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fittrack::intelligence::health_metrics::{bmi_category, calculate_bmi};
//! use fittrack::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let bmi = calculate_bmi(70.0, 175.0)?;
//!     println!("BMI {bmi} ({})", bmi_category(bmi)?.category);
//!     Ok(())
//! }
//! ```

/// AI coach: context, chat streaming, fallback answers and workout plans
pub mod coach;

/// Configuration management
pub mod config;

/// Unified error handling
pub mod errors;

/// Health-metric calculators
pub mod intelligence;

/// LLM provider abstraction and implementations
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Markdown progress report
pub mod report;

/// Key/value persistence and typed tracker storage
pub mod storage;

/// Tracker operations for each screen of the app
pub mod trackers;

pub use fittrack_core::constants;
pub use fittrack_core::models;
