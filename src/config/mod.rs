// ABOUTME: Configuration module organizing environment and calculator settings
// ABOUTME: Re-exports AppConfig and the health-metric coefficient structs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration management
//!
//! Runtime settings come from the environment (`environment`); formula
//! coefficients are plain structs with research-backed defaults
//! (`health_metrics`).

/// Environment variable parsing for LLM, storage and tracker settings
pub mod environment;
/// Coefficients for the health-metric calculators
pub mod health_metrics;

pub use environment::{
    AppConfig, Environment, LlmConfig, LlmProviderType, StorageConfig, TrackerConfig,
};
pub use health_metrics::{
    ActivityFactorsConfig, BmrConfig, CalorieGoalConfig, HealthMetricsConfig, MacroRatio,
    MacroRatioConfig,
};
