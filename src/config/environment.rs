// ABOUTME: Environment configuration management for the tracker and its AI coach
// ABOUTME: Parses LLM provider selection, storage location, and tracker defaults from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! All settings come from environment variables; there is no config file.
//! A missing API key is not fatal: the coach then runs offline and answers
//! from local templates only.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::hydration::{DEFAULT_DAILY_GOAL_GLASSES, MAX_GLASSES_PER_DAY};
use crate::errors::{AppError, AppResult};

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development (default)
    #[default]
    Development,
    /// Production use
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if running in production
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Which LLM backend the coach talks to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProviderType {
    /// Google Gemini (default)
    #[default]
    Gemini,
    /// `OpenAI`-compatible endpoint (Ollama, vLLM, `LocalAI`)
    Local,
    /// No remote calls; every answer comes from local templates
    Offline,
}

impl LlmProviderType {
    /// Environment variable name for LLM provider selection
    pub const ENV_VAR: &'static str = "FITTRACK_LLM_PROVIDER";

    /// Parse from string with fallback to default
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "local" | "ollama" | "vllm" | "localai" => Self::Local,
            "offline" | "none" => Self::Offline,
            _ => Self::Gemini,
        }
    }
}

impl fmt::Display for LlmProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gemini => write!(f, "gemini"),
            Self::Local => write!(f, "local"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

/// LLM connection and generation settings
#[derive(Clone)]
pub struct LlmConfig {
    /// Selected backend
    pub provider: LlmProviderType,
    /// API key (Gemini key, or bearer token for local endpoints)
    pub api_key: Option<String>,
    /// Model override
    pub model: Option<String>,
    /// Base URL override for `OpenAI`-compatible endpoints
    pub base_url: Option<String>,
    /// Sampling temperature (0.0 - 2.0)
    pub temperature: f32,
    /// Maximum output tokens per reply
    pub max_tokens: u32,
}

impl LlmConfig {
    /// Gemini API key variable
    pub const GEMINI_API_KEY_ENV: &'static str = "GEMINI_API_KEY";
    /// Model override variable
    pub const MODEL_ENV: &'static str = "FITTRACK_LLM_MODEL";
    /// Temperature variable
    pub const TEMPERATURE_ENV: &'static str = "FITTRACK_LLM_TEMPERATURE";
    /// Max tokens variable
    pub const MAX_TOKENS_ENV: &'static str = "FITTRACK_LLM_MAX_TOKENS";
    /// Local endpoint base URL variable
    pub const LOCAL_BASE_URL_ENV: &'static str = "LOCAL_LLM_BASE_URL";
    /// Local endpoint API key variable
    pub const LOCAL_API_KEY_ENV: &'static str = "LOCAL_LLM_API_KEY";

    /// Default sampling temperature
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
    /// Default output token budget
    pub const DEFAULT_MAX_TOKENS: u32 = 1024;

    /// Configuration that never leaves the machine
    #[must_use]
    pub const fn offline() -> Self {
        Self {
            provider: LlmProviderType::Offline,
            api_key: None,
            model: None,
            base_url: None,
            temperature: Self::DEFAULT_TEMPERATURE,
            max_tokens: Self::DEFAULT_MAX_TOKENS,
        }
    }

    /// Load LLM settings from the environment
    ///
    /// # Errors
    ///
    /// Returns a config error if temperature or max tokens are set but invalid
    pub fn from_env() -> AppResult<Self> {
        let requested = env::var(LlmProviderType::ENV_VAR)
            .map(|s| LlmProviderType::from_str_or_default(&s))
            .unwrap_or_default();

        let temperature: f32 = parse_env(Self::TEMPERATURE_ENV, Self::DEFAULT_TEMPERATURE)?;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(AppError::config_invalid(format!(
                "{} must be between 0.0 and 2.0, got {temperature}",
                Self::TEMPERATURE_ENV
            )));
        }
        let max_tokens: u32 = parse_env(Self::MAX_TOKENS_ENV, Self::DEFAULT_MAX_TOKENS)?;
        if max_tokens == 0 {
            return Err(AppError::config_invalid(format!(
                "{} must be greater than zero",
                Self::MAX_TOKENS_ENV
            )));
        }

        let model = non_empty_var(Self::MODEL_ENV);
        let (provider, api_key, base_url) = match requested {
            LlmProviderType::Gemini => match non_empty_var(Self::GEMINI_API_KEY_ENV) {
                Some(key) => (LlmProviderType::Gemini, Some(key), None),
                None => {
                    warn!(
                        "{} not set; AI coach will answer from local templates",
                        Self::GEMINI_API_KEY_ENV
                    );
                    (LlmProviderType::Offline, None, None)
                }
            },
            LlmProviderType::Local => (
                LlmProviderType::Local,
                non_empty_var(Self::LOCAL_API_KEY_ENV),
                non_empty_var(Self::LOCAL_BASE_URL_ENV),
            ),
            LlmProviderType::Offline => (LlmProviderType::Offline, None, None),
        };

        Ok(Self {
            provider,
            api_key,
            model,
            base_url,
            temperature,
            max_tokens,
        })
    }

    /// Whether remote calls are disabled
    #[must_use]
    pub const fn is_offline(&self) -> bool {
        matches!(self.provider, LlmProviderType::Offline)
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

/// Where tracker data lives on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory holding the data file
    pub data_dir: PathBuf,
}

impl StorageConfig {
    /// Data directory override variable
    pub const DATA_DIR_ENV: &'static str = "FITTRACK_DATA_DIR";
    /// File name of the JSON store inside the data directory
    pub const FILE_NAME: &'static str = "fittrack.json";

    /// Load from `FITTRACK_DATA_DIR`, falling back to the platform data dir
    #[must_use]
    pub fn from_env() -> Self {
        let data_dir = non_empty_var(Self::DATA_DIR_ENV).map_or_else(
            || {
                dirs::data_dir()
                    .map_or_else(|| PathBuf::from(".fittrack"), |dir| dir.join("fittrack"))
            },
            PathBuf::from,
        );
        Self { data_dir }
    }

    /// Full path of the JSON store
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(Self::FILE_NAME)
    }
}

/// Tracker defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Daily water goal in glasses
    pub water_goal_glasses: u32,
}

impl TrackerConfig {
    /// Water goal override variable
    pub const WATER_GOAL_ENV: &'static str = "FITTRACK_WATER_GOAL";

    /// Load tracker defaults from the environment
    ///
    /// # Errors
    ///
    /// Returns a config error if the water goal is not a number in 1..=40
    pub fn from_env() -> AppResult<Self> {
        let water_goal_glasses: u32 = parse_env(Self::WATER_GOAL_ENV, DEFAULT_DAILY_GOAL_GLASSES)?;
        if water_goal_glasses == 0 || water_goal_glasses > MAX_GLASSES_PER_DAY {
            return Err(AppError::config_invalid(format!(
                "{} must be between 1 and {MAX_GLASSES_PER_DAY}",
                Self::WATER_GOAL_ENV
            )));
        }
        Ok(Self { water_goal_glasses })
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            water_goal_glasses: DEFAULT_DAILY_GOAL_GLASSES,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Deployment environment
    pub environment: Environment,
    /// LLM settings
    pub llm: LlmConfig,
    /// Storage location
    pub storage: StorageConfig,
    /// Tracker defaults
    pub tracker: TrackerConfig,
}

impl AppConfig {
    /// Load the full configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a config error if any variable is set to an invalid value
    pub fn from_env() -> AppResult<Self> {
        let environment = env::var("ENVIRONMENT")
            .map(|s| Environment::from_str_or_default(&s))
            .unwrap_or_default();

        let config = Self {
            environment,
            llm: LlmConfig::from_env()?,
            storage: StorageConfig::from_env(),
            tracker: TrackerConfig::from_env()?,
        };
        config.log_summary();
        Ok(config)
    }

    fn log_summary(&self) {
        info!(
            environment = %self.environment,
            llm.provider = %self.llm.provider,
            llm.model = self.llm.model.as_deref().unwrap_or("default"),
            storage.path = %self.storage.store_path().display(),
            water_goal = self.tracker.water_goal_glasses,
            "Configuration loaded"
        );
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_env<T: FromStr>(name: &str, default: T) -> AppResult<T> {
    match non_empty_var(name) {
        Some(raw) => raw.trim().parse().map_err(|_| {
            AppError::config_invalid(format!("{name} has invalid value '{raw}'"))
        }),
        None => Ok(default),
    }
}
