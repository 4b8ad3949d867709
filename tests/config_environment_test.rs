// ABOUTME: Tests for environment-driven configuration loading
// ABOUTME: Provider selection, Gemini key fallback to offline, and rejection of invalid values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
// Test files don't require documentation - this is a rustc lint (not clippy)
#![allow(missing_docs)]

use std::env;
use std::path::PathBuf;

use fittrack::config::{
    Environment, LlmConfig, LlmProviderType, StorageConfig, TrackerConfig,
};
use fittrack::errors::{ErrorCode, ErrorKind};
use serial_test::serial;

const ALL_VARS: &[&str] = &[
    LlmProviderType::ENV_VAR,
    LlmConfig::GEMINI_API_KEY_ENV,
    LlmConfig::MODEL_ENV,
    LlmConfig::TEMPERATURE_ENV,
    LlmConfig::MAX_TOKENS_ENV,
    LlmConfig::LOCAL_BASE_URL_ENV,
    LlmConfig::LOCAL_API_KEY_ENV,
    StorageConfig::DATA_DIR_ENV,
    TrackerConfig::WATER_GOAL_ENV,
];

fn clear_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_gemini_with_key() {
    clear_env();
    env::set_var(LlmConfig::GEMINI_API_KEY_ENV, "test-key");
    env::set_var(LlmConfig::MODEL_ENV, "gemini-2.0-flash");

    let config = LlmConfig::from_env().unwrap();
    assert_eq!(config.provider, LlmProviderType::Gemini);
    assert_eq!(config.api_key.as_deref(), Some("test-key"));
    assert_eq!(config.model.as_deref(), Some("gemini-2.0-flash"));
    assert!(!format!("{config:?}").contains("test-key"));
    clear_env();
}

#[test]
#[serial]
fn test_gemini_without_key_degrades_to_offline() {
    clear_env();
    env::set_var(LlmConfig::GEMINI_API_KEY_ENV, "   ");

    let config = LlmConfig::from_env().unwrap();
    assert!(config.is_offline());
    assert_eq!(config.api_key, None);
}

#[test]
#[serial]
fn test_local_provider_reads_endpoint() {
    clear_env();
    env::set_var(LlmProviderType::ENV_VAR, "ollama");
    env::set_var(LlmConfig::LOCAL_BASE_URL_ENV, "http://localhost:11434/v1");

    let config = LlmConfig::from_env().unwrap();
    assert_eq!(config.provider, LlmProviderType::Local);
    assert_eq!(
        config.base_url.as_deref(),
        Some("http://localhost:11434/v1")
    );
    assert_eq!(config.api_key, None);
    clear_env();
}

#[test]
#[serial]
fn test_offline_provider_and_defaults() {
    clear_env();
    env::set_var(LlmProviderType::ENV_VAR, "OFFLINE");

    let config = LlmConfig::from_env().unwrap();
    assert!(config.is_offline());
    assert!((config.temperature - LlmConfig::DEFAULT_TEMPERATURE).abs() < f32::EPSILON);
    assert_eq!(config.max_tokens, LlmConfig::DEFAULT_MAX_TOKENS);
    clear_env();
}

#[test]
#[serial]
fn test_invalid_generation_settings_are_rejected() {
    clear_env();
    env::set_var(LlmProviderType::ENV_VAR, "offline");

    env::set_var(LlmConfig::TEMPERATURE_ENV, "3.5");
    let err = LlmConfig::from_env().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);

    env::set_var(LlmConfig::TEMPERATURE_ENV, "warm");
    assert_eq!(LlmConfig::from_env().unwrap_err().kind(), ErrorKind::Config);

    env::remove_var(LlmConfig::TEMPERATURE_ENV);
    env::set_var(LlmConfig::MAX_TOKENS_ENV, "0");
    assert_eq!(LlmConfig::from_env().unwrap_err().kind(), ErrorKind::Config);
    clear_env();
}

#[test]
#[serial]
fn test_water_goal_bounds() {
    clear_env();
    assert_eq!(TrackerConfig::from_env().unwrap(), TrackerConfig::default());

    env::set_var(TrackerConfig::WATER_GOAL_ENV, "12");
    assert_eq!(TrackerConfig::from_env().unwrap().water_goal_glasses, 12);

    for bad in ["0", "41", "lots"] {
        env::set_var(TrackerConfig::WATER_GOAL_ENV, bad);
        let err = TrackerConfig::from_env().unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalid, "{bad}");
    }
    clear_env();
}

#[test]
#[serial]
fn test_data_dir_override() {
    clear_env();
    env::set_var(StorageConfig::DATA_DIR_ENV, "/tmp/fittrack-test");

    let storage = StorageConfig::from_env();
    assert_eq!(
        storage.store_path(),
        PathBuf::from("/tmp/fittrack-test/fittrack.json")
    );
    clear_env();
}

#[test]
fn test_environment_parsing() {
    assert_eq!(
        Environment::from_str_or_default("prod"),
        Environment::Production
    );
    assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
    assert_eq!(
        Environment::from_str_or_default("anything"),
        Environment::Development
    );
    assert_eq!(
        LlmProviderType::from_str_or_default("vllm"),
        LlmProviderType::Local
    );
}
