// ABOUTME: Integration tests for LLM provider selection and request building
// ABOUTME: Capability flags, provider construction from config, and transport failures as network errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
// Test files don't require documentation - this is a rustc lint (not clippy)
#![allow(missing_docs)]

mod common;

use std::error::Error as StdError;

use fittrack::config::{LlmConfig, LlmProviderType};
use fittrack::errors::{ErrorCode, ErrorKind};
use fittrack::llm::{
    ChatMessage, ChatProvider, ChatRequest, GeminiProvider, LlmCapabilities, LlmProvider,
    MessageRole, OpenAiCompatibleConfig, OpenAiCompatibleProvider,
};

// ============================================================================
// Capabilities and requests
// ============================================================================

#[test]
fn test_capability_sets() {
    let text = LlmCapabilities::text_only();
    assert!(text.supports_streaming());
    assert!(text.supports_system_messages());
    assert!(!text.supports_json_mode());

    let full = LlmCapabilities::full_featured();
    assert!(full.supports_json_mode());
    assert!(full.contains(text));
}

#[test]
fn test_request_builder() {
    let request = ChatRequest::new(vec![
        ChatMessage::system("You are a coach"),
        ChatMessage::user("Hi"),
    ])
    .with_optional_model(Some("gemini-2.5-flash"))
    .with_temperature(0.3)
    .with_max_tokens(256)
    .with_streaming();

    assert_eq!(request.messages[0].role, MessageRole::System);
    assert_eq!(request.messages[1].role.as_str(), "user");
    assert_eq!(request.model.as_deref(), Some("gemini-2.5-flash"));
    assert_eq!(request.max_tokens, Some(256));
    assert!(request.stream);
    assert!(!request.json_response);

    let json = ChatRequest::new(vec![]).with_json_response();
    assert!(json.json_response && !json.stream);
}

// ============================================================================
// Provider selection
// ============================================================================

#[test]
fn test_gemini_provider_from_config() {
    let config = LlmConfig {
        provider: LlmProviderType::Gemini,
        api_key: Some("test-key".to_owned()),
        model: Some("gemini-2.0-flash".to_owned()),
        ..LlmConfig::offline()
    };
    let provider = ChatProvider::from_config(&config).unwrap().unwrap();
    assert_eq!(provider.name(), "gemini");
    assert_eq!(provider.default_model(), "gemini-2.0-flash");
    assert!(provider.capabilities().supports_json_mode());
}

#[test]
fn test_gemini_without_key_is_config_error() {
    let config = LlmConfig {
        provider: LlmProviderType::Gemini,
        ..LlmConfig::offline()
    };
    let err = ChatProvider::from_config(&config).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn test_local_server_kind_detection() {
    let cases = [
        ("http://localhost:11434/v1", "ollama"),
        ("http://gpu-box:8000/v1", "vllm"),
        ("http://localhost:8080/v1", "localai"),
        ("https://llm.internal/v1", "local"),
    ];
    for (url, expected) in cases {
        let config = OpenAiCompatibleConfig::from_parts(Some(url.to_owned()), None, None);
        assert_eq!(config.provider_name, expected, "{url}");
    }
    let defaults = OpenAiCompatibleConfig::default();
    assert_eq!(defaults.base_url, "http://localhost:11434/v1");
}

// ============================================================================
// Transport failures
// ============================================================================

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    common::init_test_logging();
    // Port 9 (discard) is not expected to accept HTTP connections
    let config =
        OpenAiCompatibleConfig::from_parts(Some("http://127.0.0.1:9/v1".to_owned()), None, None);
    let provider = OpenAiCompatibleProvider::new(config).unwrap();
    let request = ChatRequest::new(vec![ChatMessage::user("hello")]);

    let err = provider.complete(&request).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);

    let err = provider
        .complete_stream(&request.with_streaming())
        .await
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn test_gemini_transport_error_does_not_leak_key() {
    common::init_test_logging();
    let provider = GeminiProvider::new("SECRET-KEY-123").with_base_url("http://127.0.0.1:9");
    let request = ChatRequest::new(vec![ChatMessage::user("hello")]);

    let errors = [
        provider.complete(&request).await.unwrap_err(),
        provider
            .complete_stream(&request.clone().with_streaming())
            .await
            .err()
            .unwrap(),
    ];
    for err in errors {
        assert_eq!(err.kind(), ErrorKind::Network);
        let mut chain = err.to_string();
        let mut source = StdError::source(&err);
        while let Some(inner) = source {
            chain.push_str(&inner.to_string());
            source = inner.source();
        }
        assert!(!chain.contains("SECRET-KEY-123"), "{chain}");
    }
}
