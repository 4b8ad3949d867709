// ABOUTME: Generic OpenAI-compatible LLM provider for local and cloud endpoints
// ABOUTME: Supports Ollama, vLLM, LocalAI, and any OpenAI-compatible chat completions API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `OpenAI`-Compatible Provider
//!
//! Generic implementation for any `OpenAI`-compatible LLM endpoint, so the
//! coach can run against a local model server.
//!
//! ## Configuration
//!
//! - `LOCAL_LLM_BASE_URL`: Base URL (default: <http://localhost:11434/v1> for Ollama)
//! - `LOCAL_LLM_API_KEY`: API key (optional, empty for local servers)
//! - `FITTRACK_LLM_MODEL`: Model to use (default: `qwen2.5:7b-instruct`)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use super::sse_parser::create_sse_stream;
use super::{
    ChatMessage, ChatRequest, ChatResponse, ChatStream, LlmCapabilities, LlmProvider, StreamChunk,
    TokenUsage,
};
use crate::errors::{AppError, ErrorCode};
use crate::logging::AppLogger;

/// Default base URL (Ollama)
const DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";

/// Default model for local inference
const DEFAULT_MODEL: &str = "qwen2.5:7b-instruct";

/// Connection timeout for local servers (more lenient than cloud)
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Request timeout (local inference can be slower)
const REQUEST_TIMEOUT_SECS: u64 = 300;

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

/// OpenAI-compatible API request structure
#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

/// Requested output format
#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// Message structure for OpenAI-compatible API
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

impl From<&ChatMessage> for OpenAiMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.as_str().to_owned(),
            content: msg.content.clone(),
        }
    }
}

/// OpenAI-compatible API response structure
#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
    model: String,
}

/// Choice in response
#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

/// Message in response
#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

/// Usage statistics in response
#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    #[serde(rename = "prompt_tokens")]
    prompt: u32,
    #[serde(rename = "completion_tokens")]
    completion: u32,
    #[serde(rename = "total_tokens")]
    total: u32,
}

/// Streaming chunk structure
#[derive(Debug, Deserialize)]
struct OpenAiStreamChunk {
    choices: Vec<OpenAiStreamChoice>,
}

/// Choice in streaming chunk
#[derive(Debug, Deserialize)]
struct OpenAiStreamChoice {
    delta: OpenAiDelta,
    finish_reason: Option<String>,
}

/// Delta content in streaming chunk
#[derive(Debug, Deserialize)]
struct OpenAiDelta {
    #[serde(default)]
    content: Option<String>,
}

/// Error response structure
#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Configuration for the `OpenAI`-compatible provider
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL for the API (e.g., <http://localhost:11434/v1>)
    pub base_url: String,
    /// API key (optional for local servers)
    pub api_key: Option<String>,
    /// Default model to use
    pub default_model: String,
    /// Provider name for logging
    pub provider_name: &'static str,
    /// Provider display name
    pub display_name: &'static str,
    /// Capabilities of this provider
    pub capabilities: LlmCapabilities,
}

impl OpenAiCompatibleConfig {
    /// Build a configuration from optional overrides, detecting the server
    /// kind from the port for nicer display names
    #[must_use]
    pub fn from_parts(
        base_url: Option<String>,
        api_key: Option<String>,
        model: Option<String>,
    ) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let (provider_name, display_name) = if base_url.contains(":11434") {
            ("ollama", "Ollama (Local)")
        } else if base_url.contains(":8000") {
            ("vllm", "vLLM (Local)")
        } else if base_url.contains(":8080") {
            ("localai", "LocalAI")
        } else {
            ("local", "Local LLM")
        };
        Self {
            base_url,
            api_key,
            default_model: model.unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            provider_name,
            display_name,
            capabilities: LlmCapabilities::full_featured(),
        }
    }
}

impl Default for OpenAiCompatibleConfig {
    fn default() -> Self {
        Self::from_parts(None, None, None)
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Generic `OpenAI`-compatible LLM provider
pub struct OpenAiCompatibleProvider {
    client: Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleProvider {
    /// Create a new provider with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenAiCompatibleConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        info!(
            "Initializing {} provider: base_url={}, model={}",
            config.display_name, config.base_url, config.default_model
        );
        Ok(Self { client, config })
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    fn build_request(&self, request: &ChatRequest, stream: bool) -> OpenAiRequest {
        OpenAiRequest {
            model: request
                .model
                .clone()
                .unwrap_or_else(|| self.config.default_model.clone()),
            messages: request.messages.iter().map(OpenAiMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: stream.then_some(true),
            response_format: request.json_response.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        }
    }

    async fn send(&self, body: &OpenAiRequest) -> Result<reqwest::Response, AppError> {
        let mut builder = self.client.post(self.api_url("chat/completions")).json(body);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }
        let response = builder.send().await.map_err(|e| {
            if e.is_connect() {
                AppError::new(
                    ErrorCode::ExternalServiceUnavailable,
                    format!(
                        "Cannot reach {} at {}. Is the server running?",
                        self.config.display_name, self.config.base_url
                    ),
                )
                .with_source(e)
            } else {
                AppError::from(e)
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        error!(status = %status, provider = self.config.provider_name, "LLM API error");
        AppLogger::log_llm_request(self.config.provider_name, &body.model, body.stream.is_some(), false);
        Err(self.map_api_error(status.as_u16(), &text))
    }

    /// Map API error status to appropriate error type
    fn map_api_error(&self, status: u16, response_text: &str) -> AppError {
        let message = serde_json::from_str::<OpenAiErrorResponse>(response_text)
            .map_or_else(|_| response_text.to_owned(), |r| r.error.message);
        match status {
            401 | 403 => AppError::external_auth(format!(
                "{} authentication failed: {message}",
                self.config.display_name
            )),
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                format!("{} rate limit exceeded: {message}", self.config.display_name),
            ),
            _ => AppError::external_service(
                self.config.display_name,
                format!("API error ({status}): {message}"),
            ),
        }
    }

    /// Parse one streamed event into a chunk
    fn parse_stream_event(payload: &str) -> Option<Result<StreamChunk, AppError>> {
        let chunk: OpenAiStreamChunk = match serde_json::from_str(payload) {
            Ok(chunk) => chunk,
            Err(e) => {
                return Some(Err(AppError::parse(format!(
                    "Malformed stream chunk: {e}"
                ))))
            }
        };
        let choice = chunk.choices.into_iter().next()?;
        let delta = choice.delta.content.unwrap_or_default();
        let is_final = choice.finish_reason.is_some();
        if delta.is_empty() && !is_final {
            return None;
        }
        Some(Ok(StreamChunk {
            delta,
            is_final,
            finish_reason: choice.finish_reason,
        }))
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        self.config.provider_name
    }

    fn display_name(&self) -> &'static str {
        self.config.display_name
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.config.capabilities
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(provider = %self.config.provider_name))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let body = self.build_request(request, false);
        debug!(messages = body.messages.len(), "Sending chat completion request");

        let response = self.send(&body).await?;
        let parsed: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| AppError::parse(format!("Failed to parse chat completion: {e}")))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::external_service(self.config.display_name, "No choices in response"))?;
        let content = choice.message.content.unwrap_or_default();
        if content.is_empty() {
            return Err(AppError::external_service(
                self.config.display_name,
                "Empty completion",
            ));
        }

        AppLogger::log_llm_request(self.config.provider_name, &parsed.model, false, true);
        Ok(ChatResponse {
            content,
            model: parsed.model,
            usage: parsed.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt,
                completion_tokens: u.completion,
                total_tokens: u.total,
            }),
            finish_reason: choice.finish_reason,
        })
    }

    #[instrument(skip(self, request), fields(provider = %self.config.provider_name))]
    async fn complete_stream(&self, request: &ChatRequest) -> Result<ChatStream, AppError> {
        let body = self.build_request(request, true);
        debug!(messages = body.messages.len(), "Starting streaming chat completion");

        let response = self.send(&body).await?;
        AppLogger::log_llm_request(self.config.provider_name, &body.model, true, true);
        Ok(create_sse_stream(
            response.bytes_stream(),
            Self::parse_stream_event,
            self.config.display_name,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_kind_detected_from_port() {
        let config =
            OpenAiCompatibleConfig::from_parts(Some("http://localhost:8000/v1".into()), None, None);
        assert_eq!(config.provider_name, "vllm");
        assert_eq!(OpenAiCompatibleConfig::default().provider_name, "ollama");
    }

    #[test]
    fn test_stream_event_parsing() {
        let chunk = OpenAiCompatibleProvider::parse_stream_event(
            r#"{"choices":[{"delta":{"content":"Hey"},"finish_reason":null}]}"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(chunk.delta, "Hey");
        let last = OpenAiCompatibleProvider::parse_stream_event(
            r#"{"choices":[{"delta":{},"finish_reason":"stop"}]}"#,
        )
        .unwrap()
        .unwrap();
        assert!(last.is_final);
        assert!(OpenAiCompatibleProvider::parse_stream_event("oops").unwrap().is_err());
    }
}
