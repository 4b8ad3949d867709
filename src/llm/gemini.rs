// ABOUTME: Google Gemini LLM provider implementation with streaming support
// ABOUTME: Uses the Generative Language API with SSE streaming and JSON response mode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Provider
//!
//! Implementation of the `LlmProvider` trait for Google's Gemini models.
//!
//! ## Configuration
//!
//! Set the `GEMINI_API_KEY` environment variable with your API key from
//! Google AI Studio: <https://aistudio.google.com/app/apikey>
//!
//! ## Example
//!
//! ```rust,no_run
//! use fittrack::llm::{ChatMessage, ChatRequest, GeminiProvider, LlmProvider};
//! use fittrack::errors::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let provider = GeminiProvider::new("api-key");
//!     let request = ChatRequest::new(vec![ChatMessage::user("How much protein do I need?")]);
//!     let response = provider.complete(&request).await?;
//!     println!("{}", response.content);
//!     Ok(())
//! }
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::sse_parser::create_sse_stream;
use super::{
    ChatMessage, ChatRequest, ChatResponse, ChatStream, LlmCapabilities, LlmProvider, MessageRole,
    StreamChunk, TokenUsage,
};
use crate::errors::{AppError, ErrorCode};
use crate::logging::AppLogger;

/// Default model to use
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Base URL for the Gemini API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Finish reason Gemini reports on normal completion
const FINISH_STOP: &str = "STOP";

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Gemini API request structure
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// Content structure for Gemini API
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

/// Text part of a content block; non-text parts deserialize with `text: None`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ContentPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

/// Generation configuration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    candidate_count: u32,
}

/// Gemini API response structure (also used for each streamed event)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    usage_metadata: Option<UsageMetadata>,
    error: Option<GeminiError>,
}

/// Response candidate
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

/// Usage metadata from Gemini API response
#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    prompt: Option<u32>,
    #[serde(rename = "candidatesTokenCount")]
    candidates: Option<u32>,
    #[serde(rename = "totalTokenCount")]
    total: Option<u32>,
}

/// API error response from Gemini
#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

impl GeminiResponse {
    fn first_candidate(&self) -> Option<&Candidate> {
        self.candidates.as_ref().and_then(|c| c.first())
    }

    /// Concatenated text of the first candidate
    fn text(&self) -> String {
        self.first_candidate()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn finish_reason(&self) -> Option<String> {
        self.first_candidate().and_then(|c| c.finish_reason.clone())
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini LLM provider
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    base_url: String,
    default_model: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            base_url: API_BASE_URL.to_owned(),
            default_model: DEFAULT_MODEL.to_owned(),
        }
    }

    /// Set a custom default model
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Point the provider at a different API root (proxies, test servers)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Convert our message role to Gemini's role format
    const fn convert_role(role: MessageRole) -> &'static str {
        match role {
            MessageRole::System | MessageRole::User => "user",
            MessageRole::Assistant => "model",
        }
    }

    /// Build the API URL for a model and method
    ///
    /// The key travels in the `x-goog-api-key` header, never in the URL.
    fn build_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{model}:{method}", self.base_url)
    }

    /// Convert chat messages to Gemini format; system messages become `system_instruction`
    fn convert_messages(messages: &[ChatMessage]) -> (Vec<GeminiContent>, Option<GeminiContent>) {
        let mut contents = Vec::new();
        let mut system_parts = Vec::new();

        for message in messages {
            let part = ContentPart {
                text: Some(message.content.clone()),
            };
            if message.role == MessageRole::System {
                system_parts.push(part);
            } else {
                contents.push(GeminiContent {
                    role: Some(Self::convert_role(message.role).to_owned()),
                    parts: vec![part],
                });
            }
        }

        let system_instruction = (!system_parts.is_empty()).then(|| GeminiContent {
            role: None,
            parts: system_parts,
        });
        (contents, system_instruction)
    }

    /// Build a Gemini API request from a `ChatRequest`
    fn build_gemini_request(request: &ChatRequest) -> GeminiRequest {
        let (contents, system_instruction) = Self::convert_messages(&request.messages);
        GeminiRequest {
            contents,
            system_instruction,
            generation_config: Some(GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
                response_mime_type: request.json_response.then_some("application/json"),
                candidate_count: 1,
            }),
        }
    }

    /// Convert usage metadata to our token usage format
    fn convert_usage(metadata: &UsageMetadata) -> TokenUsage {
        TokenUsage {
            prompt_tokens: metadata.prompt.unwrap_or(0),
            completion_tokens: metadata.candidates.unwrap_or(0),
            total_tokens: metadata.total.unwrap_or(0),
        }
    }

    /// Map API error status to appropriate error type
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        match status {
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                "AI service quota exceeded. Please wait a moment and try again.",
            ),
            401 | 403 => AppError::external_auth(format!("Gemini rejected the API key: {message}")),
            _ => AppError::external_service("Gemini", format!("API error ({status}): {message}")),
        }
    }

    /// Parse one streamed event into a chunk
    fn parse_stream_event(payload: &str) -> Option<Result<StreamChunk, AppError>> {
        let event: GeminiResponse = match serde_json::from_str(payload) {
            Ok(event) => event,
            Err(e) => {
                return Some(Err(AppError::parse(format!(
                    "Malformed Gemini stream chunk: {e}"
                ))))
            }
        };
        if let Some(error) = event.error {
            return Some(Err(AppError::external_service("Gemini", error.message)));
        }
        let finish_reason = event.finish_reason();
        let is_final = finish_reason.as_deref() == Some(FINISH_STOP);
        let delta = event.text();
        if delta.is_empty() && !is_final {
            return None;
        }
        Some(Ok(StreamChunk {
            delta,
            is_final,
            finish_reason,
        }))
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn display_name(&self) -> &'static str {
        "Google Gemini"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::full_featured()
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(DEFAULT_MODEL)))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request.model.as_deref().unwrap_or(&self.default_model);
        let url = self.build_url(model, "generateContent");
        let gemini_request = Self::build_gemini_request(request);

        debug!(json = request.json_response, "Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&gemini_request)
            .send()
            .await?;
        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            AppLogger::log_llm_request(self.name(), model, false, false);
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&response_text)
            .map_err(|e| AppError::parse(format!("Failed to parse Gemini response: {e}")))?;

        if let Some(error) = gemini_response.error {
            return Err(AppError::external_service("Gemini", error.message));
        }

        let content = gemini_response.text();
        if content.is_empty() {
            return Err(AppError::external_service(
                "Gemini",
                "No content in Gemini response",
            ));
        }

        AppLogger::log_llm_request(self.name(), model, false, true);
        Ok(ChatResponse {
            content,
            model: model.to_owned(),
            usage: gemini_response
                .usage_metadata
                .as_ref()
                .map(Self::convert_usage),
            finish_reason: gemini_response.finish_reason(),
        })
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(DEFAULT_MODEL)))]
    async fn complete_stream(&self, request: &ChatRequest) -> Result<ChatStream, AppError> {
        let model = request.model.as_deref().unwrap_or(&self.default_model);
        let url = self.build_url(model, "streamGenerateContent");
        let gemini_request = Self::build_gemini_request(request);

        debug!("Starting streaming request to Gemini API");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[("alt", "sse")])
            .json(&gemini_request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_owned());
            AppLogger::log_llm_request(self.name(), model, true, false);
            return Err(Self::map_api_error(status.as_u16(), &error_text));
        }

        AppLogger::log_llm_request(self.name(), model, true, true);
        Ok(create_sse_stream(
            response.bytes_stream(),
            Self::parse_stream_event,
            "Gemini",
        ))
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("default_model", &self.default_model)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_mode_sets_mime_type() {
        let request = ChatRequest::new(vec![
            ChatMessage::system("coach"),
            ChatMessage::user("plan"),
        ])
        .with_json_response();
        let body = serde_json::to_value(GeminiProvider::build_gemini_request(&request)).unwrap();
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "coach");
        assert_eq!(body["contents"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_api_key_is_not_in_url() {
        let provider = GeminiProvider::new("SECRET-KEY-123");
        let url = provider.build_url("gemini-2.5-flash", "generateContent");
        assert!(!url.contains("SECRET-KEY-123"));
        assert!(url.ends_with("/models/gemini-2.5-flash:generateContent"));
        assert!(!format!("{provider:?}").contains("SECRET-KEY-123"));
    }

    #[test]
    fn test_stream_event_parsing() {
        let chunk = GeminiProvider::parse_stream_event(
            r#"{"candidates":[{"content":{"parts":[{"text":"Hi"}],"role":"model"}}]}"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(chunk.delta, "Hi");
        assert!(!chunk.is_final);

        assert!(GeminiProvider::parse_stream_event("{not json").unwrap().is_err());
        assert!(GeminiProvider::parse_stream_event(r#"{"candidates":[]}"#).is_none());
    }
}
