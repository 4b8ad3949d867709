// ABOUTME: Unified LLM provider selector for runtime provider switching
// ABOUTME: Picks Gemini, an OpenAI-compatible server, or offline mode from configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Provider Selector
//!
//! Set `FITTRACK_LLM_PROVIDER` to choose the backend:
//! - `gemini` (default): Google Gemini, requires `GEMINI_API_KEY`
//! - `local`/`ollama`/`vllm`: any `OpenAI`-compatible server
//! - `offline`: no network, the coach answers from local templates
//!
//! ## Example
//!
//! ```rust,no_run
//! use fittrack::config::LlmConfig;
//! use fittrack::llm::{ChatMessage, ChatProvider, ChatRequest, LlmProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fittrack::errors::AppError> {
//!     let config = LlmConfig::from_env()?;
//!     if let Some(provider) = ChatProvider::from_config(&config)? {
//!         let request = ChatRequest::new(vec![ChatMessage::user("Hello!")]);
//!         let response = provider.complete(&request).await?;
//!         println!("{}", response.content);
//!     }
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use tracing::{debug, info};

use super::{
    ChatRequest, ChatResponse, ChatStream, GeminiProvider, LlmCapabilities, LlmProvider,
    OpenAiCompatibleConfig, OpenAiCompatibleProvider,
};
use crate::config::{LlmConfig, LlmProviderType};
use crate::errors::{AppError, AppResult};

/// Unified chat provider that wraps Gemini or a local LLM
pub enum ChatProvider {
    /// Google Gemini provider
    Gemini(GeminiProvider),
    /// Local LLM provider via `OpenAI`-compatible API (Ollama, vLLM, `LocalAI`)
    Local(OpenAiCompatibleProvider),
}

impl ChatProvider {
    /// Create a provider from configuration
    ///
    /// Returns `None` in offline mode so callers answer from fallbacks.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured provider cannot be constructed
    pub fn from_config(config: &LlmConfig) -> AppResult<Option<Self>> {
        info!(
            "Initializing LLM provider: {} (set {} to change)",
            config.provider,
            LlmProviderType::ENV_VAR
        );

        let provider = match config.provider {
            LlmProviderType::Offline => return Ok(None),
            LlmProviderType::Gemini => {
                let key = config.api_key.clone().ok_or_else(|| {
                    AppError::config(format!(
                        "{} is required for the Gemini provider",
                        LlmConfig::GEMINI_API_KEY_ENV
                    ))
                })?;
                let mut provider = GeminiProvider::new(key);
                if let Some(model) = &config.model {
                    provider = provider.with_default_model(model.clone());
                }
                if let Some(base_url) = &config.base_url {
                    provider = provider.with_base_url(base_url.clone());
                }
                Self::Gemini(provider)
            }
            LlmProviderType::Local => Self::Local(OpenAiCompatibleProvider::new(
                OpenAiCompatibleConfig::from_parts(
                    config.base_url.clone(),
                    config.api_key.clone(),
                    config.model.clone(),
                ),
            )?),
        };

        debug!(
            "Provider {} initialized with model: {}",
            provider.display_name(),
            provider.default_model()
        );
        Ok(Some(provider))
    }

    fn inner(&self) -> &dyn LlmProvider {
        match self {
            Self::Gemini(p) => p,
            Self::Local(p) => p,
        }
    }
}

#[async_trait]
impl LlmProvider for ChatProvider {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn display_name(&self) -> &'static str {
        self.inner().display_name()
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.inner().capabilities()
    }

    fn default_model(&self) -> &str {
        self.inner().default_model()
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.inner().complete(request).await
    }

    async fn complete_stream(&self, request: &ChatRequest) -> Result<ChatStream, AppError> {
        self.inner().complete_stream(request).await
    }
}
