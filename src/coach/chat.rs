// ABOUTME: Streaming chat session with the AI coach
// ABOUTME: Applies chunks in arrival order, supports cancellation, and falls back to templated replies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Coach Chat
//!
//! [`CoachSession::stream_reply`] sends the user's message together with the
//! context system prompt and prior turns, then folds streamed deltas into a
//! [`ChunkLog`]. Any failure (opening the stream, a malformed chunk, a read
//! error, an empty answer) replaces the reply with
//! [`fallback_reply`](super::fallback::fallback_reply). A [`ReplyHandle`]
//! cancels the request at any point, including while it is still
//! connecting; text received before cancelling is kept.

use std::future::Future;
use std::sync::Arc;

use futures_util::future::{AbortHandle, AbortRegistration, Abortable};
use futures_util::StreamExt;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::chunk_log::ChunkLog;
use super::context::AssistantContext;
use super::fallback::fallback_reply;
use crate::config::LlmConfig;
use crate::constants::limits::MAX_CHAT_HISTORY;
use crate::errors::AppError;
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::logging::AppLogger;

/// How a reply ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReplyOutcome {
    /// The model finished its answer
    Completed,
    /// The caller cancelled; text holds what arrived before that
    Cancelled,
    /// The model could not answer; text is the templated reply
    Fallback {
        /// Why the fallback was used
        reason: String,
    },
}

/// A finished reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoachReply {
    /// Text to show the user
    pub text: String,
    /// How the reply ended
    pub outcome: ReplyOutcome,
    /// Deltas applied from the stream
    pub chunks_received: usize,
}

impl CoachReply {
    fn fallback(context: &AssistantContext, message: &str, reason: &str, received: usize) -> Self {
        AppLogger::log_fallback("chat", reason);
        Self {
            text: fallback_reply(context, message),
            outcome: ReplyOutcome::Fallback {
                reason: reason.to_owned(),
            },
            chunks_received: received,
        }
    }

    /// Whether the text came from the model
    #[must_use]
    pub const fn from_model(&self) -> bool {
        !matches!(self.outcome, ReplyOutcome::Fallback { .. })
    }
}

/// Cancels an in-flight reply
#[derive(Debug, Clone)]
pub struct ReplyHandle {
    abort: AbortHandle,
}

impl ReplyHandle {
    fn new_pair() -> (Self, AbortRegistration) {
        let (abort, registration) = AbortHandle::new_pair();
        (Self { abort }, registration)
    }

    /// Stop the reply; chunks arriving afterwards are discarded
    pub fn cancel(&self) {
        debug!("Cancelling coach reply");
        self.abort.abort();
    }

    /// Whether `cancel` has been called
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.abort.is_aborted()
    }
}

/// A conversation with the coach
pub struct CoachSession {
    provider: Option<Arc<dyn LlmProvider>>,
    context: AssistantContext,
    history: Vec<ChatMessage>,
    model: Option<String>,
    temperature: f32,
    max_tokens: u32,
}

impl CoachSession {
    /// Start a session; `None` runs in offline mode
    #[must_use]
    pub const fn new(provider: Option<Arc<dyn LlmProvider>>, context: AssistantContext) -> Self {
        Self {
            provider,
            context,
            history: Vec::new(),
            model: None,
            temperature: LlmConfig::DEFAULT_TEMPERATURE,
            max_tokens: LlmConfig::DEFAULT_MAX_TOKENS,
        }
    }

    /// Apply model and sampling settings
    #[must_use]
    pub fn with_llm_config(mut self, config: &LlmConfig) -> Self {
        self.model.clone_from(&config.model);
        self.temperature = config.temperature;
        self.max_tokens = config.max_tokens;
        self
    }

    /// Whether replies can only come from templates
    #[must_use]
    pub const fn is_offline(&self) -> bool {
        self.provider.is_none()
    }

    /// Context the replies are grounded on
    #[must_use]
    pub const fn context(&self) -> &AssistantContext {
        &self.context
    }

    /// Replace the context, e.g. after the user logs new data
    pub fn set_context(&mut self, context: AssistantContext) {
        self.context = context;
    }

    /// Prior turns, oldest first
    #[must_use]
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Forget prior turns
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn build_request(&self, message: &str) -> ChatRequest {
        let mut messages = Vec::with_capacity(self.history.len() + 2);
        messages.push(ChatMessage::system(self.context.system_prompt()));
        messages.extend(self.history.iter().cloned());
        messages.push(ChatMessage::user(message));
        ChatRequest::new(messages)
            .with_optional_model(self.model.as_deref())
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
            .with_streaming()
    }

    fn remember(&mut self, message: &str, reply: &CoachReply) {
        self.history.push(ChatMessage::user(message));
        if !reply.text.is_empty() {
            self.history.push(ChatMessage::assistant(reply.text.clone()));
        }
        if self.history.len() > MAX_CHAT_HISTORY {
            let excess = self.history.len() - MAX_CHAT_HISTORY;
            self.history.drain(..excess);
        }
    }

    /// Stream a reply to `message`
    ///
    /// `observer` sees each applied delta in arrival order. The returned
    /// handle cancels the reply while the future runs.
    pub fn stream_reply<'a, F>(
        &'a mut self,
        message: &'a str,
        mut observer: F,
    ) -> (ReplyHandle, impl Future<Output = CoachReply> + Send + 'a)
    where
        F: FnMut(&str) + Send + 'a,
    {
        let (handle, registration) = ReplyHandle::new_pair();
        let cancel = handle.clone();
        let future = async move {
            let reply = self.run_reply(message, &cancel, registration, &mut observer).await;
            self.remember(message, &reply);
            reply
        };
        (handle, future)
    }

    async fn run_reply<F>(
        &self,
        message: &str,
        cancel: &ReplyHandle,
        registration: AbortRegistration,
        observer: &mut F,
    ) -> CoachReply
    where
        F: FnMut(&str) + Send,
    {
        let Some(provider) = self.provider.as_deref() else {
            return CoachReply::fallback(&self.context, message, "offline mode", 0);
        };

        let request = self.build_request(message);
        info!(
            provider = provider.name(),
            turns = self.history.len(),
            "Requesting coach reply"
        );

        // Opening the request and every wait for a chunk observe the abort
        let mut log = ChunkLog::new();
        let fetch = self.fetch_reply(provider, &request, message, cancel, &mut log, observer);
        match Abortable::new(fetch, registration).await {
            Ok(reply) => reply,
            Err(_) => cancelled(&log),
        }
    }

    async fn fetch_reply<F>(
        &self,
        provider: &dyn LlmProvider,
        request: &ChatRequest,
        message: &str,
        cancel: &ReplyHandle,
        log: &mut ChunkLog,
        observer: &mut F,
    ) -> CoachReply
    where
        F: FnMut(&str) + Send,
    {
        if !provider.capabilities().supports_streaming() {
            return self.complete_once(provider, request, message, observer).await;
        }

        let mut stream = match provider.complete_stream(request).await {
            Ok(stream) => stream,
            Err(e) => return self.failed(message, &e, 0),
        };
        while let Some(item) = stream.next().await {
            if cancel.is_cancelled() {
                return cancelled(log);
            }
            match item {
                Ok(chunk) => {
                    if !chunk.delta.is_empty() {
                        observer(&chunk.delta);
                        log.push(chunk.delta);
                    }
                    if chunk.is_final {
                        break;
                    }
                }
                Err(e) => return self.failed(message, &e, log.len()),
            }
        }

        if cancel.is_cancelled() {
            return cancelled(log);
        }
        let text = log.final_text();
        if text.trim().is_empty() {
            return CoachReply::fallback(&self.context, message, "empty response", log.len());
        }
        CoachReply {
            text,
            outcome: ReplyOutcome::Completed,
            chunks_received: log.len(),
        }
    }

    async fn complete_once<F>(
        &self,
        provider: &dyn LlmProvider,
        request: &ChatRequest,
        message: &str,
        observer: &mut F,
    ) -> CoachReply
    where
        F: FnMut(&str) + Send,
    {
        let mut request = request.clone();
        request.stream = false;
        match provider.complete(&request).await {
            Ok(response) if !response.content.trim().is_empty() => {
                observer(&response.content);
                CoachReply {
                    text: response.content,
                    outcome: ReplyOutcome::Completed,
                    chunks_received: 1,
                }
            }
            Ok(_) => CoachReply::fallback(&self.context, message, "empty response", 0),
            Err(e) => self.failed(message, &e, 0),
        }
    }

    fn failed(&self, message: &str, error: &AppError, received: usize) -> CoachReply {
        warn!(error = %error, kind = ?error.kind(), "Coach reply failed; using fallback");
        CoachReply::fallback(&self.context, message, &error.to_string(), received)
    }
}

fn cancelled(log: &ChunkLog) -> CoachReply {
    info!(chunks = log.len(), "Coach reply cancelled");
    CoachReply {
        text: log.final_text(),
        outcome: ReplyOutcome::Cancelled,
        chunks_received: log.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coach::context::ContextSources;
    use chrono::NaiveDate;

    fn context() -> AssistantContext {
        let today = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        AssistantContext::from_sources(ContextSources::default(), today, 8)
    }

    #[tokio::test]
    async fn test_offline_session_uses_fallback() {
        let mut session = CoachSession::new(None, context());
        let (_handle, reply) = session.stream_reply("How much water?", |_| {});
        let reply = reply.await;
        assert_eq!(reply.text, fallback_reply(&context(), "How much water?"));
        assert!(!reply.from_model());
        assert_eq!(session.history().len(), 2);
    }

    #[tokio::test]
    async fn test_history_is_bounded() {
        let mut session = CoachSession::new(None, context());
        for i in 0..15 {
            let message = format!("question {i}");
            let (_handle, reply) = session.stream_reply(&message, |_| {});
            reply.await;
        }
        assert_eq!(session.history().len(), MAX_CHAT_HISTORY);
        assert_eq!(session.history()[0].content, "question 5");
    }
}
