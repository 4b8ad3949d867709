// ABOUTME: Scripted LLM provider for automated testing without network access
// ABOUTME: Replays pre-configured chunks, SSE bytes, failures or replies and records every request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use fittrack::errors::AppError;
use fittrack::llm::sse_parser::create_sse_stream;
use fittrack::llm::{
    ChatRequest, ChatResponse, ChatStream, LlmCapabilities, LlmProvider, StreamChunk,
};
use futures_util::{future, stream};
use serde_json::Value;
use tokio::sync::mpsc::UnboundedReceiver;

/// One scripted answer
pub enum Script {
    /// Stream these items in order
    Chunks(Vec<Result<StreamChunk, AppError>>),
    /// Stream whatever the test sends on the channel
    Channel(UnboundedReceiver<Result<StreamChunk, AppError>>),
    /// Run raw SSE bytes through the real parser; payloads are `{"text": "..."}`
    Sse(Vec<&'static [u8]>),
    /// Fail before any output
    Fail(AppError),
    /// Answer in one piece
    Reply(String),
    /// Never answer, like a server that accepts the connection and stalls
    Hang,
}

/// Provider that replays scripts, one per request
pub struct ScriptedProvider {
    scripts: Mutex<VecDeque<Script>>,
    requests: Mutex<Vec<ChatRequest>>,
    capabilities: LlmCapabilities,
}

impl ScriptedProvider {
    pub fn new(scripts: Vec<Script>) -> Self {
        Self {
            scripts: Mutex::new(scripts.into()),
            requests: Mutex::new(Vec::new()),
            capabilities: LlmCapabilities::full_featured(),
        }
    }

    pub fn with_capabilities(mut self, capabilities: LlmCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_script(&self, request: &ChatRequest) -> Script {
        self.requests.lock().unwrap().push(request.clone());
        self.scripts
            .lock()
            .unwrap()
            .pop_front()
            .expect("no script left for request")
    }
}

fn parse_text_payload(payload: &str) -> Option<Result<StreamChunk, AppError>> {
    match serde_json::from_str::<Value>(payload) {
        Ok(value) => value
            .get("text")
            .and_then(Value::as_str)
            .map(|text| Ok(StreamChunk::text(text))),
        Err(e) => Some(Err(AppError::parse(format!("bad chunk: {e}")))),
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted Provider"
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.capabilities
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let content = match self.next_script(request) {
            Script::Reply(text) => text,
            Script::Fail(e) => return Err(e),
            Script::Chunks(chunks) => chunks
                .into_iter()
                .filter_map(Result::ok)
                .map(|c| c.delta)
                .collect(),
            Script::Hang => future::pending().await,
            Script::Channel(_) | Script::Sse(_) => {
                panic!("streaming script used for a one-shot request")
            }
        };
        Ok(ChatResponse {
            content,
            model: "scripted-model".to_owned(),
            usage: None,
            finish_reason: Some("stop".to_owned()),
        })
    }

    async fn complete_stream(&self, request: &ChatRequest) -> Result<ChatStream, AppError> {
        match self.next_script(request) {
            Script::Chunks(chunks) => Ok(Box::pin(stream::iter(chunks))),
            Script::Channel(rx) => Ok(Box::pin(stream::unfold(rx, |mut rx| async move {
                rx.recv().await.map(|item| (item, rx))
            }))),
            Script::Sse(parts) => {
                let bytes: Vec<Result<Bytes, io::Error>> =
                    parts.into_iter().map(|p| Ok(Bytes::from_static(p))).collect();
                Ok(create_sse_stream(
                    stream::iter(bytes),
                    parse_text_payload,
                    "scripted",
                ))
            }
            Script::Fail(e) => Err(e),
            Script::Hang => future::pending().await,
            Script::Reply(text) => Ok(Box::pin(stream::iter(vec![
                Ok(StreamChunk::text(text)),
                Ok(StreamChunk::done()),
            ]))),
        }
    }
}
