// ABOUTME: Shared SSE (Server-Sent Events) line-buffering parser for LLM streaming responses
// ABOUTME: Handles partial lines across network chunks and multiple events per chunk
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # SSE Stream Parser
//!
//! A line-buffering parser for Server-Sent Events used by every provider.
//!
//! 1. **Multiple events per network chunk**: all events in a chunk are emitted,
//!    in order.
//! 2. **Partial payloads across chunk boundaries**: the line buffer holds
//!    incomplete data until its newline arrives.
//!
//! Each provider supplies a `parse_data` closure that turns a `data:` payload
//! into a [`StreamChunk`]; framing, `[DONE]` detection and end-of-stream
//! flushing are handled once here.

use std::collections::VecDeque;
use std::fmt::Display;
use std::mem;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::stream::unfold;
use futures_util::{future, Stream, StreamExt};

use super::{ChatStream, StreamChunk};
use crate::errors::AppError;

/// A parsed SSE event from the stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    /// A `data:` payload with the prefix stripped
    Data(String),
    /// The `[DONE]` termination signal
    Done,
}

/// Line-buffering SSE parser
///
/// Lines complete on `\n` (with an optional `\r`). The `data:` lines of one
/// event are joined with `\n` and emitted at the blank line that ends it.
/// A trailing partial line or unfinished event stays buffered for the next
/// `feed()` call.
#[derive(Debug, Default)]
pub struct SseLineBuffer {
    buffer: Vec<u8>,
    data_lines: Vec<String>,
}

impl SseLineBuffer {
    /// Create a new empty line buffer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            data_lines: Vec::new(),
        }
    }

    /// Feed raw bytes, returning every event completed by them
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(bytes);

        // Decode whole lines only so multi-byte characters split across chunks survive
        let mut events = Vec::new();
        while let Some(newline_pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline_pos).collect();
            self.process_line(&String::from_utf8_lossy(&line), &mut events);
        }
        events
    }

    /// Flush a final unterminated line and event when the byte stream ends
    pub fn flush(&mut self) -> Vec<SseEvent> {
        let remaining = mem::take(&mut self.buffer);
        let mut events = Vec::new();
        if !remaining.is_empty() {
            self.process_line(&String::from_utf8_lossy(&remaining), &mut events);
        }
        events.extend(self.dispatch());
        events
    }

    fn process_line(&mut self, line: &str, events: &mut Vec<SseEvent>) {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            events.extend(self.dispatch());
            return;
        }
        // event:, id:, retry: and comments are ignored
        if let Some(value) = line.strip_prefix("data:") {
            let value = value.strip_prefix(' ').unwrap_or(value);
            self.data_lines.push(value.to_owned());
        }
    }

    fn dispatch(&mut self) -> Option<SseEvent> {
        let data = mem::take(&mut self.data_lines).join("\n");
        let data = data.trim();
        if data.is_empty() {
            return None;
        }
        if data == "[DONE]" {
            return Some(SseEvent::Done);
        }
        Some(SseEvent::Data(data.to_owned()))
    }
}

/// Internal state for the SSE stream unfold
struct SseStreamState {
    parser: SseLineBuffer,
    pending: VecDeque<Result<StreamChunk, AppError>>,
    stream_ended: bool,
}

impl SseStreamState {
    fn push_events<F>(&mut self, events: Vec<SseEvent>, parse_data: &F)
    where
        F: Fn(&str) -> Option<Result<StreamChunk, AppError>>,
    {
        for event in events {
            match event {
                SseEvent::Data(payload) => {
                    if let Some(result) = parse_data(&payload) {
                        self.pending.push_back(result);
                    }
                }
                SseEvent::Done => self.pending.push_back(Ok(StreamChunk::done())),
            }
        }
    }
}

type ByteStream<E> = Pin<Box<dyn Stream<Item = Result<Bytes, E>> + Send>>;

/// Create a buffered SSE stream from a raw byte stream
///
/// `parse_data` returns `None` to skip events that carry no output (empty
/// deltas, metadata-only chunks) and `Some(Err(..))` for malformed payloads.
/// A read error on the byte stream is reported once and ends the stream.
pub fn create_sse_stream<S, E, F>(
    byte_stream: S,
    parse_data: F,
    provider_name: &'static str,
) -> ChatStream
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Display + Send + 'static,
    F: Fn(&str) -> Option<Result<StreamChunk, AppError>> + Send + 'static,
{
    let state = SseStreamState {
        parser: SseLineBuffer::new(),
        pending: VecDeque::new(),
        stream_ended: false,
    };

    let stream = unfold(
        (
            Box::pin(byte_stream) as ByteStream<E>,
            state,
            parse_data,
        ),
        move |(mut byte_stream, mut state, parse_data)| async move {
            loop {
                // Drain pending events first (multiple SSE events per chunk)
                if let Some(item) = state.pending.pop_front() {
                    return Some((item, (byte_stream, state, parse_data)));
                }
                if state.stream_ended {
                    return None;
                }

                match byte_stream.next().await {
                    Some(Ok(bytes)) => {
                        let events = state.parser.feed(&bytes);
                        state.push_events(events, &parse_data);
                    }
                    Some(Err(e)) => {
                        state.stream_ended = true;
                        return Some((
                            Err(AppError::external_service(
                                provider_name,
                                format!("Stream read error: {e}"),
                            )),
                            (byte_stream, state, parse_data),
                        ));
                    }
                    None => {
                        state.stream_ended = true;
                        let events = state.parser.flush();
                        state.push_events(events, &parse_data);
                    }
                }
            }
        },
    );

    // Drop empty deltas unless they mark the end of the stream
    let filtered = stream.filter(|result| {
        future::ready(
            result
                .as_ref()
                .map_or(true, |chunk| !chunk.delta.is_empty() || chunk.is_final),
        )
    });

    Box::pin(filtered)
}
