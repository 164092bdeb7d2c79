// ABOUTME: Line-buffering Server-Sent Events parser for streamed chat completions
// ABOUTME: Handles partial lines across network chunks and several events per chunk
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

//! # SSE Stream Parser
//!
//! Network chunks do not line up with SSE event boundaries: one chunk may
//! carry several `data:` lines, and a JSON payload may be split across two
//! chunks. [`SseLineBuffer`] accumulates bytes until a full line is
//! available; [`create_sse_stream`] turns a byte stream into a [`ChatStream`]
//! using a provider-supplied payload parser.

use std::collections::VecDeque;
use std::mem;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::stream::unfold;
use futures_util::{future, Stream, StreamExt};

use super::{ChatStream, StreamChunk};
use crate::errors::AppError;

/// A parsed SSE event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    /// A `data:` payload with the prefix stripped
    Data(String),
    /// The `[DONE]` termination signal
    Done,
}

/// Buffers bytes until complete SSE lines are available
#[derive(Debug, Default)]
pub struct SseLineBuffer {
    buffer: String,
}

impl SseLineBuffer {
    /// Create a new empty line buffer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Append a network chunk and return every event completed by it
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<SseEvent> {
        self.buffer.push_str(&String::from_utf8_lossy(bytes));

        let mut events = Vec::new();
        while let Some(newline_pos) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=newline_pos).collect();
            if let Some(event) = parse_line(&line) {
                events.push(event);
            }
        }
        events
    }

    /// Parse whatever is left once the byte stream ends
    pub fn flush(&mut self) -> Vec<SseEvent> {
        let remaining = mem::take(&mut self.buffer);
        parse_line(&remaining).into_iter().collect()
    }
}

/// Blank lines separate events; `event:`, `id:`, `retry:` and comments are ignored
fn parse_line(line: &str) -> Option<SseEvent> {
    let trimmed = line.trim();
    if trimmed == "data: [DONE]" || trimmed == "data:[DONE]" {
        return Some(SseEvent::Done);
    }

    let data = trimmed.strip_prefix("data:")?.trim_start();
    if data.is_empty() {
        None
    } else {
        Some(SseEvent::Data(data.to_owned()))
    }
}

type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>;

struct SseStreamState<F> {
    bytes: ByteStream,
    parser: SseLineBuffer,
    pending: VecDeque<Result<StreamChunk, AppError>>,
    parse_data: F,
    provider_name: &'static str,
    stream_ended: bool,
}

impl<F> SseStreamState<F>
where
    F: Fn(&str) -> Option<Result<StreamChunk, AppError>>,
{
    fn enqueue(&mut self, events: Vec<SseEvent>) {
        for event in events {
            match event {
                SseEvent::Data(payload) => {
                    if let Some(result) = (self.parse_data)(&payload) {
                        self.pending.push_back(result);
                    }
                }
                SseEvent::Done => self.pending.push_back(Ok(StreamChunk::done())),
            }
        }
    }
}

/// Wrap a `reqwest` byte stream with SSE line buffering
///
/// `parse_data` converts one JSON payload into a chunk, or returns `None` to
/// skip it. Empty non-final deltas are dropped from the resulting stream.
pub fn create_sse_stream<S, F>(
    byte_stream: S,
    parse_data: F,
    provider_name: &'static str,
) -> ChatStream
where
    S: Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
    F: Fn(&str) -> Option<Result<StreamChunk, AppError>> + Send + 'static,
{
    let state = SseStreamState {
        bytes: Box::pin(byte_stream),
        parser: SseLineBuffer::new(),
        pending: VecDeque::new(),
        parse_data,
        provider_name,
        stream_ended: false,
    };

    let stream = unfold(state, |mut state| async move {
        loop {
            if let Some(item) = state.pending.pop_front() {
                return Some((item, state));
            }
            if state.stream_ended {
                return None;
            }

            match state.bytes.next().await {
                Some(Ok(bytes)) => {
                    let events = state.parser.feed(&bytes);
                    state.enqueue(events);
                }
                Some(Err(e)) => {
                    state.stream_ended = true;
                    let error = AppError::external_service(
                        state.provider_name,
                        format!("Stream read error: {e}"),
                    );
                    return Some((Err(error), state));
                }
                None => {
                    state.stream_ended = true;
                    let events = state.parser.flush();
                    state.enqueue(events);
                }
            }
        }
    });

    let filtered = stream.filter(|result| {
        future::ready(
            result
                .as_ref()
                .map_or(true, |chunk| !chunk.delta.is_empty() || chunk.is_final),
        )
    });

    Box::pin(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_events_in_one_chunk() {
        let mut parser = SseLineBuffer::new();
        let events = parser.feed(b"data: {\"a\":1}\n\ndata: {\"b\":2}\n\ndata: [DONE]\n\n");
        assert_eq!(
            events,
            vec![
                SseEvent::Data(r#"{"a":1}"#.to_owned()),
                SseEvent::Data(r#"{"b":2}"#.to_owned()),
                SseEvent::Done,
            ]
        );
    }

    #[test]
    fn test_payload_split_across_chunks() {
        let mut parser = SseLineBuffer::new();
        assert!(parser.feed(b"data: {\"content\":\"Sun").is_empty());
        let events = parser.feed(b"ny\"}\r\n");
        assert_eq!(events, vec![SseEvent::Data(r#"{"content":"Sunny"}"#.to_owned())]);
    }

    #[test]
    fn test_flush_emits_unterminated_line() {
        let mut parser = SseLineBuffer::new();
        assert!(parser.feed(b": keep-alive\nevent: message\ndata: tail").is_empty());
        assert_eq!(parser.flush(), vec![SseEvent::Data("tail".to_owned())]);
        assert!(parser.flush().is_empty());
    }
}
