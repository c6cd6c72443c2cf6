//! SSE stream decoding.
//!
//! Converts raw byte chunks from a chat-completions response into
//! [`StreamEvent`]s. Chunk boundaries align with nothing — not lines, not
//! JSON envelopes, not even UTF-8 sequences — so the decoder buffers bytes
//! until a full `\n`-terminated line is available, then frames and decodes
//! it. A payload that fails to decode is skipped: truncated envelopes are
//! expected under network buffering and no exactly-once delivery is
//! assumed.

use metrics::counter;
use serde::Deserialize;
use tracing::debug;

use crate::telemetry;
use crate::types::{FinishReason, StreamEvent, ToolCallDelta};

const DATA_PREFIX: &str = "data: ";
const DONE_SENTINEL: &str = "[DONE]";

/// Envelope for one `data:` line.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    delta: Delta,
    #[serde(default)]
    finish_reason: Option<FinishReason>,
}

#[derive(Debug, Default, Deserialize)]
struct Delta {
    #[serde(default)]
    content: Option<String>,
    /// Reasoning text arrives under either name depending on the source.
    #[serde(default)]
    reasoning_content: Option<String>,
    #[serde(default)]
    thinking: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ToolCallChunk>,
}

#[derive(Debug, Deserialize)]
struct ToolCallChunk {
    #[serde(default)]
    index: usize,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    function: Option<FunctionChunk>,
}

#[derive(Debug, Default, Deserialize)]
struct FunctionChunk {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    arguments: Option<String>,
}

/// Incremental decoder for one streaming response.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    finish_reason: Option<FinishReason>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one network chunk; returns the events completed by it.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            self.decode_line(&line, &mut events);
        }
        events
    }

    /// Drain a trailing unterminated line once the stream has ended.
    pub fn flush(&mut self) -> Vec<StreamEvent> {
        let mut events = Vec::new();
        if !self.buffer.is_empty() {
            let line = std::mem::take(&mut self.buffer);
            self.decode_line(&line, &mut events);
        }
        events
    }

    /// The last turn-completion reason reported by the source, if any.
    ///
    /// Tracked independently of tool-call fragments: some sources report
    /// completion before fragment streaming is consistent, and the caller
    /// treats fragment evidence as authoritative.
    pub fn finish_reason(&self) -> Option<&FinishReason> {
        self.finish_reason.as_ref()
    }

    fn decode_line(&mut self, line: &[u8], events: &mut Vec<StreamEvent>) {
        // Complete lines hold whole UTF-8 sequences even when chunks split them.
        let Ok(line) = std::str::from_utf8(line) else {
            debug!("skipping non-UTF-8 stream line");
            counter!(telemetry::ENVELOPE_DECODE_FAILURES_TOTAL).increment(1);
            return;
        };
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        // Non-data lines (event:, id:, retry:, comments) carry no payload here.
        let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
            return;
        };
        let payload = payload.trim();

        // Terminator line: marks logical end, carries no envelope.
        if payload == DONE_SENTINEL {
            return;
        }

        let envelope: Envelope = match serde_json::from_str(payload) {
            Ok(envelope) => envelope,
            Err(error) => {
                debug!(%error, "skipping undecodable stream envelope");
                counter!(telemetry::ENVELOPE_DECODE_FAILURES_TOTAL).increment(1);
                return;
            }
        };

        for choice in envelope.choices {
            let delta = choice.delta;

            if let Some(thinking) = delta.reasoning_content.or(delta.thinking)
                && !thinking.is_empty()
            {
                events.push(StreamEvent::Thinking(thinking));
            }

            if let Some(content) = delta.content
                && !content.is_empty()
            {
                events.push(StreamEvent::Content(content));
            }

            for chunk in delta.tool_calls {
                let function = chunk.function.unwrap_or_default();
                events.push(StreamEvent::ToolCall(ToolCallDelta {
                    index: chunk.index,
                    id: chunk.id,
                    name: function.name,
                    arguments: function.arguments,
                }));
            }

            if let Some(reason) = choice.finish_reason {
                self.finish_reason = Some(reason.clone());
                events.push(StreamEvent::Finish(reason));
            }
        }
    }
}
