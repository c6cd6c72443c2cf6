//! Streaming event types

use serde::{Deserialize, Serialize};

/// One decoded unit from the wire.
///
/// Transient: events are folded into the turn's accumulators (text buffer,
/// tool-call assembler) and not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Reasoning/thinking content (extended thinking models)
    Thinking(String),

    /// Displayable text content chunk
    Content(String),

    /// One fragment of a tool call; many fragments share an index
    ToolCall(ToolCallDelta),

    /// Turn-completion signal reported by the source
    Finish(FinishReason),
}

/// A tool-call fragment as it arrives on the wire.
///
/// `id` and `name` are typically sent once on the first fragment for an
/// index; `arguments` streams incrementally in arbitrary-length pieces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolCallDelta {
    pub index: usize,
    pub id: Option<String>,
    pub name: Option<String>,
    pub arguments: Option<String>,
}

/// Reason the model stopped generating
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    #[default]
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
    /// Any reason this crate does not model explicitly
    #[serde(other)]
    Other,
}
