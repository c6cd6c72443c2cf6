//! Callback surface for streaming output.
//!
//! Decouples the engine from presentation: the caller receives text and
//! thinking deltas as they arrive (to render partial progress), synthesized
//! status notices, and tool lifecycle events. Fatal errors are not sink
//! events — they come back once as the `Err` of `run()`.

use crate::types::ToolCall;

/// Events emitted while a run streams.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent<'a> {
    /// A chunk of displayable text. Feed accumulated text to the
    /// drawing-command parser to surface commands as they complete.
    TextDelta(&'a str),

    /// A chunk of reasoning/thinking text.
    Thinking(&'a str),

    /// Synthesized status text (tool-round transitions, budget advisories).
    Notice(&'a str),

    /// A tool call is about to execute.
    ToolStarted { call: &'a ToolCall },

    /// A tool call finished; `result` is the serialized tool result.
    ToolFinished { call: &'a ToolCall, result: &'a str },

    /// One streaming turn completed (more may follow after tool rounds).
    TurnFinished,
}

/// Receiver for engine events during one run.
pub trait EngineSink {
    fn handle(&mut self, event: EngineEvent<'_>);
}

/// Sink that collects everything, for tests and programmatic use.
#[derive(Debug, Default)]
pub struct CollectingSink {
    /// Accumulated displayable text (content deltas and notices).
    pub text: String,
    /// Accumulated reasoning text.
    pub thinking: String,
    /// Names of tools that executed, in order.
    pub tools_run: Vec<String>,
    /// Number of completed streaming turns.
    pub turns: usize,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EngineSink for CollectingSink {
    fn handle(&mut self, event: EngineEvent<'_>) {
        match event {
            EngineEvent::TextDelta(chunk) => self.text.push_str(chunk),
            EngineEvent::Notice(notice) => self.text.push_str(notice),
            EngineEvent::Thinking(chunk) => self.thinking.push_str(chunk),
            EngineEvent::ToolStarted { call } => self.tools_run.push(call.name.clone()),
            EngineEvent::ToolFinished { .. } => {}
            EngineEvent::TurnFinished => self.turns += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collecting_sink_accumulates_text() {
        let mut sink = CollectingSink::new();
        sink.handle(EngineEvent::TextDelta("Hello "));
        sink.handle(EngineEvent::TextDelta("world"));
        assert_eq!(sink.text, "Hello world");
    }

    #[test]
    fn collecting_sink_records_tools() {
        let mut sink = CollectingSink::new();
        let call = ToolCall::new("call_1", "delete_elements", "{}");
        sink.handle(EngineEvent::ToolStarted { call: &call });
        assert_eq!(sink.tools_run, vec!["delete_elements"]);
    }
}
