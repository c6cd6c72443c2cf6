//! Incremental drawing-command parsing.
//!
//! The model interleaves prose with raw JSON drawing commands. As streamed
//! text accumulates, [`parse_commands`] re-scans only the unprocessed tail,
//! emits every command exactly once as soon as it is syntactically
//! complete, and reports the verbatim remaining buffer (any trailing
//! incomplete object) for the next call.

pub mod extract;
pub mod validate;

use metrics::counter;
use serde_json::Value;
use tracing::warn;

use crate::telemetry;
use crate::types::DrawingCommand;
use extract::BalancedObjects;
use validate::{CommandRules, validate_with_rules};

/// Result of one incremental parse pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParseOutcome {
    /// Commands that became complete and valid during this pass, in order.
    pub commands: Vec<DrawingCommand>,
    /// Text after the last fully considered object, preserved verbatim.
    pub remaining_buffer: String,
}

/// Scan `full_text[processed_length..]` for complete drawing commands.
///
/// Every considered object advances the cursor — accepted, rejected for
/// content reasons, or failed JSON decode alike — so a single malformed
/// object can never wedge parsing. Calling again with the same accumulated
/// text and the cursor implied by the previous result never re-emits a
/// command.
pub fn parse_commands(
    full_text: &str,
    processed_length: usize,
    rules: &CommandRules,
) -> ParseOutcome {
    let tail = &full_text[processed_length..];

    let mut commands = Vec::new();
    let mut last_end = 0usize;

    for span in BalancedObjects::new(tail) {
        last_end = span.end;

        let value: Value = match serde_json::from_str(span.text) {
            Ok(value) => value,
            Err(error) => {
                // Skip the object but keep the cursor moving.
                warn!(%error, snippet = truncate(span.text, 100), "drawing command failed to decode");
                counter!(telemetry::COMMANDS_REJECTED_TOTAL).increment(1);
                continue;
            }
        };

        match validate_with_rules(&value, rules) {
            Ok(acceptance) => {
                if let Some(w) = acceptance.warning {
                    warn!(id = %w.id, x = w.x, y = w.y, "command coordinates outside expected range");
                }
                match serde_json::from_value::<DrawingCommand>(value) {
                    Ok(command) => {
                        counter!(telemetry::COMMANDS_PARSED_TOTAL).increment(1);
                        commands.push(command);
                    }
                    Err(error) => {
                        warn!(%error, "validated command failed to convert");
                        counter!(telemetry::COMMANDS_REJECTED_TOTAL).increment(1);
                    }
                }
            }
            Err(rejection) => {
                warn!(%rejection, snippet = truncate(span.text, 50), "drawing command rejected");
                counter!(telemetry::COMMANDS_REJECTED_TOTAL).increment(1);
            }
        }
    }

    let new_processed = processed_length + last_end;
    ParseOutcome {
        commands,
        remaining_buffer: full_text[new_processed..].to_string(),
    }
}

/// Single-owner accumulator for chunk-at-a-time callers.
///
/// Owns the growing text and the processed-length cursor for one stream
/// lifetime; the cursor only advances and text before it is never
/// re-scanned.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    text: String,
    processed: usize,
    rules: CommandRules,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: CommandRules) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    /// Append a text chunk and return any commands it completed.
    pub fn push(&mut self, chunk: &str) -> Vec<DrawingCommand> {
        self.text.push_str(chunk);
        let outcome = parse_commands(&self.text, self.processed, &self.rules);
        self.processed = self.text.len() - outcome.remaining_buffer.len();
        outcome.commands
    }

    /// Full accumulated text so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The unprocessed tail (any trailing incomplete object plus prose).
    pub fn remaining(&self) -> &str {
        &self.text[self.processed..]
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prose_only_consumes_nothing() {
        let outcome = parse_commands("drawing a rectangle now", 0, &CommandRules::default());
        assert!(outcome.commands.is_empty());
        assert_eq!(outcome.remaining_buffer, "drawing a rectangle now");
    }

    #[test]
    fn malformed_object_advances_cursor() {
        let text = r#"{"id": broken} {"id":"ok"}"#;
        let outcome = parse_commands(text, 0, &CommandRules::default());
        assert_eq!(outcome.commands.len(), 1);
        assert_eq!(outcome.commands[0].id, "ok");
        assert!(outcome.remaining_buffer.is_empty());
    }

    #[test]
    fn command_buffer_tracks_cursor() {
        let mut buffer = CommandBuffer::new();
        assert!(buffer.push(r#"start {"id":"a","type":"text","#).is_empty());
        let commands = buffer.push(r#""x":1,"y":2} end"#);
        assert_eq!(commands.len(), 1);
        assert_eq!(buffer.remaining(), " end");
    }
}
