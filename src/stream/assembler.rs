//! Tool-call fragment reassembly.
//!
//! Tool invocations stream as fragments keyed by a stable index so that
//! several calls' pieces can interleave across chunks. The assembler merges
//! fragments per index: id and name are set when present (sent once,
//! typically on the first fragment), argument text is appended in arrival
//! order and never overwritten.

use std::collections::BTreeMap;

use tracing::warn;

use crate::types::{ToolCall, ToolCallDelta};

/// Upper bound on fragment indices per turn; higher indices are ignored.
/// Guards accumulator memory against a misbehaving source.
const MAX_TOOL_CALLS: usize = 100;

#[derive(Debug, Default)]
struct Fragment {
    id: String,
    name: String,
    arguments: String,
}

/// Accumulates tool-call fragments for one streaming turn.
#[derive(Debug, Default)]
pub struct ToolCallAssembler {
    fragments: BTreeMap<usize, Fragment>,
}

impl ToolCallAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one fragment into the set.
    pub fn ingest(&mut self, delta: &ToolCallDelta) {
        if delta.index >= MAX_TOOL_CALLS {
            warn!(
                index = delta.index,
                limit = MAX_TOOL_CALLS,
                "ignoring tool-call fragment with out-of-range index"
            );
            return;
        }

        let fragment = self.fragments.entry(delta.index).or_default();
        if let Some(ref id) = delta.id
            && !id.is_empty()
        {
            fragment.id = id.clone();
        }
        if let Some(ref name) = delta.name
            && !name.is_empty()
        {
            fragment.name = name.clone();
        }
        if let Some(ref arguments) = delta.arguments {
            fragment.arguments.push_str(arguments);
        }
    }

    /// True when at least one fragment has been ingested.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Consume the set, returning executable calls in index order.
    ///
    /// Fragments that never received both an id and a name are dropped
    /// silently — never executed; the model is expected to retry.
    pub fn finalize(self) -> Vec<ToolCall> {
        self.fragments
            .into_values()
            .filter(|f| !f.id.is_empty() && !f.name.is_empty())
            .map(|f| ToolCall::new(f.id, f.name, f.arguments))
            .collect()
    }
}
