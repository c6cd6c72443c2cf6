//! Telemetry metric name constants.
//!
//! Centralised metric names for easel operations. Consumers install their
//! own `metrics` recorder (e.g. prometheus, statsd); without a recorder
//! installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `easel_`. Counters end in `_total`.
//!
//! # Common labels
//!
//! - `tool` — canvas tool name (e.g. "delete_elements")

/// Total streaming requests issued (one per orchestration turn).
pub const REQUESTS_TOTAL: &str = "easel_requests_total";

/// Total tool-execution rounds (one per turn that carried tool calls).
pub const TOOL_ROUNDS_TOTAL: &str = "easel_tool_rounds_total";

/// Total individual tool calls executed.
///
/// Labels: `tool`.
pub const TOOL_CALLS_TOTAL: &str = "easel_tool_calls_total";

/// Total SSE data lines whose envelope failed to decode and were skipped.
pub const ENVELOPE_DECODE_FAILURES_TOTAL: &str = "easel_envelope_decode_failures_total";

/// Total drawing commands accepted by the incremental parser.
pub const COMMANDS_PARSED_TOTAL: &str = "easel_commands_parsed_total";

/// Total drawing-command candidates rejected (bad id/type/coordinates or
/// malformed JSON).
pub const COMMANDS_REJECTED_TOTAL: &str = "easel_commands_rejected_total";
