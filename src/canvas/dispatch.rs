//! Canvas tool definitions and dispatch.
//!
//! Maps a finalized [`ToolCall`] onto the [`ToolExecutor`] contract and
//! serializes the outcome into the tool-result string fed back to the
//! model. Argument decode failures and unknown tool names become structured
//! error results — the conversation continues and the model can retry.

use metrics::counter;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::{ElementPatch, ToolExecutor};
use crate::telemetry;
use crate::types::{ToolCall, ToolDefinition};

/// Definitions for every canvas tool, in the shape the wire expects under
/// `tools[].function`.
pub fn canvas_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "get_canvas_elements",
            "Get every element on the canvas (shapes, text, arrows). Call this \
             when you need to know the current canvas state.",
            json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        ),
        ToolDefinition::new(
            "get_elements_by_ids",
            "Look up specific canvas elements by id. Missing ids are reported, \
             not errors.",
            json!({
                "type": "object",
                "properties": {
                    "ids": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Element ids to look up"
                    }
                },
                "required": ["ids"]
            }),
        ),
        ToolDefinition::new(
            "delete_elements",
            "Delete the given elements. Deleting a shape also deletes text \
             bound inside it.",
            json!({
                "type": "object",
                "properties": {
                    "ids": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Element ids to delete"
                    }
                },
                "required": ["ids"]
            }),
        ),
        ToolDefinition::new(
            "update_elements",
            "Update attributes of existing elements (color, text, size, ...). \
             Pass only the id and the attributes to change; everything else \
             keeps its value. Prefer this when modifying existing elements.",
            json!({
                "type": "object",
                "properties": {
                    "elements": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "id": {"type": "string", "description": "Element id (required)"},
                                "x": {"type": "number"},
                                "y": {"type": "number"},
                                "width": {"type": "number"},
                                "height": {"type": "number"},
                                "text": {"type": "string"},
                                "strokeColor": {"type": "string"},
                                "backgroundColor": {"type": "string"},
                                "strokeWidth": {"type": "number"},
                                "strokeStyle": {"type": "string", "enum": ["solid", "dashed", "dotted"]},
                                "fillStyle": {"type": "string", "enum": ["solid", "hachure", "cross-hatch"]},
                                "opacity": {"type": "number"},
                                "fontSize": {"type": "number"}
                            },
                            "required": ["id"]
                        },
                        "description": "Elements to update; each needs an id plus the attributes to change"
                    }
                },
                "required": ["elements"]
            }),
        ),
        ToolDefinition::new(
            "move_elements",
            "Move elements by an offset. Bound elements (like text inside a \
             shape) move along. Use when adjusting layout.",
            json!({
                "type": "object",
                "properties": {
                    "ids": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Element ids to move"
                    },
                    "dx": {"type": "number", "description": "Horizontal offset (positive is right)"},
                    "dy": {"type": "number", "description": "Vertical offset (positive is down)"}
                },
                "required": ["ids", "dx", "dy"]
            }),
        ),
        ToolDefinition::new(
            "check_and_fix_layout",
            "Check the canvas for overlapping or cramped elements and fix the \
             spacing where possible.",
            json!({
                "type": "object",
                "properties": {
                    "minGap": {
                        "type": "number",
                        "description": "Minimum gap to enforce between elements, in canvas units"
                    }
                },
                "required": []
            }),
        ),
    ]
}

#[derive(Deserialize)]
struct IdsArgs {
    ids: Vec<String>,
}

#[derive(Deserialize)]
struct UpdateArgs {
    elements: Vec<ElementPatch>,
}

#[derive(Deserialize)]
struct MoveArgs {
    ids: Vec<String>,
    dx: f64,
    dy: f64,
}

#[derive(Deserialize)]
struct LayoutArgs {
    #[serde(rename = "minGap", default)]
    min_gap: Option<f64>,
}

/// Execute one finalized tool call against the executor.
///
/// Always returns a serialized JSON result string — success or a
/// structured `{"error": ...}` — never panics on model-supplied input.
pub fn execute_tool_call(call: &ToolCall, executor: &mut dyn ToolExecutor) -> String {
    counter!(telemetry::TOOL_CALLS_TOTAL, "tool" => call.name.clone()).increment(1);

    match call.name.as_str() {
        "get_canvas_elements" => {
            let elements = executor.get_canvas_elements();
            if elements.is_empty() {
                return json!({"message": "The canvas is empty"}).to_string();
            }
            json!({
                "message": format!("The canvas holds {} elements", elements.len()),
                "elements": elements,
            })
            .to_string()
        }
        "get_elements_by_ids" => match call.parse_arguments::<IdsArgs>() {
            Ok(args) if !args.ids.is_empty() => {
                let outcome = executor.get_elements_by_ids(&args.ids);
                json!({
                    "message": format!("Found {} of {} elements", outcome.elements.len(), args.ids.len()),
                    "elements": outcome.elements,
                    "notFound": outcome.not_found,
                })
                .to_string()
            }
            Ok(_) => error_result("provide a non-empty array of element ids"),
            Err(e) => argument_error(call, e),
        },
        "delete_elements" => match call.parse_arguments::<IdsArgs>() {
            Ok(args) if !args.ids.is_empty() => {
                let outcome = executor.delete_elements(&args.ids);
                if outcome.deleted.is_empty() {
                    return json!({
                        "message": "No deletable elements found",
                        "notFound": outcome.not_found,
                    })
                    .to_string();
                }
                json!({
                    "message": format!("Deleted {} elements", outcome.deleted.len()),
                    "deleted": outcome.deleted,
                    "notFound": outcome.not_found,
                })
                .to_string()
            }
            Ok(_) => error_result("provide a non-empty array of element ids to delete"),
            Err(e) => argument_error(call, e),
        },
        "update_elements" => match call.parse_arguments::<UpdateArgs>() {
            Ok(args) if !args.elements.is_empty() => {
                if args.elements.iter().any(|p| p.id.is_empty()) {
                    return error_result("every element must include an id");
                }
                let outcome = executor.update_elements(&args.elements);
                if outcome.updated.is_empty() {
                    return json!({
                        "message": "No updatable elements found",
                        "notFound": outcome.not_found,
                    })
                    .to_string();
                }
                json!({
                    "message": format!("Updated {} elements", outcome.updated.len()),
                    "updated": outcome.updated,
                    "notFound": outcome.not_found,
                })
                .to_string()
            }
            Ok(_) => error_result("provide a non-empty array of elements to update"),
            Err(e) => argument_error(call, e),
        },
        "move_elements" => match call.parse_arguments::<MoveArgs>() {
            Ok(args) if !args.ids.is_empty() => {
                let outcome = executor.move_elements(&args.ids, args.dx, args.dy);
                if outcome.moved.is_empty() {
                    return json!({
                        "message": "No movable elements found",
                        "notFound": outcome.not_found,
                    })
                    .to_string();
                }
                json!({
                    "message": format!("Moved {} elements", outcome.moved.len()),
                    "moved": outcome.moved,
                    "notFound": outcome.not_found,
                })
                .to_string()
            }
            Ok(_) => error_result("provide a non-empty array of element ids to move"),
            Err(e) => argument_error(call, e),
        },
        "check_and_fix_layout" => match call.parse_arguments::<LayoutArgs>() {
            Ok(args) => {
                let report = executor.check_and_fix_layout(args.min_gap);
                json!({
                    "message": report.message,
                    "hasIssues": report.has_issues,
                    "issues": report.issues,
                    "fixedCount": report.fixed_count,
                })
                .to_string()
            }
            Err(e) => argument_error(call, e),
        },
        other => {
            warn!(tool = %other, "model requested an unknown tool");
            error_result(&format!("unknown tool: {other}"))
        }
    }
}

fn error_result(message: &str) -> String {
    json!({"error": message}).to_string()
}

fn argument_error(call: &ToolCall, error: serde_json::Error) -> String {
    warn!(tool = %call.name, %error, "tool arguments failed to decode");
    error_result(&format!("failed to parse arguments: {error}"))
}
