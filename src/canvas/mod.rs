//! Canvas tool-executor contract.
//!
//! The engine never touches the drawing surface directly; it reaches it
//! through [`ToolExecutor`], implemented by the canvas collaborator. Every
//! call is synchronous, completes wholly before the next is issued, and is
//! idempotent on missing ids — unknown ids are reported in `not_found`,
//! never raised as errors.

pub mod context;
pub mod dispatch;

use serde::{Deserialize, Serialize};

pub use context::format_selection_context;
pub use dispatch::{canvas_tool_definitions, execute_tool_call};

/// Summary of one canvas element, as reported back to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// For text bound inside a shape, the container shape's id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
}

/// A partial update: `id` plus only the attributes to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementPatch {
    pub id: String,
    #[serde(flatten)]
    pub changes: serde_json::Map<String, serde_json::Value>,
}

/// Result of a lookup by ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupOutcome {
    pub elements: Vec<ElementSummary>,
    pub not_found: Vec<String>,
}

/// Result of a delete: ids removed (including cascaded bound elements) and
/// ids that did not exist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub deleted: Vec<String>,
    pub not_found: Vec<String>,
}

/// Result of a batch update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateOutcome {
    pub updated: Vec<String>,
    pub not_found: Vec<String>,
}

/// Result of a batch move.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub moved: Vec<String>,
    pub not_found: Vec<String>,
}

/// Result of a layout check/fix pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutReport {
    pub has_issues: bool,
    pub issues: Vec<String>,
    pub fixed_count: usize,
    pub message: String,
}

/// The canvas collaborator's side of the tool boundary.
pub trait ToolExecutor {
    /// Summaries of every element currently on the canvas.
    fn get_canvas_elements(&mut self) -> Vec<ElementSummary>;

    /// Look up specific elements by id.
    fn get_elements_by_ids(&mut self, ids: &[String]) -> LookupOutcome;

    /// Delete elements (bound children cascade on the canvas side).
    fn delete_elements(&mut self, ids: &[String]) -> DeleteOutcome;

    /// Apply partial attribute updates.
    fn update_elements(&mut self, patches: &[ElementPatch]) -> UpdateOutcome;

    /// Translate elements by (dx, dy).
    fn move_elements(&mut self, ids: &[String], dx: f64, dy: f64) -> MoveOutcome;

    /// Detect overlap/spacing problems and optionally fix them.
    fn check_and_fix_layout(&mut self, min_gap: Option<f64>) -> LayoutReport;
}
