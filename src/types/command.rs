//! Drawing command types.
//!
//! A drawing command is a validated JSON object embedded in model prose.
//! Two lifecycles share the shape: a *creation* command carries a `type`
//! plus numeric `x`/`y`, a *patch* command carries only `id` and the
//! attributes to change. Presence of `type` disambiguates.

use serde::{Deserialize, Serialize};

/// Shape kinds a creation command may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Diamond,
    Text,
    Arrow,
    Line,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Diamond => "diamond",
            ShapeKind::Text => "text",
            ShapeKind::Arrow => "arrow",
            ShapeKind::Line => "line",
        }
    }
}

/// A validated drawing command.
///
/// All attributes beyond `id` and `type` stay as raw JSON so the canvas
/// collaborator decides what to do with them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingCommand {
    pub id: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ShapeKind>,
    #[serde(flatten)]
    pub attrs: serde_json::Map<String, serde_json::Value>,
}

impl DrawingCommand {
    /// True when this command creates a new element (has a `type`).
    pub fn is_creation(&self) -> bool {
        self.kind.is_some()
    }

    /// Numeric attribute lookup (`x`, `y`, `width`, ...).
    pub fn number(&self, key: &str) -> Option<f64> {
        self.attrs.get(key).and_then(|v| v.as_f64())
    }
}
