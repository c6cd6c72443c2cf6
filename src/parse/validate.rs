//! Drawing-command validation rules.
//!
//! Applied to a candidate object that already decoded as JSON; malformed
//! JSON never reaches these rules. Rules run in order: id, type allowlist,
//! creation coordinates, then an advisory coordinate-bound check that warns
//! without rejecting.

use serde_json::Value;

/// Shape kinds accepted in a creation command's `type` field.
pub const ALLOWED_SHAPE_KINDS: &[&str] =
    &["rectangle", "ellipse", "diamond", "text", "arrow", "line"];

/// Coordinate sanity bounds for creation commands.
///
/// Out-of-bound coordinates are accepted with a warning; the canvas can
/// scroll, so off-screen content is still valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandRules {
    pub max_x: f64,
    pub max_y: f64,
}

impl Default for CommandRules {
    fn default() -> Self {
        Self {
            max_x: 2000.0,
            max_y: 2000.0,
        }
    }
}

/// Why a candidate was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("missing or empty id")]
    MissingId,

    #[error("unknown shape type: {0}")]
    UnknownType(String),

    #[error("creation command {0} missing numeric x/y")]
    MissingCoordinates(String),
}

/// Advisory warning attached to an accepted command.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateWarning {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

/// An accepted candidate, possibly with an advisory warning.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Acceptance {
    pub warning: Option<CoordinateWarning>,
}

/// Apply the domain rules to one decoded candidate object.
pub fn validate(value: &Value) -> Result<Acceptance, Rejection> {
    let id = match value.get("id").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => id,
        _ => return Err(Rejection::MissingId),
    };

    let kind = value.get("type").and_then(Value::as_str);
    if let Some(kind) = kind
        && !ALLOWED_SHAPE_KINDS.contains(&kind)
    {
        return Err(Rejection::UnknownType(kind.to_string()));
    }

    // A patch command (no type) needs nothing beyond its id.
    if kind.is_none() {
        return Ok(Acceptance::default());
    }

    let x = value.get("x").and_then(Value::as_f64);
    let y = value.get("y").and_then(Value::as_f64);
    let (Some(x), Some(y)) = (x, y) else {
        return Err(Rejection::MissingCoordinates(id.to_string()));
    };

    Ok(Acceptance {
        warning: check_bounds(id, x, y, &CommandRules::default()),
    })
}

/// Like [`validate`] but with caller-supplied coordinate bounds.
pub fn validate_with_rules(value: &Value, rules: &CommandRules) -> Result<Acceptance, Rejection> {
    let mut acceptance = validate(value)?;
    if value.get("type").is_some() {
        let x = value.get("x").and_then(Value::as_f64).unwrap_or_default();
        let y = value.get("y").and_then(Value::as_f64).unwrap_or_default();
        let id = value.get("id").and_then(Value::as_str).unwrap_or_default();
        acceptance.warning = check_bounds(id, x, y, rules);
    }
    Ok(acceptance)
}

fn check_bounds(id: &str, x: f64, y: f64, rules: &CommandRules) -> Option<CoordinateWarning> {
    if x < 0.0 || y < 0.0 || x > rules.max_x || y > rules.max_y {
        Some(CoordinateWarning {
            id: id.to_string(),
            x,
            y,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_missing_id() {
        assert_eq!(
            validate(&json!({"type": "rectangle", "x": 1, "y": 2})),
            Err(Rejection::MissingId)
        );
        assert_eq!(validate(&json!({"id": ""})), Err(Rejection::MissingId));
    }

    #[test]
    fn rejects_unknown_type() {
        let err = validate(&json!({"id": "a", "type": "hexagon", "x": 1, "y": 2})).unwrap_err();
        assert_eq!(err, Rejection::UnknownType("hexagon".into()));
    }

    #[test]
    fn creation_requires_numeric_coordinates() {
        let err = validate(&json!({"id": "r1", "type": "rectangle", "x": 10})).unwrap_err();
        assert_eq!(err, Rejection::MissingCoordinates("r1".into()));

        let err = validate(&json!({"id": "r1", "type": "rectangle", "x": "10", "y": 5}));
        assert!(err.is_err());
    }

    #[test]
    fn patch_with_only_id_is_accepted() {
        let acceptance = validate(&json!({"id": "r1"})).unwrap();
        assert!(acceptance.warning.is_none());
    }

    #[test]
    fn patch_never_requires_coordinates() {
        assert!(validate(&json!({"id": "r1", "backgroundColor": "#fff"})).is_ok());
    }

    #[test]
    fn in_bounds_creation_has_no_warning() {
        let acceptance =
            validate(&json!({"id": "r1", "type": "ellipse", "x": 100, "y": 200})).unwrap();
        assert!(acceptance.warning.is_none());
    }

    #[test]
    fn out_of_bounds_is_accepted_with_warning() {
        let acceptance =
            validate(&json!({"id": "r1", "type": "ellipse", "x": 5000, "y": 200})).unwrap();
        let warning = acceptance.warning.expect("should warn");
        assert_eq!(warning.id, "r1");
        assert_eq!(warning.x, 5000.0);
    }

    #[test]
    fn negative_coordinates_warn_but_pass() {
        let acceptance =
            validate(&json!({"id": "r1", "type": "text", "x": -10, "y": 0})).unwrap();
        assert!(acceptance.warning.is_some());
    }

    #[test]
    fn custom_rules_change_the_bound() {
        let rules = CommandRules {
            max_x: 100.0,
            max_y: 100.0,
        };
        let value = json!({"id": "r1", "type": "rectangle", "x": 150, "y": 50});
        let acceptance = validate_with_rules(&value, &rules).unwrap();
        assert!(acceptance.warning.is_some());
    }
}
