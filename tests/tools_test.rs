//! Integration tests for canvas tool dispatch.
//!
//! A small in-memory canvas backs the executor; the assertions are on the
//! serialized tool results the model would see.

use serde_json::Value;

use easel::canvas::{
    DeleteOutcome, ElementPatch, ElementSummary, LayoutReport, LookupOutcome, MoveOutcome,
    ToolExecutor, UpdateOutcome, canvas_tool_definitions, execute_tool_call,
};
use easel::types::ToolCall;

struct MemoryCanvas {
    elements: Vec<ElementSummary>,
}

impl MemoryCanvas {
    fn with_rectangle(id: &str) -> Self {
        Self {
            elements: vec![ElementSummary {
                id: id.to_string(),
                kind: "rectangle".to_string(),
                text: None,
                x: 10.0,
                y: 20.0,
                width: 100.0,
                height: 50.0,
                stroke_color: Some("#1e1e1e".to_string()),
                background_color: None,
                container_id: None,
            }],
        }
    }

    fn empty() -> Self {
        Self { elements: vec![] }
    }

    fn split_ids(&self, ids: &[String]) -> (Vec<String>, Vec<String>) {
        ids.iter().cloned().partition(|id| {
            self.elements.iter().any(|el| &el.id == id)
        })
    }
}

impl ToolExecutor for MemoryCanvas {
    fn get_canvas_elements(&mut self) -> Vec<ElementSummary> {
        self.elements.clone()
    }

    fn get_elements_by_ids(&mut self, ids: &[String]) -> LookupOutcome {
        let (found, not_found) = self.split_ids(ids);
        LookupOutcome {
            elements: self
                .elements
                .iter()
                .filter(|el| found.contains(&el.id))
                .cloned()
                .collect(),
            not_found,
        }
    }

    fn delete_elements(&mut self, ids: &[String]) -> DeleteOutcome {
        let (deleted, not_found) = self.split_ids(ids);
        self.elements.retain(|el| !deleted.contains(&el.id));
        DeleteOutcome { deleted, not_found }
    }

    fn update_elements(&mut self, patches: &[ElementPatch]) -> UpdateOutcome {
        let ids: Vec<String> = patches.iter().map(|p| p.id.clone()).collect();
        let (updated, not_found) = self.split_ids(&ids);
        UpdateOutcome { updated, not_found }
    }

    fn move_elements(&mut self, ids: &[String], dx: f64, dy: f64) -> MoveOutcome {
        let (moved, not_found) = self.split_ids(ids);
        for el in &mut self.elements {
            if moved.contains(&el.id) {
                el.x += dx;
                el.y += dy;
            }
        }
        MoveOutcome { moved, not_found }
    }

    fn check_and_fix_layout(&mut self, min_gap: Option<f64>) -> LayoutReport {
        LayoutReport {
            has_issues: false,
            issues: vec![],
            fixed_count: 0,
            message: format!("no overlaps at gap {}", min_gap.unwrap_or(20.0)),
        }
    }
}

fn call(name: &str, arguments: &str) -> ToolCall {
    ToolCall::new("call_1", name, arguments)
}

fn run(name: &str, arguments: &str, canvas: &mut MemoryCanvas) -> Value {
    let result = execute_tool_call(&call(name, arguments), canvas);
    serde_json::from_str(&result).expect("tool results are always JSON")
}

#[test]
fn definitions_cover_every_canvas_tool() {
    let names: Vec<String> = canvas_tool_definitions()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(
        names,
        vec![
            "get_canvas_elements",
            "get_elements_by_ids",
            "delete_elements",
            "update_elements",
            "move_elements",
            "check_and_fix_layout",
        ]
    );
}

#[test]
fn empty_canvas_reports_a_message() {
    let result = run("get_canvas_elements", "{}", &mut MemoryCanvas::empty());
    assert_eq!(result["message"], "The canvas is empty");
    assert!(result.get("elements").is_none());
}

#[test]
fn canvas_elements_serialize_with_type_key() {
    let result = run("get_canvas_elements", "{}", &mut MemoryCanvas::with_rectangle("r1"));
    assert_eq!(result["elements"][0]["id"], "r1");
    assert_eq!(result["elements"][0]["type"], "rectangle");
}

#[test]
fn lookup_reports_missing_ids_without_error() {
    let result = run(
        "get_elements_by_ids",
        r#"{"ids": ["r1", "ghost"]}"#,
        &mut MemoryCanvas::with_rectangle("r1"),
    );
    assert_eq!(result["elements"][0]["id"], "r1");
    assert_eq!(result["notFound"][0], "ghost");
    assert!(result.get("error").is_none());
}

#[test]
fn delete_removes_and_reports() {
    let mut canvas = MemoryCanvas::with_rectangle("r1");
    let result = run("delete_elements", r#"{"ids": ["r1", "ghost"]}"#, &mut canvas);
    assert_eq!(result["deleted"][0], "r1");
    assert_eq!(result["notFound"][0], "ghost");
    assert!(canvas.elements.is_empty());
}

#[test]
fn delete_with_only_missing_ids_still_succeeds() {
    let result = run("delete_elements", r#"{"ids": ["ghost"]}"#, &mut MemoryCanvas::empty());
    assert_eq!(result["message"], "No deletable elements found");
    assert_eq!(result["notFound"][0], "ghost");
}

#[test]
fn update_applies_patches() {
    let result = run(
        "update_elements",
        r##"{"elements": [{"id": "r1", "backgroundColor": "#ff0000"}]}"##,
        &mut MemoryCanvas::with_rectangle("r1"),
    );
    assert_eq!(result["updated"][0], "r1");
}

#[test]
fn move_translates_elements() {
    let mut canvas = MemoryCanvas::with_rectangle("r1");
    let result = run("move_elements", r#"{"ids": ["r1"], "dx": 5, "dy": -3}"#, &mut canvas);
    assert_eq!(result["moved"][0], "r1");
    assert_eq!(canvas.elements[0].x, 15.0);
    assert_eq!(canvas.elements[0].y, 17.0);
}

#[test]
fn layout_check_accepts_optional_gap() {
    let with_gap = run("check_and_fix_layout", r#"{"minGap": 30}"#, &mut MemoryCanvas::empty());
    assert_eq!(with_gap["message"], "no overlaps at gap 30");

    let without = run("check_and_fix_layout", "{}", &mut MemoryCanvas::empty());
    assert_eq!(without["message"], "no overlaps at gap 20");
}

#[test]
fn malformed_arguments_become_a_structured_error() {
    let result = run("delete_elements", "not json at all", &mut MemoryCanvas::empty());
    let error = result["error"].as_str().expect("error field");
    assert!(error.contains("failed to parse arguments"));
}

#[test]
fn empty_id_list_is_rejected_as_an_error_result() {
    let result = run("delete_elements", r#"{"ids": []}"#, &mut MemoryCanvas::with_rectangle("r1"));
    assert!(result["error"].as_str().is_some());
}

#[test]
fn unknown_tool_name_becomes_a_structured_error() {
    let result = run("set_canvas_on_fire", "{}", &mut MemoryCanvas::empty());
    assert_eq!(result["error"], "unknown tool: set_canvas_on_fire");
}

#[test]
fn patch_without_id_fails_argument_decoding() {
    let result = run(
        "update_elements",
        r##"{"elements": [{"backgroundColor": "#fff"}]}"##,
        &mut MemoryCanvas::with_rectangle("r1"),
    );
    assert!(result["error"].as_str().is_some());
}
