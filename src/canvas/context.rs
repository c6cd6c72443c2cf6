//! Selection context for user messages.
//!
//! When the user has elements selected, their summaries are prepended to
//! the outgoing user message so the model patches existing elements
//! (keeping the same ids) instead of creating duplicates.

use super::ElementSummary;

/// Build the user message, prefixed with a description of the selected
/// elements when any are given. Bound children (text inside a shape) are
/// indented under their container.
pub fn format_selection_context(user_message: &str, selected: &[ElementSummary]) -> String {
    if selected.is_empty() {
        return user_message.to_string();
    }

    let mut context = String::new();
    let (main, bound): (Vec<_>, Vec<_>) = selected.iter().partition(|el| el.container_id.is_none());

    for el in &main {
        context.push_str(&describe(el, ""));
        context.push('\n');
        for child in bound
            .iter()
            .filter(|b| b.container_id.as_deref() == Some(el.id.as_str()))
        {
            context.push_str(&describe(child, "  "));
            context.push_str(&format!(" (text bound inside {})\n", el.id));
        }
    }

    // Bound elements whose container was not selected still get listed.
    for el in bound
        .iter()
        .filter(|b| !main.iter().any(|m| Some(m.id.as_str()) == b.container_id.as_deref()))
    {
        context.push_str(&describe(el, ""));
        context.push('\n');
    }

    format!(
        "The user selected these elements; modify them rather than creating new ones:\n\
         {context}\n\
         User request: {user_message}\n\n\
         Note: keep the same id when modifying an existing element so it is updated, not recreated."
    )
}

fn describe(el: &ElementSummary, indent: &str) -> String {
    let mut parts = vec![format!("id: {}", el.id), format!("type: {}", el.kind)];
    if let Some(ref text) = el.text {
        parts.push(format!("text: \"{text}\""));
    }
    parts.push(format!("position: ({}, {})", el.x, el.y));
    parts.push(format!("size: {}x{}", el.width, el.height));
    if let Some(ref color) = el.stroke_color {
        parts.push(format!("strokeColor: {color}"));
    }
    if let Some(ref color) = el.background_color
        && color != "transparent"
    {
        parts.push(format!("backgroundColor: {color}"));
    }
    format!("{indent}- {}", parts.join(", "))
}
