//! Request-body construction.
//!
//! Builds the chat-completions JSON body from the conversation log and the
//! registered tool definitions. The wire shape differs from the in-memory
//! [`Message`] (tool results carry `tool_call_id` at the top level, tool
//! calls nest under `function`), so the conversion is explicit here rather
//! than a serde impl on the types.

use serde_json::{Value, json};

use crate::types::{Message, Role, ToolDefinition};

/// Body for one streaming chat-completions request.
pub fn build_request_body(model: &str, messages: &[Message], tools: &[ToolDefinition]) -> Value {
    let mut body = json!({
        "model": model,
        "messages": messages.iter().map(message_to_wire).collect::<Vec<_>>(),
        "stream": true,
    });

    if !tools.is_empty() {
        body["tools"] = Value::Array(tools.iter().map(ToolDefinition::to_wire).collect());
        body["tool_choice"] = json!("auto");
    }

    body
}

fn message_to_wire(message: &Message) -> Value {
    let text = message.content.as_text().unwrap_or_default();

    match &message.role {
        Role::System => json!({"role": "system", "content": text}),
        Role::User => json!({"role": "user", "content": text}),
        Role::Tool { tool_call_id } => json!({
            "role": "tool",
            "tool_call_id": tool_call_id,
            "content": text,
        }),
        Role::Assistant => {
            let mut wire = json!({"role": "assistant"});
            // Assistant turns that only called tools send null content.
            wire["content"] = if text.is_empty() && message.tool_calls.is_some() {
                Value::Null
            } else {
                Value::String(text.to_string())
            };
            if let Some(ref calls) = message.tool_calls {
                wire["tool_calls"] = Value::Array(calls.iter().map(|c| c.to_wire()).collect());
            }
            wire
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ToolCall;

    #[test]
    fn body_carries_model_messages_and_stream_flag() {
        let messages = vec![Message::system("sys"), Message::user("hi")];
        let body = build_request_body("gpt-4o", &messages, &[]);
        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["stream"], true);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hi");
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn tools_enable_auto_tool_choice() {
        let tools = vec![ToolDefinition::new("t", "d", json!({"type": "object"}))];
        let body = build_request_body("gpt-4o", &[Message::user("hi")], &tools);
        assert_eq!(body["tool_choice"], "auto");
        assert_eq!(body["tools"][0]["function"]["name"], "t");
    }

    #[test]
    fn tool_result_message_carries_call_id() {
        let messages = vec![Message::tool_result("call_1", "{\"message\":\"ok\"}")];
        let body = build_request_body("gpt-4o", &messages, &[]);
        assert_eq!(body["messages"][0]["role"], "tool");
        assert_eq!(body["messages"][0]["tool_call_id"], "call_1");
    }

    #[test]
    fn tool_only_assistant_turn_has_null_content() {
        let calls = vec![ToolCall::new("call_1", "get_canvas_elements", "{}")];
        let messages = vec![Message::assistant_with_tool_calls(None, calls)];
        let body = build_request_body("gpt-4o", &messages, &[]);
        let wire = &body["messages"][0];
        assert!(wire["content"].is_null());
        assert_eq!(wire["tool_calls"][0]["id"], "call_1");
        assert_eq!(
            wire["tool_calls"][0]["function"]["name"],
            "get_canvas_elements"
        );
    }
}
