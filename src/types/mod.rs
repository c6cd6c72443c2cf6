//! Core data types for the easel engine

pub mod command;
pub mod event;
pub mod message;
pub mod tool;

pub use command::{DrawingCommand, ShapeKind};
pub use event::{FinishReason, StreamEvent, ToolCallDelta};
pub use message::{Message, MessageContent, Role};
pub use tool::{ToolCall, ToolDefinition};
