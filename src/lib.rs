//! Easel - Streaming chat engine for an AI drawing assistant
//!
//! This crate drives a tool-calling chat loop against an OpenAI-compatible
//! streaming endpoint and extracts drawing commands from the assistant's
//! text as it streams. The canvas itself stays behind the [`canvas::ToolExecutor`]
//! trait, so the engine works against any drawing surface.
//!
//! # Example
//!
//! ```rust,no_run
//! use easel::{CancelToken, ChatEngine, CollectingSink, EngineConfig, Message};
//! use easel::canvas::{
//!     DeleteOutcome, ElementPatch, ElementSummary, LayoutReport, LookupOutcome, MoveOutcome,
//!     ToolExecutor, UpdateOutcome,
//! };
//!
//! struct NoCanvas;
//!
//! impl ToolExecutor for NoCanvas {
//!     fn get_canvas_elements(&mut self) -> Vec<ElementSummary> { Vec::new() }
//!     fn get_elements_by_ids(&mut self, _ids: &[String]) -> LookupOutcome { LookupOutcome::default() }
//!     fn delete_elements(&mut self, _ids: &[String]) -> DeleteOutcome { DeleteOutcome::default() }
//!     fn update_elements(&mut self, _patches: &[ElementPatch]) -> UpdateOutcome { UpdateOutcome::default() }
//!     fn move_elements(&mut self, _ids: &[String], _dx: f64, _dy: f64) -> MoveOutcome { MoveOutcome::default() }
//!     fn check_and_fix_layout(&mut self, _min_gap: Option<f64>) -> LayoutReport { LayoutReport::default() }
//! }
//!
//! #[tokio::main]
//! async fn main() -> easel::Result<()> {
//!     let config = EngineConfig::from_env()?;
//!     let engine = ChatEngine::new(&config)?;
//!
//!     let mut messages = vec![
//!         Message::system("You are a drawing assistant."),
//!         Message::user("Draw a red rectangle at (100, 100)."),
//!     ];
//!     let mut sink = CollectingSink::new();
//!     engine
//!         .run(&mut messages, &mut NoCanvas, &mut sink, &CancelToken::new())
//!         .await?;
//!
//!     // Drawing commands are embedded in the streamed text as JSON objects.
//!     let parsed = easel::parse::parse_commands(&sink.text, 0, &Default::default());
//!     println!("{} commands", parsed.commands.len());
//!     Ok(())
//! }
//! ```

pub mod canvas;
pub mod config;
pub mod engine;
pub mod error;
pub mod parse;
pub mod stream;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use config::EngineConfig;
pub use engine::{
    CancelToken, ChatEngine, CollectingSink, CompletionTransport, EngineEvent, EngineSink,
    HttpTransport, RunOutcome,
};
pub use error::{EaselError, Result};
pub use parse::{CommandBuffer, ParseOutcome};
pub use stream::{SseDecoder, ToolCallAssembler};

// Re-export all types
pub use types::{
    DrawingCommand, FinishReason, Message, MessageContent, Role, ShapeKind, StreamEvent, ToolCall,
    ToolCallDelta, ToolDefinition,
};
