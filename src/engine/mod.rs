//! Multi-turn chat orchestration.
//!
//! [`ChatEngine::run`] drives one conversation run: stream a completion,
//! surface text as it arrives, reassemble tool calls, execute them, feed
//! the results back, and repeat until the model answers in plain text or
//! the tool-round budget runs out. The loop is iterative with an explicit
//! decrementing budget, so the bound is visible in one place.

pub mod request;
pub mod sink;
pub mod transport;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::StreamExt;
use metrics::counter;
use tracing::{debug, instrument, warn};

use crate::canvas::{ToolExecutor, canvas_tool_definitions, execute_tool_call};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::stream::{SseDecoder, ToolCallAssembler};
use crate::telemetry;
use crate::types::{FinishReason, Message, StreamEvent, ToolDefinition};

pub use request::build_request_body;
pub use sink::{CollectingSink, EngineEvent, EngineSink};
pub use transport::{ByteStream, CompletionTransport, HttpTransport};

/// Default tool-round budget per run.
pub const DEFAULT_TOOL_ROUNDS: usize = 3;

/// How a run ended. Transport and API failures are `Err`, not an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The model finished with a plain-text turn.
    Done,
    /// The tool-round budget ran out; the log ends with tool results.
    BudgetExhausted,
    /// Cancellation was observed; partial output already reached the sink.
    Cancelled,
}

/// Cooperative cancellation flag, checked between chunks and turns.
///
/// Clones share the flag; cancelling any clone stops the run at the next
/// check point. Work already completed (tool executions included) stays
/// completed.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Streaming chat engine with canvas tools.
pub struct ChatEngine {
    transport: Arc<dyn CompletionTransport>,
    model: String,
    tools: Vec<ToolDefinition>,
    max_tool_rounds: usize,
}

impl ChatEngine {
    /// Engine over HTTPS with the full canvas tool set.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            transport: Arc::new(HttpTransport::new(config)),
            model: config.model.clone(),
            tools: canvas_tool_definitions(),
            max_tool_rounds: DEFAULT_TOOL_ROUNDS,
        })
    }

    /// Engine over a caller-supplied transport (tests, proxies).
    pub fn with_transport(transport: Arc<dyn CompletionTransport>, model: impl Into<String>) -> Self {
        Self {
            transport,
            model: model.into(),
            tools: canvas_tool_definitions(),
            max_tool_rounds: DEFAULT_TOOL_ROUNDS,
        }
    }

    /// Override the tool-round budget. A budget of `n` allows `n + 1`
    /// tool-execution rounds before the run stops as
    /// [`RunOutcome::BudgetExhausted`].
    pub fn with_max_tool_rounds(mut self, rounds: usize) -> Self {
        self.max_tool_rounds = rounds;
        self
    }

    /// Replace the tool set offered to the model.
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    /// Drive one run to completion.
    ///
    /// Appends the assistant's turns and tool results to `messages`, so the
    /// caller's log is ready for the next run. Tool calls execute strictly
    /// sequentially, in fragment-index order.
    #[instrument(skip_all, fields(model = %self.model))]
    pub async fn run(
        &self,
        messages: &mut Vec<Message>,
        executor: &mut dyn ToolExecutor,
        sink: &mut dyn EngineSink,
        cancel: &CancelToken,
    ) -> Result<RunOutcome> {
        let mut budget = self.max_tool_rounds;

        loop {
            if cancel.is_cancelled() {
                return Ok(RunOutcome::Cancelled);
            }

            counter!(telemetry::REQUESTS_TOTAL).increment(1);
            let body = build_request_body(&self.model, messages, &self.tools);
            let mut stream = self.transport.open_stream(&body).await?;

            let mut decoder = SseDecoder::new();
            let mut assembler = ToolCallAssembler::new();
            let mut turn_text = String::new();

            while let Some(chunk) = stream.next().await {
                if cancel.is_cancelled() {
                    return Ok(RunOutcome::Cancelled);
                }
                let chunk = chunk?;
                for event in decoder.feed(&chunk) {
                    Self::apply(event, &mut turn_text, &mut assembler, sink);
                }
            }
            for event in decoder.flush() {
                Self::apply(event, &mut turn_text, &mut assembler, sink);
            }
            sink.handle(EngineEvent::TurnFinished);

            // Fragment evidence decides whether tools run; the reported
            // finish reason is advisory only.
            let reported_tool_calls = decoder.finish_reason() == Some(&FinishReason::ToolCalls);
            if assembler.is_empty() {
                if reported_tool_calls {
                    warn!("finish reason claimed tool calls but no fragments arrived");
                }
                if !turn_text.is_empty() {
                    messages.push(Message::assistant(turn_text));
                }
                return Ok(RunOutcome::Done);
            }
            if !reported_tool_calls {
                warn!(
                    reason = ?decoder.finish_reason(),
                    "tool-call fragments arrived without a tool_calls finish reason"
                );
            }

            let calls = assembler.finalize();
            if calls.is_empty() {
                debug!("every tool-call fragment was incomplete; treating turn as final");
                if !turn_text.is_empty() {
                    messages.push(Message::assistant(turn_text));
                }
                return Ok(RunOutcome::Done);
            }

            counter!(telemetry::TOOL_ROUNDS_TOTAL).increment(1);
            let had_text = !turn_text.is_empty();
            let content = had_text.then_some(turn_text);
            messages.push(Message::assistant_with_tool_calls(content, calls.clone()));

            for call in &calls {
                debug!(tool = %call.name, id = %call.id, "executing tool call");
                sink.handle(EngineEvent::ToolStarted { call });
                let result = execute_tool_call(call, executor);
                sink.handle(EngineEvent::ToolFinished {
                    call,
                    result: &result,
                });
                messages.push(Message::tool_result(&call.id, result));
            }

            // Separate this turn's prose from the continuation's.
            if had_text {
                sink.handle(EngineEvent::Notice("\n\n"));
            }

            if budget == 0 {
                sink.handle(EngineEvent::Notice(
                    "\n\n*Stopping here: the tool-call limit for this request was reached.*",
                ));
                return Ok(RunOutcome::BudgetExhausted);
            }
            budget -= 1;
        }
    }

    fn apply(
        event: StreamEvent,
        turn_text: &mut String,
        assembler: &mut ToolCallAssembler,
        sink: &mut dyn EngineSink,
    ) {
        match event {
            StreamEvent::Content(text) => {
                turn_text.push_str(&text);
                sink.handle(EngineEvent::TextDelta(&text));
            }
            StreamEvent::Thinking(text) => sink.handle(EngineEvent::Thinking(&text)),
            StreamEvent::ToolCall(delta) => assembler.ingest(&delta),
            // Already recorded by the decoder.
            StreamEvent::Finish(_) => {}
        }
    }
}
