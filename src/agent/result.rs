//! Output of one agent run.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::Display;

use crate::tools::ToolOutcome;
use crate::types::{AgentToolCall, FinishReason, Usage};

/// Marker that precedes the answer in a [`RunResult`]'s text form.
pub const FINAL_OUTPUT_MARKER: &str = "Final output (str):";

/// Why the tool loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StopReason {
    /// The model answered without requesting more tools.
    Completed,
    /// The model was still requesting tools when the round-trip limit hit.
    RoundTripLimit,
}

/// One entry in a run's internal trace.
#[derive(Debug, Clone, PartialEq)]
pub enum RunItem {
    ModelResponse {
        text: String,
        tool_calls: usize,
        finish_reason: Option<FinishReason>,
        usage: Usage,
    },
    ToolCall(AgentToolCall),
    ToolOutput(ToolOutcome),
}

/// Final answer plus the trace that produced it. Only `final_output`
/// outlives normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub final_output: String,
    pub items: Vec<RunItem>,
    pub usage: Usage,
    pub round_trips: usize,
    pub stop: StopReason,
    pub finished_at: DateTime<Utc>,
}

impl RunResult {
    /// Model responses received during the run.
    pub fn raw_response_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, RunItem::ModelResponse { .. }))
            .count()
    }

    /// Items the run produced: tool calls, tool outputs and text messages.
    pub fn new_item_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| match item {
                RunItem::ModelResponse { text, .. } => !text.is_empty(),
                RunItem::ToolCall(_) | RunItem::ToolOutput(_) => true,
            })
            .count()
    }

    /// Tool calls issued during the run, in order.
    pub fn tool_calls(&self) -> impl Iterator<Item = &AgentToolCall> {
        self.items.iter().filter_map(|item| match item {
            RunItem::ToolCall(call) => Some(call),
            _ => None,
        })
    }

    /// Tool outcomes produced during the run, in order.
    pub fn tool_outputs(&self) -> impl Iterator<Item = &ToolOutcome> {
        self.items.iter().filter_map(|item| match item {
            RunItem::ToolOutput(outcome) => Some(outcome),
            _ => None,
        })
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RunResult:")?;
        writeln!(f, "- Stop reason: {}", self.stop)?;
        writeln!(f, "- Round trips: {}", self.round_trips)?;
        writeln!(f, "- {FINAL_OUTPUT_MARKER}")?;
        writeln!(f, "{}", self.final_output)?;
        writeln!(f, "- {} new item(s)", self.new_item_count())?;
        writeln!(f, "- {} raw response(s)", self.raw_response_count())?;
        writeln!(
            f,
            "- {} input / {} output tokens",
            self.usage.input_tokens, self.usage.output_tokens
        )?;
        write!(f, "(See `RunResult` for more details)")
    }
}
