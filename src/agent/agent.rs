//! The mentor agent: system instructions, tools and the tool loop.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::{EndpointConfig, MentorConfig};
use crate::error::MentorError;
use crate::provider::{self, ModelProvider, ProviderRequest};
use crate::tools::ToolRegistry;
use crate::types::{AgentToolCall, GenerationSettings, ModelMessage, Usage};
use crate::util::retry::RetryPolicy;

use super::instructions::PHYSICS_MENTOR_INSTRUCTIONS;
use super::result::{RunItem, RunResult, StopReason};

/// Answer returned when the model keeps requesting tools past the limit.
pub const GIVE_UP_ANSWER: &str = "⚠️ I couldn't finish this answer: too many tool steps were \
needed. Please try asking again, perhaps in smaller parts.";

/// Immutable agent configuration, built once per process and shared.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub instructions: String,
    pub tools: ToolRegistry,
    pub endpoint: EndpointConfig,
    pub generation: GenerationSettings,
    pub max_round_trips: usize,
    pub retry: RetryPolicy,
}

impl AgentConfig {
    /// The Physics Mentor configuration for `config` with the given tools.
    pub fn physics_mentor(config: &MentorConfig, tools: ToolRegistry) -> Self {
        Self {
            instructions: PHYSICS_MENTOR_INSTRUCTIONS.to_string(),
            tools,
            endpoint: config.endpoint.clone(),
            generation: config.generation.clone(),
            max_round_trips: config.max_round_trips.max(1),
            retry: config.retry.clone(),
        }
    }
}

enum LoopState {
    AwaitingModel,
    DispatchingTools(Vec<AgentToolCall>),
    Done(StopReason),
}

/// Sends one user message at a time to the model and resolves its tool
/// requests until it answers.
///
/// Only the current prompt is sent: earlier turns of the session are not
/// forwarded, so the model has no memory of previous exchanges.
#[derive(Clone)]
pub struct Agent {
    config: Arc<AgentConfig>,
    provider: Arc<dyn ModelProvider>,
}

impl Agent {
    /// Create an agent talking to the configured endpoint.
    pub fn new(config: Arc<AgentConfig>) -> Result<Self, MentorError> {
        let provider = provider::create_provider(&config.endpoint)?;
        Ok(Self::with_provider(config, provider))
    }

    /// Create an agent with an explicit provider.
    pub fn with_provider(config: Arc<AgentConfig>, provider: Arc<dyn ModelProvider>) -> Self {
        Self { config, provider }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn provider(&self) -> &dyn ModelProvider {
        self.provider.as_ref()
    }

    /// Answer `prompt`, dispatching tool calls as the model requests them.
    pub async fn run(&self, prompt: &str) -> Result<RunResult, MentorError> {
        let config = self.config.as_ref();
        let tool_defs = if config.tools.is_empty() {
            None
        } else {
            Some(config.tools.definitions())
        };

        let mut messages = vec![
            ModelMessage::system(config.instructions.clone()),
            ModelMessage::user(prompt),
        ];
        let mut items = Vec::new();
        let mut usage = Usage::default();
        let mut round_trips = 0;
        let mut final_output = String::new();
        let mut state = LoopState::AwaitingModel;

        loop {
            state = match state {
                LoopState::AwaitingModel if round_trips >= config.max_round_trips => {
                    warn!(round_trips, "round-trip limit reached; giving up");
                    final_output = GIVE_UP_ANSWER.to_string();
                    LoopState::Done(StopReason::RoundTripLimit)
                }
                LoopState::AwaitingModel => {
                    round_trips += 1;
                    let request = ProviderRequest {
                        messages: messages.clone(),
                        settings: config.generation.clone(),
                        tools: tool_defs.clone(),
                    };

                    debug!(round_trip = round_trips, "calling provider");
                    let response = config
                        .retry
                        .execute(|| self.provider.generate_text(&request))
                        .await?;

                    usage.merge(&response.usage);
                    items.push(RunItem::ModelResponse {
                        text: response.text.clone(),
                        tool_calls: response.tool_calls.len(),
                        finish_reason: response.finish_reason,
                        usage: response.usage,
                    });

                    if response.tool_calls.is_empty() {
                        final_output = response.text;
                        LoopState::Done(StopReason::Completed)
                    } else {
                        messages.push(ModelMessage::assistant_tool_calls(
                            &response.text,
                            &response.tool_calls,
                        ));
                        LoopState::DispatchingTools(response.tool_calls)
                    }
                }
                LoopState::DispatchingTools(calls) => {
                    for call in calls {
                        let outcome = config.tools.dispatch(&call).await;
                        messages.push(ModelMessage::tool_result(
                            outcome.tool_call_id.clone(),
                            outcome.status_text.clone(),
                        ));
                        items.push(RunItem::ToolCall(call));
                        items.push(RunItem::ToolOutput(outcome));
                    }
                    LoopState::AwaitingModel
                }
                LoopState::Done(stop) => {
                    info!(
                        round_trips,
                        stop = %stop,
                        input_tokens = usage.input_tokens,
                        output_tokens = usage.output_tokens,
                        "agent run finished"
                    );
                    return Ok(RunResult {
                        final_output,
                        items,
                        usage,
                        round_trips,
                        stop,
                        finished_at: Utc::now(),
                    });
                }
            };
        }
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("config", &self.config)
            .field("provider", &self.provider.provider_name())
            .finish()
    }
}
