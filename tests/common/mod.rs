//! Shared test helpers, scripted provider and recording browser.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use physics_mentor::agent::{Agent, AgentConfig, PHYSICS_MENTOR_INSTRUCTIONS};
use physics_mentor::config::EndpointConfig;
use physics_mentor::error::MentorError;
use physics_mentor::provider::{ModelProvider, ProviderRequest, ProviderResponse};
use physics_mentor::tools::{Browser, ToolRegistry};
use physics_mentor::types::*;
use physics_mentor::util::retry::RetryPolicy;

enum Step {
    Reply(ProviderResponse),
    Fail(MentorError),
    Stall(Duration),
    EchoToolResult(&'static str),
}

/// A provider that plays back queued steps and records every request.
#[derive(Default)]
pub struct MockProvider {
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl MockProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push(&self, step: Step) {
        self.steps.lock().unwrap().push_back(step);
    }

    /// Queue a final text answer.
    pub fn queue_response(&self, text: &str) {
        self.push(Step::Reply(ProviderResponse {
            text: text.to_string(),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 20,
                total_tokens: 30,
            },
            tool_calls: vec![],
            finish_reason: Some(FinishReason::Stop),
        }));
    }

    /// Queue a tool call request.
    pub fn queue_tool_call(&self, id: &str, name: &str, args: serde_json::Value) {
        self.push(Step::Reply(ProviderResponse {
            text: String::new(),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 5,
                total_tokens: 15,
            },
            tool_calls: vec![AgentToolCall {
                id: id.to_string(),
                name: name.to_string(),
                arguments: args,
            }],
            finish_reason: Some(FinishReason::ToolCalls),
        }));
    }

    /// Queue a failure.
    pub fn queue_error(&self, error: MentorError) {
        self.push(Step::Fail(error));
    }

    /// Queue a reply that takes `delay` to arrive.
    pub fn queue_stall(&self, delay: Duration) {
        self.push(Step::Stall(delay));
    }

    /// Queue an answer quoting the latest tool result after `prefix`.
    pub fn queue_echo_tool_result(&self, prefix: &'static str) {
        self.push(Step::EchoToolResult(prefix));
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }

    async fn generate_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<ProviderResponse, MentorError> {
        self.requests.lock().unwrap().push(request.clone());
        let step = self.steps.lock().unwrap().pop_front();

        match step {
            Some(Step::Reply(response)) => Ok(response),
            Some(Step::Fail(error)) => Err(error),
            Some(Step::Stall(delay)) => {
                tokio::time::sleep(delay).await;
                Ok(text_response("Too late"))
            }
            Some(Step::EchoToolResult(prefix)) => {
                let output = request
                    .messages
                    .iter()
                    .rev()
                    .find_map(|m| m.tool_result_part())
                    .map(|r| r.output.clone())
                    .unwrap_or_default();
                Ok(text_response(&format!("{prefix}{output}")))
            }
            None => Ok(text_response("Mock response")),
        }
    }
}

fn text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        text: text.to_string(),
        finish_reason: Some(FinishReason::Stop),
        ..Default::default()
    }
}

/// Records URLs instead of launching anything.
#[derive(Default)]
pub struct RecordingBrowser {
    opened: Mutex<Vec<String>>,
}

impl RecordingBrowser {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl Browser for RecordingBrowser {
    fn open(&self, url: &str) -> Result<(), MentorError> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

pub fn agent_config(tools: ToolRegistry, max_round_trips: usize) -> AgentConfig {
    AgentConfig {
        instructions: PHYSICS_MENTOR_INSTRUCTIONS.to_string(),
        tools,
        endpoint: EndpointConfig::new(
            "http://localhost:0",
            "mock-model",
            "test-key",
            Duration::from_secs(5),
        ),
        generation: GenerationSettings::default(),
        max_round_trips,
        retry: RetryPolicy::default(),
    }
}

pub fn mock_agent(provider: Arc<MockProvider>, tools: ToolRegistry) -> Agent {
    Agent::with_provider(Arc::new(agent_config(tools, 10)), provider)
}
