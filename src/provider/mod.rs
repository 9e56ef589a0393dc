//! Model provider trait and the chat-completions implementation.

pub mod http;
pub mod openai_compatible;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::EndpointConfig;
use crate::error::MentorError;
use crate::types::{AgentToolCall, FinishReason, GenerationSettings, ModelMessage, Usage};

pub use openai_compatible::OpenAiCompatibleProvider;

/// A request sent to a model provider.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub messages: Vec<ModelMessage>,
    pub settings: GenerationSettings,
    pub tools: Option<Vec<ToolDefinition>>,
}

/// Tool definition sent to the provider API.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Response from a provider: either final text or tool calls to resolve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderResponse {
    pub text: String,
    pub usage: Usage,
    pub tool_calls: Vec<AgentToolCall>,
    pub finish_reason: Option<FinishReason>,
}

/// One round trip to a remote model.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name (e.g., "openai-compatible").
    fn provider_name(&self) -> &str;

    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Generate a response (non-streaming).
    async fn generate_text(&self, request: &ProviderRequest)
        -> Result<ProviderResponse, MentorError>;
}

/// Create the provider described by `endpoint`.
pub fn create_provider(endpoint: &EndpointConfig) -> Result<Arc<dyn ModelProvider>, MentorError> {
    Ok(Arc::new(OpenAiCompatibleProvider::new(endpoint)?))
}
