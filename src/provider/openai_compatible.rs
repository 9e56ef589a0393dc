//! OpenAI-compatible Chat Completions provider (Gemini's compatibility
//! endpoint by default).

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::EndpointConfig;
use crate::error::MentorError;
use crate::types::*;

use super::http::{bearer_headers, build_client, status_to_error};
use super::{ModelProvider, ProviderRequest, ProviderResponse};

pub struct OpenAiCompatibleProvider {
    model_id: String,
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiCompatibleProvider {
    pub fn new(endpoint: &EndpointConfig) -> Result<Self, MentorError> {
        Ok(Self {
            model_id: endpoint.model.clone(),
            api_key: endpoint.api_key().to_string(),
            base_url: endpoint.base_url.trim_end_matches('/').to_string(),
            client: build_client(endpoint.request_timeout)?,
        })
    }

    pub(crate) fn build_request_body(&self, request: &ProviderRequest) -> serde_json::Value {
        let messages = request
            .messages
            .iter()
            .map(message_to_openai)
            .collect::<Vec<_>>();

        let mut body = serde_json::Map::new();
        body.insert("model".into(), self.model_id.clone().into());
        body.insert("messages".into(), messages.into());

        if let Some(max) = request.settings.max_tokens {
            body.insert("max_tokens".into(), max.into());
        }
        if let Some(temp) = request.settings.temperature {
            body.insert("temperature".into(), temp.into());
        }

        if let Some(ref tools) = request.tools {
            if !tools.is_empty() {
                let tool_defs: Vec<serde_json::Value> = tools
                    .iter()
                    .map(|t| {
                        serde_json::json!({
                            "type": "function",
                            "function": {
                                "name": t.name,
                                "description": t.description,
                                "parameters": t.parameters,
                            }
                        })
                    })
                    .collect();
                body.insert("tools".into(), tool_defs.into());
            }
        }

        serde_json::Value::Object(body)
    }
}

#[async_trait]
impl ModelProvider for OpenAiCompatibleProvider {
    fn provider_name(&self) -> &str {
        "openai-compatible"
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<ProviderResponse, MentorError> {
        let body = self.build_request_body(request);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(model = %self.model_id, messages = request.messages.len(), "chat completion request");

        let resp = self
            .client
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let data: ChatResponse = resp.json().await?;
        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| MentorError::api(200, "No choices in chat completion response"))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| AgentToolCall {
                id: if tc.id.is_empty() {
                    format!("call_{}", uuid::Uuid::new_v4().simple())
                } else {
                    tc.id
                },
                name: tc.function.name,
                arguments: serde_json::from_str(&tc.function.arguments)
                    .unwrap_or(serde_json::Value::String(tc.function.arguments)),
            })
            .collect();

        let finish_reason = choice.finish_reason.as_deref().and_then(parse_finish_reason);

        Ok(ProviderResponse {
            text: choice.message.content.unwrap_or_default(),
            usage: data
                .usage
                .map(|u| Usage {
                    input_tokens: u.prompt_tokens,
                    output_tokens: u.completion_tokens,
                    total_tokens: u.total_tokens,
                })
                .unwrap_or_default(),
            tool_calls,
            finish_reason,
        })
    }
}

fn parse_finish_reason(s: &str) -> Option<FinishReason> {
    match s {
        "stop" => Some(FinishReason::Stop),
        "length" => Some(FinishReason::Length),
        "tool_calls" => Some(FinishReason::ToolCalls),
        "content_filter" => Some(FinishReason::ContentFilter),
        _ => None,
    }
}

fn message_to_openai(msg: &ModelMessage) -> serde_json::Value {
    if let Some(tr) = msg.tool_result_part() {
        return serde_json::json!({
            "role": "tool",
            "tool_call_id": tr.tool_call_id,
            "content": tr.output,
        });
    }

    let role = msg.role.to_string();
    let text = msg.text();
    let tool_calls = msg.tool_calls();
    if tool_calls.is_empty() {
        return serde_json::json!({ "role": role, "content": text });
    }

    let tc_json: Vec<serde_json::Value> = tool_calls
        .iter()
        .map(|tc| {
            serde_json::json!({
                "id": tc.id,
                "type": "function",
                "function": {
                    "name": tc.name,
                    "arguments": arguments_text(&tc.arguments),
                }
            })
        })
        .collect();
    serde_json::json!({
        "role": role,
        "content": if text.is_empty() { serde_json::Value::Null } else { serde_json::Value::String(text) },
        "tool_calls": tc_json,
    })
}

/// Arguments as the endpoint expects them: a JSON document in a string.
/// Arguments that never parsed are kept as the raw text and sent back verbatim.
fn arguments_text(arguments: &serde_json::Value) -> String {
    match arguments {
        serde_json::Value::String(raw) => raw.clone(),
        other => other.to_string(),
    }
}

// Chat Completions response types (internal)

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ChatToolCall>>,
}

#[derive(Deserialize)]
struct ChatToolCall {
    #[serde(default)]
    id: String,
    function: ChatFunction,
}

#[derive(Deserialize)]
struct ChatFunction {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_exchange_is_serialized_in_chat_shape() {
        let call = AgentToolCall {
            id: "call_7".into(),
            name: "create_formula_sheet".into(),
            arguments: serde_json::json!({"exam_type": "NEET"}),
        };

        let assistant = message_to_openai(&ModelMessage::assistant_tool_calls(
            "",
            std::slice::from_ref(&call),
        ));
        assert_eq!(assistant["role"], "assistant");
        assert!(assistant["content"].is_null());
        assert_eq!(assistant["tool_calls"][0]["function"]["name"], "create_formula_sheet");
        assert_eq!(
            assistant["tool_calls"][0]["function"]["arguments"],
            r#"{"exam_type":"NEET"}"#
        );

        let tool = message_to_openai(&ModelMessage::tool_result("call_7", "✅ done"));
        assert_eq!(
            tool,
            serde_json::json!({"role": "tool", "tool_call_id": "call_7", "content": "✅ done"})
        );

        let user = message_to_openai(&ModelMessage::user("hi"));
        assert_eq!(user, serde_json::json!({"role": "user", "content": "hi"}));
    }

    #[test]
    fn unparseable_arguments_round_trip_verbatim() {
        let call = AgentToolCall {
            id: "call_9".into(),
            name: "create_physics_notes".into(),
            arguments: serde_json::Value::String("{bad".into()),
        };
        let assistant = message_to_openai(&ModelMessage::assistant_tool_calls(
            "",
            std::slice::from_ref(&call),
        ));
        assert_eq!(assistant["tool_calls"][0]["function"]["arguments"], "{bad");
    }

    #[test]
    fn finish_reasons_parse() {
        assert_eq!(parse_finish_reason("tool_calls"), Some(FinishReason::ToolCalls));
        assert_eq!(parse_finish_reason("mystery"), None);
    }
}
