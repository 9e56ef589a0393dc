//! Name-based tool dispatch.

use std::sync::Arc;

use tracing::{debug, warn};

use super::arguments::ToolArguments;
use super::tool::Tool;
use crate::provider::ToolDefinition;
use crate::types::AgentToolCall;

/// Status text produced by one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutcome {
    pub tool_call_id: String,
    pub tool_name: String,
    pub status_text: String,
}

/// Ordered set of tools the model may call by name.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. A later tool with the same name replaces the earlier one.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        if let Some(existing) = self.tools.iter_mut().find(|t| t.name() == tool.name()) {
            *existing = tool;
        } else {
            self.tools.push(tool);
        }
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Tool names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Schema sent to the provider.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters().schema.clone(),
            })
            .collect()
    }

    /// Run the named tool. Never fails: unknown tools and tool errors are
    /// reported as status text for the model to relay.
    pub async fn dispatch(&self, call: &AgentToolCall) -> ToolOutcome {
        let status_text = match self.get(&call.name) {
            Some(tool) => {
                debug!(tool = %call.name, id = %call.id, "dispatching tool call");
                let args = ToolArguments::new(call.arguments.clone());
                match tool.execute(&args).await {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(tool = %call.name, error = %e, "Tool execution failed");
                        format!("❌ Error running tool '{}': {e}", call.name)
                    }
                }
            }
            None => {
                warn!(tool = %call.name, "Tool not found");
                format!(
                    "❌ Unknown tool '{}'. Available tools: {}",
                    call.name,
                    self.names().join(", ")
                )
            }
        };

        ToolOutcome {
            tool_call_id: call.id.clone(),
            tool_name: call.name.clone(),
            status_text,
        }
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}
