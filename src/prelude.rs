//! Convenience re-exports for common use.

pub use crate::agent::{Agent, AgentConfig, RunResult, StopReason};
pub use crate::bridge::{Asker, SyncBridge};
pub use crate::config::{MentorConfig, MentorSettings};
pub use crate::error::{MentorError, Result};
pub use crate::normalize::{extract_response_text, normalize};
pub use crate::provider::{ModelProvider, ProviderRequest, ProviderResponse};
pub use crate::session::{Session, Turn, TurnRole};
pub use crate::tools::{
    study_registry, AgentTool, Browser, StudyEnvironment, SystemBrowser, Tool, ToolArguments,
    ToolRegistry,
};
pub use crate::types::{AgentToolCall, GenerationSettings, ModelMessage, Role, Usage};
