//! The mentor agent and its run results.

pub mod agent;
pub mod instructions;
pub mod result;

pub use agent::{Agent, AgentConfig, GIVE_UP_ANSWER};
pub use instructions::{AGENT_NAME, PHYSICS_MENTOR_INSTRUCTIONS};
pub use result::{RunItem, RunResult, StopReason, FINAL_OUTPUT_MARKER};
