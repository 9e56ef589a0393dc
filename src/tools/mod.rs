//! Tool system for function calling.

pub mod arguments;
pub mod browser;
pub mod catalog;
pub mod registry;
pub mod study;
pub mod tool;
pub mod types;

pub use arguments::ToolArguments;
pub use browser::{Browser, SystemBrowser};
pub use catalog::StudyCatalog;
pub use registry::{ToolOutcome, ToolRegistry};
pub use study::{study_registry, study_tools, StudyEnvironment};
pub use tool::{AgentTool, Tool};
pub use types::AgentToolParameters;
