//! Physics Mentor: a physics tutor over an OpenAI-compatible chat endpoint.
//!
//! Each question is sent with a physics-only system prompt and a set of
//! study tools (notes, solutions, formula sheets, video and web search,
//! well-known physics sites). Tool calls requested by the model are run
//! locally and fed back until it answers.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use physics_mentor::prelude::*;
//!
//! # fn example() -> physics_mentor::error::Result<()> {
//! let config = MentorSettings::from_env()?.resolve()?;
//! let env = Arc::new(StudyEnvironment::new(config.output_dir.clone(), Arc::new(SystemBrowser)));
//! let agent = Agent::new(Arc::new(AgentConfig::physics_mentor(&config, study_registry(env))))?;
//! let bridge = SyncBridge::new(agent, config.endpoint.request_timeout);
//! println!("{}", bridge.ask("Why does a satellite not fall down?"));
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod bridge;
pub mod config;
pub mod error;
pub mod normalize;
pub mod prelude;
pub mod provider;
pub mod session;
pub mod shell;
pub mod tools;
pub mod types;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;
