//! Environment report for troubleshooting.

use std::fmt;
use std::path::PathBuf;

use crate::agent::AGENT_NAME;
use crate::config::{default_output_dir, MentorConfig, MentorSettings, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// What the mentor would run with, as far as it can tell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    pub output_dir: PathBuf,
    pub working_dir: Option<PathBuf>,
    pub api_key_found: bool,
    pub model: String,
    pub endpoint: String,
}

impl Diagnostics {
    /// Report for a resolved configuration.
    pub fn from_config(config: &MentorConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            working_dir: std::env::current_dir().ok(),
            api_key_found: !config.endpoint.api_key().is_empty(),
            model: config.endpoint.model.clone(),
            endpoint: config.endpoint.base_url.clone(),
        }
    }

    /// Report for settings that may not resolve (for instance, no API key).
    pub fn from_settings(settings: &MentorSettings) -> Self {
        Self {
            output_dir: settings
                .output_dir
                .clone()
                .unwrap_or_else(default_output_dir),
            working_dir: std::env::current_dir().ok(),
            api_key_found: settings
                .api_key
                .as_deref()
                .is_some_and(|k| !k.trim().is_empty()),
            model: settings
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            endpoint: settings
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🔧 Debug Info")?;
        writeln!(f, "Output directory: {}", self.output_dir.display())?;
        match &self.working_dir {
            Some(dir) => writeln!(f, "Current working directory: {}", dir.display())?,
            None => writeln!(f, "Current working directory: <unavailable>")?,
        }
        writeln!(f, "API Key present: {}", self.api_key_found)?;
        writeln!(f, "Model: {}", self.model)?;
        writeln!(f, "Endpoint: {}", self.endpoint)?;
        write!(f, "{AGENT_NAME} Agent: ✅ Active")
    }
}
