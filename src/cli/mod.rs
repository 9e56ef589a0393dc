//! Command-line interface for the physics mentor.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::MentorSettings;
use crate::error::MentorError;

/// Physics Mentor CLI
#[derive(Parser, Debug)]
#[command(
    name = "physics-mentor",
    version,
    about = "Physics Mentor: an AI physics teacher for MDCAT, NEET and JEE"
)]
pub struct Cli {
    /// TOML settings file (lowest precedence, below environment and flags)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Model id on the chat-completions endpoint
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Directory that notes, solutions and formula sheets are written to
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Seconds allowed for one answer
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Model round trips allowed per answer
    #[arg(long, global = true)]
    pub max_round_trips: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level CLI commands. Without one, `chat` runs.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Interactive chat session
    Chat,
    /// Ask a single question and print the answer
    Ask {
        /// The question
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
    },
    /// Print the configuration the mentor would run with
    Diagnostics,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn command(&self) -> &Commands {
        self.command.as_ref().unwrap_or(&Commands::Chat)
    }

    /// The flag layer.
    pub fn overrides(&self) -> MentorSettings {
        MentorSettings {
            model: self.model.clone(),
            output_dir: self.output_dir.clone(),
            timeout_secs: self.timeout_secs,
            max_round_trips: self.max_round_trips,
            ..Default::default()
        }
    }

    /// Settings file, then environment, then flags; later layers win.
    pub fn layered_settings(&self) -> Result<MentorSettings, MentorError> {
        let file = match &self.config {
            Some(path) => MentorSettings::load(path)?,
            None => MentorSettings::default(),
        };
        Ok(file.merge(MentorSettings::from_env()?).merge(self.overrides()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_no_subcommand_defaults_to_chat() {
        let cli = Cli::try_parse_from(["physics-mentor"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.command(), &Commands::Chat);
        assert_eq!(cli.overrides(), MentorSettings::default());
    }

    #[test]
    fn parse_ask_joins_words() {
        let cli = Cli::try_parse_from(["physics-mentor", "ask", "what", "is", "momentum?"]).unwrap();
        match cli.command() {
            Commands::Ask { prompt } => assert_eq!(prompt.join(" "), "what is momentum?"),
            other => panic!("expected Ask, got {other:?}"),
        }
    }

    #[test]
    fn parse_ask_without_prompt_is_error() {
        assert!(Cli::try_parse_from(["physics-mentor", "ask"]).is_err());
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "physics-mentor",
            "diagnostics",
            "-m",
            "gemini-1.5-pro",
            "--output-dir",
            "/tmp/study",
            "--timeout-secs",
            "30",
            "--max-round-trips",
            "4",
        ])
        .unwrap();

        assert_eq!(cli.command(), &Commands::Diagnostics);
        let overrides = cli.overrides();
        assert_eq!(overrides.model.as_deref(), Some("gemini-1.5-pro"));
        assert_eq!(overrides.output_dir, Some(PathBuf::from("/tmp/study")));
        assert_eq!(overrides.timeout_secs, Some(30));
        assert_eq!(overrides.max_round_trips, Some(4));
        assert!(overrides.api_key.is_none());
    }

    #[test]
    fn parse_bad_number_is_error() {
        assert!(Cli::try_parse_from(["physics-mentor", "--timeout-secs", "soon"]).is_err());
    }

    #[test]
    fn missing_settings_file_is_configuration_error() {
        let cli = Cli::try_parse_from(["physics-mentor", "-c", "/nonexistent/mentor.toml"]).unwrap();
        assert!(matches!(
            cli.layered_settings(),
            Err(MentorError::Configuration(_))
        ));
    }
}
