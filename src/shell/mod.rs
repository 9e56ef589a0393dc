//! Line-oriented chat shell around an [`Asker`].

pub mod diagnostics;
pub mod text;

use std::io::{BufRead, Write};
use std::str::FromStr;

use strum::EnumString;
use tracing::debug;

use crate::bridge::Asker;
use crate::error::MentorError;
use crate::session::{Session, Turn, TurnRole};

pub use diagnostics::Diagnostics;

/// Slash commands understood by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum ShellCommand {
    #[strum(serialize = "/clear")]
    Clear,
    #[strum(serialize = "/history")]
    History,
    #[strum(serialize = "/guide", serialize = "/help")]
    Guide,
    #[strum(serialize = "/tips")]
    Tips,
    #[strum(serialize = "/debug")]
    Debug,
    #[strum(serialize = "/quit", serialize = "/exit")]
    Quit,
}

enum Input {
    Blank,
    Command(ShellCommand),
    UnknownCommand(String),
    Question(String),
}

fn classify(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Blank;
    }
    if line.starts_with('/') {
        return match ShellCommand::from_str(&line.to_ascii_lowercase()) {
            Ok(cmd) => Input::Command(cmd),
            Err(_) => Input::UnknownCommand(line.to_string()),
        };
    }
    Input::Question(line.to_string())
}

/// Reads questions from `input`, answers them through `asker`, and writes
/// the conversation to `output`.
pub struct ChatShell<A, R, W> {
    asker: A,
    session: Session,
    diagnostics: Diagnostics,
    input: R,
    output: W,
}

impl<A: Asker, R: BufRead, W: Write> ChatShell<A, R, W> {
    pub fn new(asker: A, diagnostics: Diagnostics, input: R, output: W) -> Self {
        Self {
            asker,
            session: Session::new(),
            diagnostics,
            input,
            output,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until `/quit` or end of input.
    pub fn run(&mut self) -> Result<(), MentorError> {
        writeln!(self.output, "{}\n", text::BANNER)?;

        let mut line = String::new();
        loop {
            write!(self.output, "{}", text::PROMPT)?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }

            match classify(&line) {
                Input::Blank => {}
                Input::Command(ShellCommand::Quit) => break,
                Input::Command(cmd) => self.command(cmd)?,
                Input::UnknownCommand(cmd) => {
                    writeln!(self.output, "Unknown command '{cmd}'. {}", text::COMMANDS)?;
                }
                Input::Question(question) => self.turn(question)?,
            }
        }

        writeln!(self.output, "👋 Keep practicing!")?;
        Ok(())
    }

    fn turn(&mut self, question: String) -> Result<(), MentorError> {
        self.session.push_user(question.as_str());
        writeln!(self.output, "{}", text::THINKING)?;
        self.output.flush()?;

        let answer = self.asker.ask(&question);
        let turn = self.session.push_assistant(answer);
        render_turn(&mut self.output, turn)?;
        debug!(session = %self.session.id(), turns = self.session.len(), "turn answered");
        Ok(())
    }

    fn command(&mut self, cmd: ShellCommand) -> Result<(), MentorError> {
        match cmd {
            ShellCommand::Clear => {
                self.session.clear();
                writeln!(self.output, "🗑️ Chat cleared.")?;
            }
            ShellCommand::History => {
                if self.session.is_empty() {
                    writeln!(self.output, "No messages yet.")?;
                }
                for turn in self.session.turns() {
                    render_turn(&mut self.output, turn)?;
                }
            }
            ShellCommand::Guide => {
                writeln!(self.output, "{}\n\n{}", text::STUDY_GUIDE, text::COMMANDS)?
            }
            ShellCommand::Tips => writeln!(self.output, "{}", text::LEARNING_TIPS)?,
            ShellCommand::Debug => writeln!(self.output, "{}", self.diagnostics)?,
            ShellCommand::Quit => {}
        }
        Ok(())
    }
}

fn render_turn(out: &mut impl Write, turn: &Turn) -> std::io::Result<()> {
    let label = match turn.role() {
        TurnRole::User => "🧑 You",
        TurnRole::Assistant => "🧠 Mentor",
    };
    writeln!(out, "{label}: {}\n", turn.content())
}
