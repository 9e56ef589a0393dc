//! Blocking entry point into the async agent.
//!
//! Each call owns a fresh current-thread runtime that is shut down before the
//! call returns, so no task, timer or connection survives between turns.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::agent::Agent;
use crate::error::MentorError;
use crate::normalize::normalize;
use crate::util::timeout::with_timeout;

/// Grace period for the per-call runtime to wind down after the answer.
const RUNTIME_SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// Something that turns a question into an answer string. Never fails,
/// including when something below it panics.
pub trait Asker {
    fn ask(&self, prompt: &str) -> String;
}

/// Runs [`Agent::run`] to completion from synchronous code.
///
/// Must not be called from inside a tokio runtime.
#[derive(Debug, Clone)]
pub struct SyncBridge {
    agent: Agent,
    timeout: Duration,
    cancel: CancellationToken,
}

impl SyncBridge {
    pub fn new(agent: Agent, timeout: Duration) -> Self {
        Self {
            agent,
            timeout,
            cancel: CancellationToken::new(),
        }
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Token that aborts the in-flight call and every later one.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Answer `prompt`, converting every failure into a user-visible string.
    pub fn ask(&self, prompt: &str) -> String {
        match self.run_blocking(prompt) {
            Ok(answer) => answer,
            Err(BridgeError::Agent(e)) => {
                warn!(error = %e, "agent run failed");
                format!("❌ Error running agent: {e}")
            }
            Err(BridgeError::Wrapper(e)) => {
                warn!(error = %e, "sync bridge failed");
                format!("❌ Error in sync wrapper: {e}")
            }
        }
    }

    fn run_blocking(&self, prompt: &str) -> Result<String, BridgeError> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(BridgeError::Wrapper(MentorError::Runtime(
                "cannot block on the agent from inside an async runtime".into(),
            )));
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| BridgeError::Wrapper(MentorError::Io(e)))?;

        debug!(timeout_ms = self.timeout.as_millis() as u64, "bridge call");
        let agent = self.agent.clone();
        let cancel = self.cancel.clone();
        let timeout = self.timeout;
        let prompt = prompt.to_string();
        // Spawned so a panic below the bridge comes back as a JoinError.
        let task = runtime.spawn(async move {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(MentorError::Cancelled),
                result = with_timeout(timeout, agent.run(&prompt)) => result,
            }
        });
        let outcome = runtime.block_on(task).unwrap_or_else(|e| {
            Err(MentorError::Runtime(if e.is_panic() {
                "agent task panicked".to_string()
            } else {
                format!("agent task failed: {e}")
            }))
        });
        runtime.shutdown_timeout(RUNTIME_SHUTDOWN_GRACE);

        outcome
            .map(|result| normalize(&result))
            .map_err(BridgeError::Agent)
    }
}

impl<T: Asker + ?Sized> Asker for &T {
    fn ask(&self, prompt: &str) -> String {
        (**self).ask(prompt)
    }
}

impl Asker for SyncBridge {
    fn ask(&self, prompt: &str) -> String {
        SyncBridge::ask(self, prompt)
    }
}

enum BridgeError {
    Agent(MentorError),
    Wrapper(MentorError),
}
