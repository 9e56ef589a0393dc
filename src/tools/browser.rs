//! Opening URLs in the user's browser.

use std::process::{Command, Stdio};
use std::thread;

use tracing::debug;

use crate::error::MentorError;

/// Something that can show a URL to the user.
pub trait Browser: Send + Sync {
    fn open(&self, url: &str) -> Result<(), MentorError>;
}

/// Launches the system default browser without waiting for it.
///
/// `$BROWSER` wins when set; otherwise the platform opener is used.
#[derive(Debug, Clone, Default)]
pub struct SystemBrowser;

impl SystemBrowser {
    fn command(url: &str) -> Command {
        if let Some(browser) = std::env::var_os("BROWSER").filter(|b| !b.is_empty()) {
            let mut cmd = Command::new(browser);
            cmd.arg(url);
            return cmd;
        }

        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            // The empty argument is the window title `start` expects first.
            cmd.args(["/C", "start", ""]).arg(url);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> Result<(), MentorError> {
        debug!(url, "opening browser");
        let mut child = Self::command(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| MentorError::Browser(format!("failed to launch browser for {url}: {e}")))?;

        // Reap in the background so the opener never lingers as a zombie.
        thread::Builder::new()
            .name("browser-reaper".into())
            .spawn(move || {
                let _ = child.wait();
            })
            .map(|_| ())
            .map_err(|e| MentorError::Browser(format!("failed to watch browser process: {e}")))
    }
}
