//! Main executor type that wraps different launchers

use crate::command::Command;
use crate::error::Result;
use crate::launcher::{Launcher, OutputMode};
use crate::process::ExitResult;

/// An executor that runs commands via a specific launcher
///
/// The launcher is chosen once and owned for the executor's lifetime.
pub struct Executor<L: Launcher> {
    /// The host name for logging/identification
    host: String,
    /// The launcher implementation
    launcher: L,
}

impl<L: Launcher> Executor<L> {
    /// Create a new executor with the given launcher
    pub fn new(host: impl Into<String>, launcher: L) -> Self {
        Self {
            host: host.into(),
            launcher,
        }
    }

    /// Get the host name
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Run a command and wait for it to complete
    pub async fn execute(&self, command: Command, output: OutputMode) -> Result<ExitResult> {
        tracing::debug!(host = %self.host, command = %command, ?output, "executing command");
        self.launcher.execute(command, output).await
    }

    /// Run a command with captured output
    pub async fn capture(&self, command: Command) -> Result<ExitResult> {
        self.execute(command, OutputMode::Capture).await
    }

    /// Get a reference to the launcher
    pub fn launcher(&self) -> &L {
        &self.launcher
    }
}

impl Executor<crate::backends::LocalLauncher> {
    /// Create an executor for local execution
    pub fn local(host: impl Into<String>) -> Self {
        Self::new(host, crate::backends::LocalLauncher)
    }
}
