//! Launcher trait for executing commands in different contexts

use crate::command::Command;
use crate::error::Result;
use crate::process::ExitResult;
use async_trait::async_trait;

/// What to do with the standard streams of a launched command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Let the command write straight to the caller's stdout/stderr
    #[default]
    Inherit,
    /// Capture stdout and stderr into the [`ExitResult`]
    Capture,
}

impl OutputMode {
    /// Capture when `hide` is set, inherit otherwise
    pub fn hidden(hide: bool) -> Self {
        if hide { Self::Capture } else { Self::Inherit }
    }
}

/// A launcher that can run commands in a specific context
///
/// This is the whole contract a remote session has to honour: run a command,
/// optionally capture its output, and report how it ended. Calls block the
/// awaiting task until the command finishes; there is no timeout.
#[async_trait]
pub trait Launcher: Send + Sync + 'static {
    /// Run a command to completion
    async fn execute(&self, command: Command, output: OutputMode) -> Result<ExitResult>;

    /// Run a command with captured output
    async fn capture(&self, command: Command) -> Result<ExitResult> {
        self.execute(command, OutputMode::Capture).await
    }
}

#[async_trait]
impl<L: Launcher + ?Sized> Launcher for Box<L> {
    async fn execute(&self, command: Command, output: OutputMode) -> Result<ExitResult> {
        (**self).execute(command, output).await
    }
}
