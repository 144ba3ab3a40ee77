//! SSH remote execution backend using CLI

use async_trait::async_trait;
use std::path::PathBuf;

use crate::command::Command;
use crate::error::{Error, Result};
use crate::launcher::{Launcher, OutputMode};
use crate::process::ExitResult;

/// Exit code the `ssh` client reports when the connection itself failed
const SSH_CONNECTION_FAILURE: i32 = 255;

/// SSH connection configuration
#[derive(Debug, Clone)]
pub struct SshConfig {
    /// Target host (hostname or IP)
    host: String,
    /// SSH user (optional, uses system default if not specified)
    user: Option<String>,
    /// SSH port (optional, defaults to 22)
    port: Option<u16>,
    /// Path to identity file (private key)
    identity_file: Option<PathBuf>,
    /// Additional SSH arguments
    extra_args: Vec<String>,
}

impl SshConfig {
    /// Create a new SSH configuration for the given host
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            user: None,
            port: None,
            identity_file: None,
            extra_args: Vec::new(),
        }
    }

    /// Set the SSH user
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Set the SSH port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the identity file (private key)
    pub fn with_identity_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.identity_file = Some(path.into());
        self
    }

    /// Add extra SSH arguments
    pub fn with_extra_arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    /// Get the host string (user@host if user is specified)
    pub fn host_string(&self) -> String {
        if let Some(user) = &self.user {
            format!("{}@{}", user, self.host)
        } else {
            self.host.clone()
        }
    }
}

/// SSH launcher that wraps another launcher for remote execution
///
/// The session is established per command by the `ssh` client, so
/// authentication has to be non-interactive (agent or identity file).
#[derive(Debug, Clone)]
pub struct SshLauncher<L> {
    inner: L,
    config: SshConfig,
}

impl<L> SshLauncher<L> {
    /// Create a new SSH launcher wrapping the given inner launcher
    pub fn new(inner: L, config: SshConfig) -> Self {
        Self { inner, config }
    }

    /// The connection configuration
    pub fn config(&self) -> &SshConfig {
        &self.config
    }

    /// Build the local `ssh` invocation that runs `command` on the remote host
    pub fn wrap(&self, command: &Command) -> Command {
        let mut ssh_cmd = Command::new("ssh");

        if let Some(port) = self.config.port {
            ssh_cmd.arg("-p").arg(port.to_string());
        }

        if let Some(identity) = &self.config.identity_file {
            ssh_cmd.arg("-i").arg(identity);
        }

        for arg in &self.config.extra_args {
            ssh_cmd.arg(arg);
        }

        ssh_cmd.arg(self.config.host_string());

        // The remote side hands this string to the login shell
        ssh_cmd.arg(command.to_shell_line());
        ssh_cmd
    }
}

impl SshLauncher<crate::backends::local::LocalLauncher> {
    /// Convenience constructor for SSH wrapping LocalLauncher
    pub fn to_host(host: impl Into<String>) -> Self {
        Self {
            inner: crate::backends::local::LocalLauncher,
            config: SshConfig::new(host),
        }
    }
}

#[async_trait]
impl<L> Launcher for SshLauncher<L>
where
    L: Launcher,
{
    async fn execute(&self, command: Command, output: OutputMode) -> Result<ExitResult> {
        let ssh_cmd = self.wrap(&command);
        let result = self
            .inner
            .execute(ssh_cmd, output)
            .await
            .map_err(|e| e.with_layer_context("SSH"))?;

        if result.status.code == Some(SSH_CONNECTION_FAILURE) {
            return Err(Error::SshConnectionFailed {
                host: self.config.host_string(),
                reason: result
                    .non_empty_stderr()
                    .map(|s| s.trim().to_string())
                    .unwrap_or_else(|| "ssh exited with status 255".to_string()),
            });
        }

        Ok(result)
    }
}

// Convenience constructor for Executor with SshLauncher
impl<L> crate::executor::Executor<SshLauncher<L>>
where
    L: Launcher,
{
    /// Create an executor for SSH remote execution
    pub fn ssh(inner: L, config: SshConfig) -> Self {
        let host = config.host_string();
        Self::new(host, SshLauncher::new(inner, config))
    }
}
