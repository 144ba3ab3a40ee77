//! Local process execution backend

use async_process::Stdio;
use async_trait::async_trait;

use crate::command::Command;
use crate::error::{Error, Result};
use crate::launcher::{Launcher, OutputMode};
use crate::process::ExitResult;

/// Launcher for executing processes locally
///
/// The command is spawned directly from its argument vector; no shell is
/// involved.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalLauncher;

#[async_trait]
impl Launcher for LocalLauncher {
    async fn execute(&self, command: Command, output: OutputMode) -> Result<ExitResult> {
        let program = command.get_program().to_string_lossy().to_string();
        let mut async_cmd = command.prepare();
        async_cmd.stdin(Stdio::null());

        match output {
            OutputMode::Capture => {
                let out = async_cmd
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped())
                    .output()
                    .await
                    .map_err(|e| Error::from_spawn(&program, e))?;

                Ok(ExitResult {
                    status: out.status.into(),
                    stdout: Some(String::from_utf8_lossy(&out.stdout).into_owned()),
                    stderr: Some(String::from_utf8_lossy(&out.stderr).into_owned()),
                })
            }
            OutputMode::Inherit => {
                let status = async_cmd
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .await
                    .map_err(|e| Error::from_spawn(&program, e))?;

                Ok(ExitResult {
                    status: status.into(),
                    stdout: None,
                    stderr: None,
                })
            }
        }
    }
}
