//! Shared test launcher and helpers

#![allow(dead_code)]

use async_trait::async_trait;
use command_executor::{Command, ExitResult, ExitStatus, Launcher, OutputMode};
use distro_layer::{Detection, DistroLayer, LayerConfig, PackageManagerProfile};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Launcher that records every command and replies with canned results
#[derive(Clone, Default)]
pub struct RecordingLauncher {
    calls: Arc<Mutex<Vec<(String, OutputMode)>>>,
    replies: Arc<Mutex<HashMap<String, ExitResult>>>,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to commands whose program is `program`
    pub fn reply(self, program: &str, code: i32, stdout: &str, stderr: &str) -> Self {
        self.replies.lock().unwrap().insert(
            program.to_string(),
            ExitResult {
                status: ExitStatus::from_code(code),
                stdout: Some(stdout.to_string()),
                stderr: Some(stderr.to_string()),
            },
        );
        self
    }

    /// Command lines seen so far, in order
    pub fn commands(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(c, _)| c.clone()).collect()
    }

    /// Output modes seen so far, in order
    pub fn modes(&self) -> Vec<OutputMode> {
        self.calls.lock().unwrap().iter().map(|(_, m)| *m).collect()
    }
}

#[async_trait]
impl Launcher for RecordingLauncher {
    async fn execute(&self, command: Command, output: OutputMode) -> command_executor::Result<ExitResult> {
        self.calls
            .lock()
            .unwrap()
            .push((command.to_shell_line(), output));

        let program = command.get_program().to_string_lossy().to_string();
        let reply = self.replies.lock().unwrap().get(&program).cloned();
        let mut result = reply.unwrap_or_else(|| ExitResult {
            status: ExitStatus::from_code(0),
            stdout: Some(String::new()),
            stderr: Some(String::new()),
        });
        if output == OutputMode::Inherit {
            result.stdout = None;
            result.stderr = None;
        }
        Ok(result)
    }
}

/// A layer for a host where apt was detected
pub fn apt_layer(launcher: RecordingLauncher, config: LayerConfig) -> DistroLayer<RecordingLauncher> {
    let detection = Detection::new("Debian GNU/Linux 12", Some(PackageManagerProfile::apt()));
    DistroLayer::from_detection(launcher, detection, config).unwrap()
}

/// A layer for a host with no package manager
pub fn bare_layer(launcher: RecordingLauncher, config: LayerConfig) -> DistroLayer<RecordingLauncher> {
    let detection = Detection::new("Custom Linux", None);
    DistroLayer::from_detection(launcher, detection, config).unwrap()
}
