//! The distro abstraction layer
//!
//! A [`DistroLayer`] is bound to one host. Construction detects the host's
//! tooling and builds the operation table once; after that every call goes
//! through [`DistroLayer::invoke`], which resolves the operation's template and
//! either returns the command line or runs it on the launcher chosen at
//! construction.

use command_executor::backends::LocalLauncher;
use command_executor::{Command, ExitResult, Executor, Launcher, OutputMode};

use crate::config::{FailurePolicy, LayerConfig};
use crate::detector::{Detection, LocalProbe, Probe, detect};
use crate::error::{Error, Result};
use crate::options::CallOptions;
use crate::registry::OperationTable;
use crate::template::{ResolvedCommand, Template};

/// Tracing target for the pre-execution command echo
pub const ECHO_TARGET: &str = "distro_layer::echo";

/// The result of running a resolved command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// The command line that ran
    pub command: String,
    /// Exit status and any captured output
    pub exit: ExitResult,
}

impl ExecutionResult {
    /// Whether the command exited with status 0
    pub fn success(&self) -> bool {
        self.exit.status.success()
    }

    /// Captured stdout, if output was hidden
    pub fn stdout(&self) -> Option<&str> {
        self.exit.stdout.as_deref()
    }

    /// Captured stderr, if output was hidden
    pub fn stderr(&self) -> Option<&str> {
        self.exit.stderr.as_deref()
    }
}

/// What an operation call produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Template-only call: the command line that would run
    Resolved(String),
    /// The command ran
    Executed(ExecutionResult),
    /// Nothing happened (suppressed failure or missing operation name)
    Skipped,
}

impl Outcome {
    /// The resolved command line of a template-only call
    pub fn resolved(&self) -> Option<&str> {
        match self {
            Outcome::Resolved(command) => Some(command.as_str()),
            _ => None,
        }
    }

    /// The execution result of a call that ran
    pub fn executed(&self) -> Option<&ExecutionResult> {
        match self {
            Outcome::Executed(result) => Some(result),
            _ => None,
        }
    }

    /// Whether the call was a no-op
    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped)
    }
}

/// Uniform package and service operations for one host
pub struct DistroLayer<L: Launcher> {
    executor: Executor<L>,
    detection: Detection,
    table: OperationTable,
    config: LayerConfig,
}

impl DistroLayer<LocalLauncher> {
    /// Detect the local machine and run operations on it
    pub async fn local(config: LayerConfig) -> Result<Self> {
        Self::with_probe(LocalLauncher, &LocalProbe, config).await
    }
}

impl<L: Launcher + Clone> DistroLayer<L> {
    /// Detect a host through its launcher and run operations on it
    ///
    /// Detection runs `test -e` and `cat` on the target, which is what a
    /// remote session needs.
    pub async fn remote(launcher: L, config: LayerConfig) -> Result<Self> {
        let probe = crate::detector::LauncherProbe::new(launcher.clone());
        Self::with_probe(launcher, &probe, config).await
    }
}

impl<L: Launcher> DistroLayer<L> {
    /// Run detection with `probe`, then build the layer
    pub async fn with_probe(launcher: L, probe: &dyn Probe, config: LayerConfig) -> Result<Self> {
        let detection = detect(probe, &config.profiles()).await?;
        Self::from_detection(launcher, detection, config)
    }

    /// Build the layer from an existing detection result
    ///
    /// In strict mode a detection without a package manager is an error.
    pub fn from_detection(launcher: L, detection: Detection, config: LayerConfig) -> Result<Self> {
        let host = if detection.distro.is_empty() {
            "unknown".to_string()
        } else {
            detection.distro.clone()
        };

        for diagnostic in &detection.diagnostics {
            tracing::warn!(host = %host, "{}", diagnostic);
        }
        if config.policy.is_strict() && !detection.has_package_manager() {
            return Err(Error::DetectionFailure { host });
        }

        let table = OperationTable::build(detection.profile.as_ref(), &config.commands);
        Ok(Self {
            executor: Executor::new(host, launcher),
            detection,
            table,
            config,
        })
    }

    /// The detected distro label
    pub fn distro(&self) -> &str {
        &self.detection.distro
    }

    /// The full detection result
    pub fn detection(&self) -> &Detection {
        &self.detection
    }

    /// The live operation table
    pub fn table(&self) -> &OperationTable {
        &self.table
    }

    /// The failure policy in effect
    pub fn policy(&self) -> FailurePolicy {
        self.config.policy
    }

    pub(crate) fn config(&self) -> &LayerConfig {
        &self.config
    }

    pub(crate) fn executor(&self) -> &Executor<L> {
        &self.executor
    }

    /// Names of operations with a usable template
    pub fn valid_commands(&self) -> Vec<&str> {
        self.table.valid_commands()
    }

    /// The template for an operation, logging a diagnostic when there is none
    pub fn show_command(&self, operation: &str) -> Option<&Template> {
        let template = self.table.get(operation);
        if template.is_none() {
            tracing::warn!(
                operation,
                valid = ?self.table.valid_commands(),
                "Unable to find command: {}. Check valid_commands() for the operations this host supports",
                operation
            );
        }
        template
    }

    /// Add or replace an operation; `None` disables it
    ///
    /// The template is stored as given, without validation.
    pub fn add_command(&mut self, operation: impl Into<String>, template: Option<Template>) {
        self.table.insert(operation, template);
    }

    /// Resolve an operation to a command line
    ///
    /// Returns `Ok(None)` for a missing operation when `ignore_failure` is set.
    pub fn resolve(&self, operation: &str, options: &CallOptions) -> Result<Option<ResolvedCommand>> {
        match self.table.get(operation) {
            Some(template) => Ok(Some(template.render(options))),
            None if options.ignore_failure => {
                tracing::debug!(operation, "ignoring unimplemented operation");
                Ok(None)
            }
            None => Err(Error::not_implemented(operation)),
        }
    }

    /// Resolve and, unless `template_only` is set, run an operation
    pub async fn invoke(&self, operation: &str, options: CallOptions) -> Result<Outcome> {
        if operation.is_empty() {
            if self.config.policy.is_strict() {
                return Err(Error::MissingCommandName);
            }
            if !options.ignore_failure {
                tracing::warn!("NO COMMAND SUPPLIED!");
            }
            return Ok(Outcome::Skipped);
        }

        let Some(resolved) = self.resolve(operation, &options)? else {
            return Ok(Outcome::Skipped);
        };
        if options.template_only {
            return Ok(Outcome::Resolved(resolved.into_string()));
        }

        self.execute(operation, resolved, options.hide)
            .await
            .map(Outcome::Executed)
    }

    /// Run a resolved command on this layer's launcher
    pub async fn execute(
        &self,
        operation: &str,
        resolved: ResolvedCommand,
        hide: bool,
    ) -> Result<ExecutionResult> {
        let words = resolved.words().map_err(|source| Error::Tokenize {
            command: resolved.to_string(),
            source,
        })?;
        let command = Command::from_argv(words).ok_or_else(|| Error::EmptyCommand {
            operation: operation.to_string(),
        })?;

        if !hide {
            tracing::info!(target: ECHO_TARGET, host = %self.executor.host(), "{}", resolved);
        }

        let exit = self
            .executor
            .execute(command, OutputMode::hidden(hide))
            .await?;

        self.surface_stderr(resolved.as_str(), &exit)?;
        Ok(ExecutionResult {
            command: resolved.into_string(),
            exit,
        })
    }

    /// Report non-empty stderr, whatever the hide setting
    pub(crate) fn surface_stderr(&self, command: &str, exit: &ExitResult) -> Result<()> {
        if let Some(stderr) = exit.non_empty_stderr() {
            if self.config.policy.is_strict() {
                return Err(Error::backend_failure(command, stderr.trim_end()));
            }
            tracing::warn!(host = %self.executor.host(), command, "{}", stderr.trim_end());
        }
        Ok(())
    }
}

/// Named wrappers that forward to [`DistroLayer::invoke`]
impl<L: Launcher> DistroLayer<L> {
    /// Install packages
    pub async fn install(&self, options: impl Into<CallOptions>) -> Result<Outcome> {
        self.invoke("install", options.into()).await
    }

    /// Upgrade installed packages
    pub async fn upgrade(&self, options: impl Into<CallOptions>) -> Result<Outcome> {
        self.invoke("upgrade", options.into()).await
    }

    /// Refresh package metadata
    pub async fn update(&self, options: impl Into<CallOptions>) -> Result<Outcome> {
        self.invoke("update", options.into()).await
    }

    /// Remove packages
    pub async fn remove(&self, options: impl Into<CallOptions>) -> Result<Outcome> {
        self.invoke("remove", options.into()).await
    }

    /// Reboot the host
    pub async fn reboot(&self, options: impl Into<CallOptions>) -> Result<Outcome> {
        self.invoke("reboot", options.into()).await
    }

    /// Set the host name
    pub async fn set_hostname(&self, options: impl Into<CallOptions>) -> Result<Outcome> {
        self.invoke("set_hostname", options.into()).await
    }

    /// Enable a service at boot
    pub async fn enable_service(&self, options: impl Into<CallOptions>) -> Result<Outcome> {
        self.invoke("enable_service", options.into()).await
    }

    /// Disable a service at boot
    pub async fn disable_service(&self, options: impl Into<CallOptions>) -> Result<Outcome> {
        self.invoke("disable_service", options.into()).await
    }

    /// Start a service
    pub async fn start_service(&self, options: impl Into<CallOptions>) -> Result<Outcome> {
        self.invoke("start_service", options.into()).await
    }

    /// Stop a service
    pub async fn stop_service(&self, options: impl Into<CallOptions>) -> Result<Outcome> {
        self.invoke("stop_service", options.into()).await
    }

    /// Restart a service
    pub async fn restart_service(&self, options: impl Into<CallOptions>) -> Result<Outcome> {
        self.invoke("restart_service", options.into()).await
    }
}
