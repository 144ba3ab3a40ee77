//! Tooling detection
//!
//! Detection looks at the host once: it reads a distro identification file
//! and picks the first package manager whose binary exists. The result is a
//! plain value; nothing is printed, and callers decide how to surface the
//! diagnostics.

use async_trait::async_trait;
use command_executor::{Command, Launcher};
use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};
use crate::profile::PackageManagerProfile;

/// Identification file preferred when present
pub const REDHAT_RELEASE: &str = "/etc/redhat-release";

/// Fallback identification file
pub const ISSUE: &str = "/etc/issue";

/// Filesystem access used by detection
#[async_trait]
pub trait Probe: Send + Sync {
    /// Whether a path exists on the host
    async fn exists(&self, path: &Path) -> Result<bool>;

    /// Read a whole file from the host
    async fn read_to_string(&self, path: &Path) -> Result<String>;
}

/// Probe for the machine this process runs on
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalProbe;

#[async_trait]
impl Probe for LocalProbe {
    async fn exists(&self, path: &Path) -> Result<bool> {
        Ok(async_fs::metadata(path).await.is_ok())
    }

    async fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(async_fs::read_to_string(path).await?)
    }
}

/// Probe that inspects a host by running `test` and `cat` through a launcher
///
/// Used for remote hosts, so detection describes the target rather than the
/// machine running this code.
#[derive(Debug, Clone)]
pub struct LauncherProbe<L> {
    launcher: L,
}

impl<L: Launcher> LauncherProbe<L> {
    /// Wrap a launcher
    pub fn new(launcher: L) -> Self {
        Self { launcher }
    }
}

#[async_trait]
impl<L: Launcher> Probe for LauncherProbe<L> {
    async fn exists(&self, path: &Path) -> Result<bool> {
        let cmd = Command::builder("test").arg("-e").arg(path).build();
        let result = self.launcher.capture(cmd).await?;
        Ok(result.status.success())
    }

    async fn read_to_string(&self, path: &Path) -> Result<String> {
        let cmd = Command::builder("cat").arg(path).build();
        let line = cmd.to_shell_line();
        let result = self.launcher.capture(cmd).await?;
        if !result.status.success() {
            return Err(Error::backend_failure(
                line,
                result.non_empty_stderr().unwrap_or("read failed").trim(),
            ));
        }
        Ok(result.stdout.unwrap_or_default())
    }
}

/// A non-fatal finding from detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// None of the known package manager binaries exist
    NoPackageManager,
    /// Neither identification file exists
    NoDistroFile,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::NoPackageManager => f.write_str("Unable to find package manager"),
            Diagnostic::NoDistroFile => {
                write!(f, "Neither {} nor {} exists", REDHAT_RELEASE, ISSUE)
            }
        }
    }
}

/// What detection found on a host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    /// Human readable distro label
    pub distro: String,
    /// Selected package manager, if any was found
    pub profile: Option<PackageManagerProfile>,
    /// Non-fatal findings
    pub diagnostics: Vec<Diagnostic>,
}

impl Detection {
    /// A detection with the given label and profile, diagnostics derived
    pub fn new(distro: impl Into<String>, profile: Option<PackageManagerProfile>) -> Self {
        let diagnostics = if profile.is_none() {
            vec![Diagnostic::NoPackageManager]
        } else {
            Vec::new()
        };
        Self {
            distro: distro.into(),
            profile,
            diagnostics,
        }
    }

    /// Whether a package manager was found
    pub fn has_package_manager(&self) -> bool {
        self.profile.is_some()
    }
}

/// Clean up raw identification file content
///
/// Trailing whitespace goes, as do the literal `\n` and `\l` getty escapes
/// that `/etc/issue` carries.
pub fn clean_distro_label(raw: &str) -> String {
    raw.trim_end().replace("\\n", "").replace("\\l", "").trim_end().to_string()
}

/// Read the distro label, preferring `/etc/redhat-release`
pub async fn detect_distro(probe: &dyn Probe) -> Result<Option<String>> {
    for file in [REDHAT_RELEASE, ISSUE] {
        let path = Path::new(file);
        if probe.exists(path).await? {
            let raw = probe.read_to_string(path).await?;
            return Ok(Some(clean_distro_label(&raw)));
        }
    }
    Ok(None)
}

/// Pick the first profile whose binary exists
pub async fn detect_package_manager(
    probe: &dyn Probe,
    profiles: &[PackageManagerProfile],
) -> Result<Option<PackageManagerProfile>> {
    for profile in profiles {
        if probe.exists(&profile.path).await? {
            tracing::debug!(name = %profile.name, path = %profile.path.display(), "found package manager");
            return Ok(Some(profile.clone()));
        }
    }
    Ok(None)
}

/// Run full detection against a host
pub async fn detect(probe: &dyn Probe, profiles: &[PackageManagerProfile]) -> Result<Detection> {
    let distro = detect_distro(probe).await?;
    let profile = detect_package_manager(probe, profiles).await?;

    let mut detection = Detection::new(distro.clone().unwrap_or_default(), profile);
    if distro.is_none() {
        detection.diagnostics.push(Diagnostic::NoDistroFile);
    }
    Ok(detection)
}
