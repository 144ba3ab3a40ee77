//! Layer configuration
//!
//! Configuration can be built in code or loaded from YAML:
//!
//! ```yaml
//! policy: strict
//! commands:
//!   install: "apt install --yes $ARGS$"
//!   flush_dns: "resolvectl flush-caches"
//!   reboot: null
//! password_hasher: ["mkpasswd", "--method=sha-512"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::profile::{PackageManagerProfile, builtin_profiles};
use crate::registry::Overrides;
use crate::template::Template;

/// How non-fatal conditions are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log a warning and carry on with a benign value
    #[default]
    Lenient,
    /// Return an error
    Strict,
}

impl FailurePolicy {
    /// True for [`FailurePolicy::Strict`]
    pub fn is_strict(self) -> bool {
        self == Self::Strict
    }
}

/// Settings for a [`DistroLayer`](crate::DistroLayer)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Operation overrides, applied over the detected table
    #[serde(default)]
    pub commands: Overrides,

    /// Failure reporting mode
    #[serde(default)]
    pub policy: FailurePolicy,

    /// Package managers to probe, in priority order; built-ins when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_managers: Option<Vec<PackageManagerProfile>>,

    /// Command used by `encrypt_password`; the plaintext is appended
    #[serde(default = "default_password_hasher")]
    pub password_hasher: Vec<String>,

    /// Command used by `program_path`; the program name is appended
    #[serde(default = "default_program_lookup")]
    pub program_lookup: Vec<String>,
}

fn default_password_hasher() -> Vec<String> {
    vec!["openssl".into(), "passwd".into(), "-6".into()]
}

fn default_program_lookup() -> Vec<String> {
    vec!["which".into()]
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            commands: Overrides::new(),
            policy: FailurePolicy::default(),
            package_managers: None,
            password_hasher: default_password_hasher(),
            program_lookup: default_program_lookup(),
        }
    }
}

impl LayerConfig {
    /// Parse configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Add or replace an operation override
    pub fn with_command(mut self, operation: impl Into<String>, template: impl Into<Template>) -> Self {
        self.commands.insert(operation.into(), Some(template.into()));
        self
    }

    /// Disable an operation
    pub fn without_command(mut self, operation: impl Into<String>) -> Self {
        self.commands.insert(operation.into(), None);
        self
    }

    /// Set the failure policy
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the package manager probe list
    pub fn with_package_managers(mut self, profiles: Vec<PackageManagerProfile>) -> Self {
        self.package_managers = Some(profiles);
        self
    }

    /// Profiles to probe, in priority order
    pub fn profiles(&self) -> Vec<PackageManagerProfile> {
        self.package_managers.clone().unwrap_or_else(builtin_profiles)
    }
}
