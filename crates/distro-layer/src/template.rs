//! Command templates and placeholder substitution
//!
//! A template is a shell command line with two optional placeholders:
//! `$ARGS$` takes the positional arguments joined with single spaces, and
//! `$KWARGS$` takes the named options rendered as `--key` / `--key=value`.
//! Substitution is a literal, single-pass replace of every occurrence; nothing
//! is quoted or validated, so a template with an empty substitution keeps its
//! surrounding spaces.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::options::CallOptions;

/// Placeholder for positional arguments
pub const ARGS_PLACEHOLDER: &str = "$ARGS$";

/// Placeholder for named options
pub const KWARGS_PLACEHOLDER: &str = "$KWARGS$";

/// Option names that steer a call and never reach the command line
pub const RESERVED_OPTIONS: [&str; 4] = ["command", "hide", "ignore_failure", "create"];

/// A command line template for one operation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Template(String);

impl Template {
    /// Wrap a template string
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// The raw template text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the template has nothing to run
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Substitute the call's arguments into the template
    pub fn render(&self, options: &CallOptions) -> ResolvedCommand {
        let args = options.args.join(" ");
        let kwargs = render_named(&options.named);

        let mut out = String::with_capacity(self.0.len() + args.len() + kwargs.len());
        let mut rest = self.0.as_str();
        while let Some(start) = rest.find('$') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            if let Some(after) = tail.strip_prefix(ARGS_PLACEHOLDER) {
                out.push_str(&args);
                rest = after;
            } else if let Some(after) = tail.strip_prefix(KWARGS_PLACEHOLDER) {
                out.push_str(&kwargs);
                rest = after;
            } else {
                out.push('$');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);
        ResolvedCommand(out)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Template {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Template {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Render named options as flags, dropping reserved names
///
/// Values that are absent or empty produce a bare `--key`.
pub fn render_named(named: &IndexMap<String, Option<String>>) -> String {
    named
        .iter()
        .filter(|(key, _)| !RESERVED_OPTIONS.contains(&key.as_str()))
        .map(|(key, value)| match value.as_deref() {
            Some(value) if !value.is_empty() => format!("--{}={}", key, value),
            _ => format!("--{}", key),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A fully substituted command line
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedCommand(String);

impl ResolvedCommand {
    /// The literal command line
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the command line string
    pub fn into_string(self) -> String {
        self.0
    }

    /// Split into words using POSIX shell quoting rules
    pub fn words(&self) -> Result<Vec<String>, shell_words::ParseError> {
        shell_words::split(&self.0)
    }
}

impl fmt::Display for ResolvedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for ResolvedCommand {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
