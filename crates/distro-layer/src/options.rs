//! Per-call options for operation invocations

use indexmap::IndexMap;

/// Arguments and control flags for one operation call
///
/// `args` and `named` flow into the command line; the boolean flags only
/// steer how the call is carried out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallOptions {
    /// Positional arguments, substituted for `$ARGS$` in call order
    pub args: Vec<String>,
    /// Named options, rendered as `--key` or `--key=value` for `$KWARGS$`
    pub named: IndexMap<String, Option<String>>,
    /// Capture output instead of inheriting it, and skip the command echo
    pub hide: bool,
    /// Turn a missing operation into a no-op instead of an error
    pub ignore_failure: bool,
    /// Return the resolved command line without running it
    pub template_only: bool,
}

impl CallOptions {
    /// Empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Options carrying the given positional arguments
    pub fn with_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new().args(args)
    }

    /// Add a positional argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add several positional arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Add a value-less named option (`--key`)
    pub fn flag(mut self, key: impl Into<String>) -> Self {
        self.named.insert(key.into(), None);
        self
    }

    /// Add a named option with a value (`--key=value`)
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.named.insert(key.into(), Some(value.into()));
        self
    }

    /// Capture output and skip the echo
    pub fn hide(mut self) -> Self {
        self.hide = true;
        self
    }

    /// Treat a missing operation as a no-op
    pub fn ignore_failure(mut self) -> Self {
        self.ignore_failure = true;
        self
    }

    /// Only resolve the command line
    pub fn template_only(mut self) -> Self {
        self.template_only = true;
        self
    }
}

impl<S: Into<String>> From<Vec<S>> for CallOptions {
    fn from(args: Vec<S>) -> Self {
        Self::with_args(args)
    }
}

impl From<&str> for CallOptions {
    fn from(arg: &str) -> Self {
        Self::new().arg(arg)
    }
}
