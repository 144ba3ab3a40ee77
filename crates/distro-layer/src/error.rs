//! Error types for distro-layer

use thiserror::Error;

/// Result type alias for distro-layer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while detecting tooling, resolving or running operations
#[derive(Error, Debug)]
pub enum Error {
    /// The operation has no template for this host
    #[error("{operation} is not implemented")]
    NotImplemented {
        /// Name of the missing operation
        operation: String,
    },

    /// An operation call did not name an operation
    #[error("no command supplied")]
    MissingCommandName,

    /// No known package manager was found on the host
    #[error("unable to find a package manager on {host}")]
    DetectionFailure {
        /// Host that was inspected
        host: String,
    },

    /// The backend reported errors on stderr, or a helper command failed
    #[error("`{command}` reported an error: {stderr}")]
    BackendFailure {
        /// The command line that ran
        command: String,
        /// What the backend reported
        stderr: String,
    },

    /// The resolved command line could not be split into words
    #[error("unable to split `{command}` into words: {source}")]
    Tokenize {
        /// The resolved command line
        command: String,
        /// Underlying parse error
        #[source]
        source: shell_words::ParseError,
    },

    /// The resolved command line contained no words
    #[error("operation {operation} resolved to an empty command")]
    EmptyCommand {
        /// Name of the operation
        operation: String,
    },

    /// Execution backend error
    #[error("Execution error: {0}")]
    Executor(#[from] command_executor::Error),

    /// Failed to parse YAML configuration
    #[error("Failed to parse YAML: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Failed to read a file
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a not implemented error
    pub fn not_implemented(operation: impl Into<String>) -> Self {
        Self::NotImplemented {
            operation: operation.into(),
        }
    }

    /// Create a backend failure error
    pub fn backend_failure(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::BackendFailure {
            command: command.into(),
            stderr: stderr.into(),
        }
    }
}
