//! Process exit status and captured results

/// Process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExitStatus {
    /// Exit code if the process exited normally
    pub code: Option<i32>,
    /// Signal that terminated the process (Unix only)
    #[cfg(unix)]
    pub signal: Option<i32>,
}

impl ExitStatus {
    /// An exit status carrying only an exit code
    pub fn from_code(code: i32) -> Self {
        Self {
            code: Some(code),
            #[cfg(unix)]
            signal: None,
        }
    }

    /// Returns true if the process exited successfully (code 0)
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Returns true if the process was terminated by a signal
    pub fn terminated_by_signal(&self) -> bool {
        #[cfg(unix)]
        {
            self.signal.is_some()
        }
        #[cfg(not(unix))]
        {
            false
        }
    }
}

impl From<std::process::ExitStatus> for ExitStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
            #[cfg(unix)]
            signal: std::os::unix::process::ExitStatusExt::signal(&status),
        }
    }
}

/// Result of running a command to completion
///
/// Output fields are `None` when the stream was inherited by the caller's
/// terminal rather than captured.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExitResult {
    /// How the process ended
    pub status: ExitStatus,
    /// Captured standard output
    pub stdout: Option<String>,
    /// Captured standard error
    pub stderr: Option<String>,
}

impl ExitResult {
    /// Captured stdout, or an empty string when it was not captured
    pub fn stdout_str(&self) -> &str {
        self.stdout.as_deref().unwrap_or_default()
    }

    /// Captured stderr if it holds anything besides whitespace
    pub fn non_empty_stderr(&self) -> Option<&str> {
        self.stderr.as_deref().filter(|s| !s.trim().is_empty())
    }
}
