//! Host queries that bypass the operation table

use command_executor::{Command, ExitResult, Launcher};

use crate::error::{Error, Result};
use crate::layer::DistroLayer;

/// First field of each non-empty line of `/etc/group` formatted text
pub fn parse_group_names(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| line.split(':').next())
        .map(str::to_string)
        .collect()
}

/// Interpret `which`-style output; anything that is not a path means "not found"
pub fn parse_program_path(exit: &ExitResult) -> Option<String> {
    if !exit.status.success() {
        return None;
    }
    let output = exit.stdout_str();
    if output.starts_with("which:") {
        return None;
    }
    let path = output.lines().next().unwrap_or_default().trim();
    (!path.is_empty()).then(|| path.to_string())
}

impl<L: Launcher> DistroLayer<L> {
    /// Group names defined on the host
    pub async fn groups_on_server(&self) -> Result<Vec<String>> {
        let cmd = Command::builder("cat").arg("/etc/group").build();
        let exit = self.capture_checked(cmd).await?;
        Ok(parse_group_names(exit.stdout_str()))
    }

    /// Full path of a program on the host, `None` when it is not installed
    pub async fn program_path(&self, program: &str) -> Result<Option<String>> {
        let mut cmd = Command::from_argv(&self.config().program_lookup).ok_or_else(|| {
            Error::EmptyCommand {
                operation: "program_path".to_string(),
            }
        })?;
        cmd.arg(program);

        let exit = self.executor().capture(cmd).await?;
        Ok(parse_program_path(&exit))
    }

    /// Hash a password with the configured external tool
    pub async fn encrypt_password(&self, password: &str) -> Result<String> {
        let mut cmd = Command::from_argv(&self.config().password_hasher).ok_or_else(|| {
            Error::EmptyCommand {
                operation: "encrypt_password".to_string(),
            }
        })?;
        cmd.arg(password);

        // The argv holds the plaintext, so it goes straight to the launcher
        // and only the program is logged or reported
        let program = cmd.get_program().to_string_lossy().to_string();
        tracing::debug!(host = %self.executor().host(), program = %program, "hashing password");
        let exit = self.executor().launcher().capture(cmd).await?;
        if !exit.status.success() {
            return Err(Error::backend_failure(
                program,
                exit.non_empty_stderr().unwrap_or("password hashing failed").trim_end(),
            ));
        }
        Ok(exit.stdout_str().trim_end().to_string())
    }

    /// Run a helper command with captured output; a non-zero exit is an error
    async fn capture_checked(&self, cmd: Command) -> Result<ExitResult> {
        let line = cmd.to_shell_line();
        let exit = self.executor().capture(cmd).await?;
        if !exit.status.success() {
            return Err(Error::backend_failure(
                line,
                exit.non_empty_stderr().unwrap_or("command failed").trim_end(),
            ));
        }
        self.surface_stderr(&line, &exit)?;
        Ok(exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use command_executor::ExitStatus;

    fn exit(code: i32, stdout: &str) -> ExitResult {
        ExitResult {
            status: ExitStatus::from_code(code),
            stdout: Some(stdout.to_string()),
            stderr: Some(String::new()),
        }
    }

    #[test]
    fn test_parse_group_names() {
        let content = "root:x:0:\ndaemon:x:1:\nsudo:x:27:alice,bob\n\n";
        assert_eq!(parse_group_names(content), vec!["root", "daemon", "sudo"]);
        assert!(parse_group_names("").is_empty());
    }

    #[test]
    fn test_parse_program_path() {
        assert_eq!(
            parse_program_path(&exit(0, "/usr/bin/curl\n")),
            Some("/usr/bin/curl".to_string())
        );
        assert_eq!(parse_program_path(&exit(1, "")), None);
        assert_eq!(
            parse_program_path(&exit(0, "which: no nonexistent_binary_xyz in (/usr/bin:/bin)\n")),
            None
        );
        assert_eq!(parse_program_path(&exit(0, "\n")), None);
    }
}
