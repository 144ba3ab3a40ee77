//! Command type for building executable commands

use async_process::Command as AsyncCommand;
use std::ffi::{OsStr, OsString};
use std::fmt;

/// A command to be executed
///
/// This is a builder for creating commands that can be converted to `async_process::Command`
/// when needed. Unlike `AsyncCommand`, this type is `Clone` and can be reused multiple times,
/// and it can be rendered back into a command line for remote shells and logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// The program to execute
    program: OsString,
    /// The arguments to pass to the program
    args: Vec<OsString>,
}

impl Command {
    /// Create a new command for the given program
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            args: Vec::new(),
        }
    }

    /// Build a command from an argument vector (program first)
    ///
    /// Returns `None` when the vector is empty.
    pub fn from_argv<I, S>(argv: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut argv = argv.into_iter();
        let mut cmd = Command::new(argv.next()?);
        cmd.args(argv);
        Some(cmd)
    }

    /// Add an argument to the command
    pub fn arg<S: AsRef<OsStr>>(&mut self, arg: S) -> &mut Self {
        self.args.push(arg.as_ref().to_owned());
        self
    }

    /// Add multiple arguments to the command
    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self.arg(arg);
        }
        self
    }

    /// Get the program name
    pub fn get_program(&self) -> &OsStr {
        &self.program
    }

    /// Get the arguments
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Render the command as a single line with shell quoting where needed
    pub fn to_shell_line(&self) -> String {
        let program = self.program.to_string_lossy().to_string();
        let args: Vec<String> = self
            .args
            .iter()
            .map(|arg| shell_escape(arg.to_string_lossy().to_string()))
            .collect();

        if args.is_empty() {
            program
        } else {
            format!("{} {}", program, args.join(" "))
        }
    }

    /// Prepare this command for execution by converting to an `async_process::Command`
    pub fn prepare(&self) -> AsyncCommand {
        let mut cmd = AsyncCommand::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_shell_line())
    }
}

/// Builder pattern helper
impl Command {
    /// Create a builder for this command (for chaining)
    pub fn builder<S: AsRef<OsStr>>(program: S) -> CommandBuilder {
        CommandBuilder(Command::new(program))
    }
}

/// Builder wrapper for more ergonomic command construction
pub struct CommandBuilder(Command);

impl CommandBuilder {
    /// Add an argument
    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.0.arg(arg);
        self
    }

    /// Add multiple arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.0.args(args);
        self
    }

    /// Build the command
    pub fn build(self) -> Command {
        self.0
    }
}

/// Escape a string for safe inclusion in a shell command
pub fn shell_escape(s: String) -> String {
    if s.is_empty() {
        return "''".to_string();
    }
    if s.contains(|c: char| c.is_whitespace() || "\"'\\$`!*?<>|&;()[]{}#~".contains(c)) {
        // Use single quotes and escape any single quotes in the string
        format!("'{}'", s.replace('\'', "'\"'\"'"))
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_creation() {
        let cmd = Command::new("echo");
        assert_eq!(cmd.get_program(), "echo");
        assert_eq!(cmd.get_args().len(), 0);
    }

    #[test]
    fn test_command_with_args() {
        let mut cmd = Command::new("ls");
        cmd.arg("-la").arg("/tmp");

        assert_eq!(cmd.get_args().len(), 2);
        assert_eq!(cmd.get_args()[0], "-la");
        assert_eq!(cmd.get_args()[1], "/tmp");
    }

    #[test]
    fn test_command_builder() {
        let cmd = Command::builder("systemctl")
            .arg("enable")
            .args(["nginx", "--now"])
            .build();

        assert_eq!(cmd.get_program(), "systemctl");
        assert_eq!(cmd.get_args(), &["enable", "nginx", "--now"]);
    }

    #[test]
    fn test_from_argv() {
        let cmd = Command::from_argv(["apt-get", "install", "-y", "curl"]).unwrap();
        assert_eq!(cmd.get_program(), "apt-get");
        assert_eq!(cmd.get_args().len(), 3);

        assert!(Command::from_argv(Vec::<String>::new()).is_none());
    }

    #[test]
    fn test_shell_escape() {
        assert_eq!(shell_escape("simple".to_string()), "simple");
        assert_eq!(shell_escape("with space".to_string()), "'with space'");
        assert_eq!(shell_escape("with'quote".to_string()), "'with'\"'\"'quote'");
        assert_eq!(shell_escape("$variable".to_string()), "'$variable'");
        assert_eq!(shell_escape("path/to/file".to_string()), "path/to/file");
        assert_eq!(shell_escape(String::new()), "''");
    }

    #[test]
    fn test_shell_line() {
        let cmd = Command::builder("sh")
            .arg("-c")
            .arg("echo hello; exit 3")
            .build();
        assert_eq!(cmd.to_shell_line(), "sh -c 'echo hello; exit 3'");
        assert_eq!(Command::new("reboot").to_string(), "reboot");
    }
}
