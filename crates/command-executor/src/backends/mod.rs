//! Backend implementations for different execution contexts
//!
//! This module provides built-in launchers for common execution contexts.
//! Users can also bring their own remote session by implementing the
//! [`Launcher`](crate::launcher::Launcher) trait.
//!
//! # Example: Custom Session
//!
//! ```ignore
//! use command_executor::{Command, ExitResult, Launcher, OutputMode, Result};
//! use async_trait::async_trait;
//!
//! struct MySession {
//!     // an already connected, authenticated session
//! }
//!
//! #[async_trait]
//! impl Launcher for MySession {
//!     async fn execute(&self, command: Command, output: OutputMode) -> Result<ExitResult> {
//!         // Run `command.to_shell_line()` on the session
//!     }
//! }
//! ```

pub mod local;
pub use local::LocalLauncher;

#[cfg(feature = "ssh")]
pub mod ssh;
#[cfg(feature = "ssh")]
pub use ssh::{SshConfig, SshLauncher};
