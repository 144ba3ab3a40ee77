//! Runtime-agnostic command execution library
//!
//! This crate provides a unified interface for running one-shot commands across
//! different contexts: local processes and remote SSH hosts. Every context is a
//! [`Launcher`], so callers can hand in their own remote session type as long as
//! it can run a command and report its exit status and output.

#![warn(missing_docs)]

pub mod backends;
pub mod command;
pub mod error;
pub mod executor;
pub mod launcher;
pub mod process;

pub use command::Command;
pub use error::{Error, Result};
pub use executor::Executor;
pub use launcher::{Launcher, OutputMode};
pub use process::{ExitResult, ExitStatus};
