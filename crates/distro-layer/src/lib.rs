//! # Distro Layer
//!
//! Uniform package-manager and service operations across Linux distributions.
//!
//! A [`DistroLayer`] inspects a host once, working out its distro label and
//! which package manager it has, and builds a table of operation templates.
//! Callers then ask for semantic operations such as `install` or
//! `enable_service` and the layer resolves the host-specific command line,
//! substitutes the call's arguments and runs it locally or through any
//! [`Launcher`](command_executor::Launcher), for instance an SSH session.
//!
//! ```no_run
//! use distro_layer::{CallOptions, DistroLayer, LayerConfig};
//!
//! # async fn example() -> distro_layer::Result<()> {
//! let layer = DistroLayer::local(LayerConfig::default()).await?;
//!
//! // See what would run
//! let outcome = layer.install(CallOptions::with_args(["nginx"]).template_only()).await?;
//! println!("{}", outcome.resolved().unwrap_or_default());
//!
//! layer.install("nginx").await?;
//! layer.enable_service("nginx").await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod detector;
pub mod error;
pub mod host;
pub mod layer;
pub mod options;
pub mod profile;
pub mod registry;
pub mod template;

pub use config::{FailurePolicy, LayerConfig};
pub use detector::{Detection, Diagnostic, LauncherProbe, LocalProbe, Probe};
pub use error::{Error, Result};
pub use layer::{DistroLayer, ECHO_TARGET, ExecutionResult, Outcome};
pub use options::CallOptions;
pub use profile::{PackageManagerProfile, builtin_profiles};
pub use registry::{OperationTable, Overrides};
pub use template::{ResolvedCommand, Template};
