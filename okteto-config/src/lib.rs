//! Path and timeout resolution for the Okteto CLI.
//!
//! Resolves the user home directory, the okteto folder (`~/.okteto`),
//! per-namespace and per-deployment folders, the kubeconfig location and the
//! per-action timeout. Overrides come from `OKTETO_*` variables and
//! `KUBECONFIG`; directories are created with owner-only permissions.
//!
//! Failures are returned as [`ConfigError`]. Deciding to exit is left to the
//! binary.

pub mod config;
pub mod environment;
pub mod errors;
pub mod logging;
pub mod testing;

pub use config::{
    ConfigResolver, ConfigSource, ConfigWarning, DEFAULT_TIMEOUT, ResolvedConfig, Sourced,
    TimeoutSetting, global, timeout,
};
pub use environment::{Environment, Platform, SystemEnvironment};
pub use errors::{ConfigError, ErrorCode, ErrorEntry};
pub use logging::{LogConfig, LoggingGuards, init_logging};

/// Version of this crate, reported by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
