//! Resolution errors and their catalog entries.
//!
//! The library never exits the process. Every failure is returned as a
//! [`ConfigError`]; the CLI entry point decides to terminate.

pub mod catalog;

pub use catalog::{ErrorCategory, ErrorCode, ErrorEntry};

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Which caller-supplied name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Namespace,
    Deployment,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Namespace => write!(f, "namespace"),
            Self::Deployment => write!(f, "deployment"),
        }
    }
}

/// Errors returned while resolving paths.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `OKTETO_HOME` or `OKTETO_FOLDER` is set to a path that does not exist.
    #[error("{var} points to a non-existing path: {}", path.display())]
    OverridePathMissing { var: &'static str, path: PathBuf },

    /// Windows only: every home-directory candidate is empty.
    #[error(
        "couldn't determine your home directory: {} are empty. Use $OKTETO_HOME to set your home directory",
        vars.join(", ")
    )]
    NoHomeDirectoryFound { vars: Vec<&'static str> },

    /// Directory materialization failed for a reason other than pre-existence.
    #[error("failed to create {}: {source}", path.display())]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A namespace or deployment name would escape the okteto folder.
    #[error("invalid {kind} name '{value}': must be a single, non-empty path component")]
    InvalidPathSegment { kind: SegmentKind, value: String },
}

impl ConfigError {
    /// Catalog code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::OverridePathMissing { .. } => ErrorCode::OverridePathMissing,
            Self::NoHomeDirectoryFound { .. } => ErrorCode::NoHomeDirectoryFound,
            Self::DirectoryCreateFailed { .. } => ErrorCode::DirectoryCreateFailed,
            Self::InvalidPathSegment { .. } => ErrorCode::InvalidPathSegment,
        }
    }

    /// The environment variable involved, when there is exactly one.
    pub fn env_var(&self) -> Option<&'static str> {
        match self {
            Self::OverridePathMissing { var, .. } => Some(*var),
            _ => None,
        }
    }
}
