//! Error Catalog for the Okteto config resolver
//!
//! Each resolution failure has a stable code (OKT-E001 ...), a message and
//! remediation steps, so the CLI can print something actionable before it
//! exits.
//!
//! # Error Code Ranges
//!
//! | Range      | Category    | Description                            |
//! |------------|-------------|----------------------------------------|
//! | E001-E099  | Config      | Overrides and home-directory discovery |
//! | E100-E199  | Filesystem  | Directory materialization              |

use serde::Serialize;
use std::fmt;

/// Error code enumeration covering all resolution failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorCode {
    // =========================================================================
    // Config Errors (E001-E099)
    // =========================================================================
    /// An override variable points at a path that does not exist
    OverridePathMissing,
    /// None of the home-directory variables are usable
    NoHomeDirectoryFound,
    /// A namespace or deployment name would escape the okteto folder
    InvalidPathSegment,

    // =========================================================================
    // Filesystem Errors (E100-E199)
    // =========================================================================
    /// A directory could not be created
    DirectoryCreateFailed,
}

impl ErrorCode {
    /// Every code, in numeric order.
    pub fn all() -> &'static [ErrorCode] {
        &[
            Self::OverridePathMissing,
            Self::NoHomeDirectoryFound,
            Self::InvalidPathSegment,
            Self::DirectoryCreateFailed,
        ]
    }

    /// Numeric part of the code.
    #[must_use]
    pub const fn code_number(&self) -> u16 {
        match self {
            Self::OverridePathMissing => 1,
            Self::NoHomeDirectoryFound => 2,
            Self::InvalidPathSegment => 3,
            Self::DirectoryCreateFailed => 100,
        }
    }

    /// Formatted code, e.g. `OKT-E001`.
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("OKT-E{:03}", self.code_number())
    }

    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self.code_number() {
            1..=99 => ErrorCategory::Config,
            _ => ErrorCategory::Filesystem,
        }
    }

    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::OverridePathMissing => "Override variable points to a non-existing path",
            Self::NoHomeDirectoryFound => "Could not determine the home directory",
            Self::InvalidPathSegment => "Name cannot be used as a directory name",
            Self::DirectoryCreateFailed => "Failed to create directory",
        }
    }

    #[must_use]
    pub const fn remediation(&self) -> &'static [&'static str] {
        match self {
            Self::OverridePathMissing => &[
                "Create the directory the variable points to",
                "Or unset the variable to use the default location",
            ],
            Self::NoHomeDirectoryFound => &[
                "Set HOME or USERPROFILE to your home directory",
                "Or set OKTETO_HOME to an existing directory",
            ],
            Self::InvalidPathSegment => &[
                "Use a non-empty name without '/' or '\\' that is not '.' or '..'",
            ],
            Self::DirectoryCreateFailed => &[
                "Check the permissions of the parent directory",
                "Check that the disk is not full",
                "Set OKTETO_FOLDER to a writable, existing directory",
            ],
        }
    }

    /// Full entry with all metadata.
    #[must_use]
    pub fn entry(&self) -> ErrorEntry {
        ErrorEntry {
            code: self.code_string(),
            category: self.category(),
            message: self.message().to_string(),
            remediation: self
                .remediation()
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code_string(), self.message())
    }
}

/// Error category for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// Overrides and home-directory discovery (E001-E099)
    Config,
    /// Directory materialization (E100-E199)
    Filesystem,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config => write!(f, "Configuration"),
            Self::Filesystem => write!(f, "Filesystem"),
        }
    }
}

/// Complete error entry with all metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEntry {
    /// Error code string (e.g., "OKT-E001")
    pub code: String,
    pub category: ErrorCategory,
    pub message: String,
    /// Steps to remediate the error
    pub remediation: Vec<String>,
}

impl ErrorEntry {
    /// Remediation steps as a numbered list, one per line.
    #[must_use]
    pub fn format_remediation(&self) -> String {
        let mut output = String::new();
        for (i, step) in self.remediation.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, step));
        }
        output
    }
}

impl fmt::Display for ErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}
