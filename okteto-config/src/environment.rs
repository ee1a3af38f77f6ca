//! Access to the process environment and the filesystem.
//!
//! Every lookup the resolver performs goes through [`Environment`], so tests can
//! drive resolution with [`crate::testing::MemoryEnvironment`] instead of
//! mutating real process variables.

use serde::Serialize;
use std::fmt;
use std::io;
use std::path::Path;
use std::sync::Arc;

/// Platform family that decides the home fallback chain and the
/// kubeconfig path-list separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// `HOME`, `USERPROFILE`, `HOMEDRIVE`+`HOMEPATH`; lists separated by `;`.
    Windows,
    /// `HOME` only; lists separated by `:`.
    Unix,
}

impl Platform {
    /// Platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    /// Separator used by path-list variables such as `KUBECONFIG`.
    pub fn path_list_separator(self) -> char {
        match self {
            Platform::Windows => ';',
            Platform::Unix => ':',
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => write!(f, "windows"),
            Platform::Unix => write!(f, "unix"),
        }
    }
}

/// Environment variables plus the handful of filesystem operations the
/// resolver needs.
pub trait Environment: Send + Sync {
    /// Value of `name`, or `None` when unset. Set-but-empty is `Some("")`.
    fn var(&self, name: &str) -> Option<String>;

    /// Whether anything exists at `path`.
    fn path_exists(&self, path: &Path) -> bool;

    /// Create `path` and all missing parents with owner-only permissions.
    ///
    /// Must succeed when the directory already exists.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Platform whose conventions apply.
    fn platform(&self) -> Platform {
        Platform::current()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }

    fn path_exists(&self, path: &Path) -> bool {
        (**self).path_exists(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        (**self).create_dir_all(path)
    }

    fn platform(&self) -> Platform {
        (**self).platform()
    }
}

impl<E: Environment + ?Sized> Environment for Arc<E> {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }

    fn path_exists(&self, path: &Path) -> bool {
        (**self).path_exists(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        (**self).create_dir_all(path)
    }

    fn platform(&self) -> Platform {
        (**self).platform()
    }
}

/// The real process environment and local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        // Non-UTF-8 values are treated like the lossy string the shell would show.
        std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut builder = std::fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o700);
        }
        builder.create(path)
    }
}
