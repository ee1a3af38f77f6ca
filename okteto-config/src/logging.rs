//! Logging setup shared by every binary.
//!
//! ```ignore
//! let config = LogConfig::from_env("info").with_stderr();
//! let _guards = init_logging(&config)?;
//! ```
//!
//! # Environment Variables
//!
//! - `OKTETO_LOG_LEVEL`: `trace`, `debug`, `info`, `warn`, `error` or `off`
//! - `OKTETO_LOG_FORMAT`: `pretty` (default) or `json`
//! - `OKTETO_LOG_FILE`: also append JSON logs to this file

use crate::environment::{Environment, SystemEnvironment};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer, Registry};

pub const OKTETO_LOG_LEVEL: &str = "OKTETO_LOG_LEVEL";
pub const OKTETO_LOG_FORMAT: &str = "OKTETO_LOG_FORMAT";
pub const OKTETO_LOG_FILE: &str = "OKTETO_LOG_FILE";

const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },

    #[error("failed to open log file {}: {message}", path.display())]
    File { path: PathBuf, message: String },

    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
    /// Console output goes to stderr instead of stdout.
    pub stderr: bool,
    pub file: Option<PathBuf>,
}

impl LogConfig {
    pub fn new(level: &str) -> Self {
        Self {
            level: level.to_string(),
            format: LogFormat::Pretty,
            stderr: false,
            file: None,
        }
    }

    /// Read the `OKTETO_LOG_*` variables from the process environment.
    pub fn from_env(default_level: &str) -> Self {
        Self::from_environment(&SystemEnvironment, default_level)
    }

    /// Read the `OKTETO_LOG_*` variables from `env`.
    ///
    /// Unknown levels and formats fall back to the defaults.
    pub fn from_environment<E: Environment + ?Sized>(env: &E, default_level: &str) -> Self {
        let level = env
            .var(OKTETO_LOG_LEVEL)
            .map(|v| v.to_lowercase())
            .filter(|v| LEVELS.contains(&v.as_str()))
            .unwrap_or_else(|| default_level.to_string());

        let format = match env.var(OKTETO_LOG_FORMAT).as_deref() {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        let file = env
            .var(OKTETO_LOG_FILE)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Self {
            level,
            format,
            stderr: false,
            file,
        }
    }

    pub fn with_level(mut self, level: &str) -> Self {
        self.level = level.to_string();
        self
    }

    pub fn with_stderr(mut self) -> Self {
        self.stderr = true;
        self
    }

    pub fn with_json(mut self) -> Self {
        self.format = LogFormat::Json;
        self
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Filter directive applied to this workspace's crates.
    pub fn filter_directive(&self) -> String {
        format!("okteto_config={0},okteto_paths={0}", self.level)
    }

    fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        let directive = self.filter_directive();
        EnvFilter::try_new(&directive).map_err(|e| LoggingError::InvalidFilter {
            filter: directive,
            message: e.to_string(),
        })
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new("info")
    }
}

/// Keeps background log writers alive. Drop it at the end of `main`.
#[must_use = "dropping the guards stops file logging"]
#[derive(Debug, Default)]
pub struct LoggingGuards {
    _file: Option<WorkerGuard>,
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber described by `config`.
pub fn init_logging(config: &LogConfig) -> Result<LoggingGuards, LoggingError> {
    let filter = config.env_filter()?;
    let mut layers: Vec<BoxedLayer> = vec![console_layer(config)];
    let mut guards = LoggingGuards::default();

    if let Some(path) = &config.file {
        let (writer, guard) = tracing_appender::non_blocking(file_appender(path)?);
        layers.push(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .boxed(),
        );
        guards._file = Some(guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()?;
    Ok(guards)
}

fn console_layer(config: &LogConfig) -> BoxedLayer {
    match (config.format, config.stderr) {
        (LogFormat::Json, true) => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
        (LogFormat::Json, false) => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stdout)
            .boxed(),
        (LogFormat::Pretty, true) => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed(),
        (LogFormat::Pretty, false) => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stdout)
            .boxed(),
    }
}

fn file_appender(path: &Path) -> Result<RollingFileAppender, LoggingError> {
    let file_error = |message: String| LoggingError::File {
        path: path.to_path_buf(),
        message,
    };
    let name = path
        .file_name()
        .ok_or_else(|| file_error("path has no file name".to_string()))?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name.to_string_lossy())
        .build(dir)
        .map_err(|e| file_error(e.to_string()))
}
