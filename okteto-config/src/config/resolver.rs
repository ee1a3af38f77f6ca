//! Home, okteto folder, kubeconfig and timeout resolution.
//!
//! Precedence for every value is: explicit override variable, then platform
//! convention, then built-in default. Directory-valued results are created
//! (owner-only) before they are returned.

use super::env::{
    EnvReader, HOME, HOMEDRIVE, HOMEPATH, KUBECONFIG, OKTETO_FOLDER, OKTETO_HOME, USERPROFILE,
    WINDOWS_HOME_VARS,
};
use super::kubeconfig::{default_kubeconfig_path, first_kubeconfig_entry};
use super::source::Sourced;
use super::timeout::{TimeoutSetting, compute_timeout};
use crate::environment::{Environment, Platform, SystemEnvironment};
use crate::errors::{ConfigError, SegmentKind};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, warn};

/// Name of the okteto folder inside the home directory.
pub const OKTETO_FOLDER_NAME: &str = ".okteto";

/// Every resolved value with its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    pub platform: Platform,
    pub home: Sourced<PathBuf>,
    pub okteto_home: Sourced<PathBuf>,
    pub kubeconfig: Sourced<PathBuf>,
    pub timeout: TimeoutSetting,
}

/// Resolves paths and the timeout against an [`Environment`].
///
/// Paths are recomputed on every call. The timeout is computed on first
/// access and cached for the lifetime of the resolver.
#[derive(Debug)]
pub struct ConfigResolver<E: Environment = SystemEnvironment> {
    env: E,
    timeout: OnceLock<TimeoutSetting>,
}

impl ConfigResolver<SystemEnvironment> {
    /// Resolver over the real process environment.
    pub fn system() -> Self {
        Self::new(SystemEnvironment)
    }
}

impl Default for ConfigResolver<SystemEnvironment> {
    fn default() -> Self {
        Self::system()
    }
}

impl<E: Environment> ConfigResolver<E> {
    pub fn new(env: E) -> Self {
        Self {
            env,
            timeout: OnceLock::new(),
        }
    }

    pub fn environment(&self) -> &E {
        &self.env
    }

    /// The user home directory.
    pub fn home_dir(&self) -> Result<PathBuf, ConfigError> {
        self.home_dir_sourced().map(Sourced::into_value)
    }

    pub fn home_dir_sourced(&self) -> Result<Sourced<PathBuf>, ConfigError> {
        let reader = EnvReader::new(&self.env);
        if let Some(home) = reader.get_existing_path(OKTETO_HOME)? {
            return Ok(home);
        }

        match self.env.platform() {
            Platform::Windows => self.windows_home_dir(&reader),
            Platform::Unix => {
                // HOME is taken verbatim; an unset HOME resolves to an empty path.
                let home = reader.get(HOME).unwrap_or_default();
                if home.is_empty() {
                    warn!(
                        "{} is not set, paths will be relative to the working directory",
                        HOME
                    );
                }
                Ok(Sourced::from_platform(PathBuf::from(home), HOME))
            }
        }
    }

    fn windows_home_dir(
        &self,
        reader: &EnvReader<'_, E>,
    ) -> Result<Sourced<PathBuf>, ConfigError> {
        for var in [HOME, USERPROFILE] {
            if let Some(home) = reader.get_non_empty(var) {
                debug!(var, home = %home, "resolved windows home directory");
                return Ok(Sourced::from_platform(PathBuf::from(home), var));
            }
        }

        match (reader.get_non_empty(HOMEDRIVE), reader.get_non_empty(HOMEPATH)) {
            (Some(drive), Some(path)) => {
                let home = format!("{drive}{path}");
                debug!(home = %home, "resolved windows home directory from drive and path");
                Ok(Sourced::from_platform(
                    PathBuf::from(home),
                    format!("{HOMEDRIVE}+{HOMEPATH}"),
                ))
            }
            _ => Err(ConfigError::NoHomeDirectoryFound {
                vars: WINDOWS_HOME_VARS.to_vec(),
            }),
        }
    }

    /// The okteto folder, created if absent.
    pub fn okteto_home(&self) -> Result<PathBuf, ConfigError> {
        self.okteto_home_sourced().map(Sourced::into_value)
    }

    pub fn okteto_home_sourced(&self) -> Result<Sourced<PathBuf>, ConfigError> {
        let reader = EnvReader::new(&self.env);
        let dir = match reader.get_existing_path(OKTETO_FOLDER)? {
            Some(folder) => folder,
            None => self
                .home_dir_sourced()?
                .map(|home| home.join(OKTETO_FOLDER_NAME)),
        };
        self.ensure_dir(&dir.value)?;
        Ok(dir)
    }

    /// `<okteto home>/<namespace>`, created if absent.
    pub fn namespace_home(&self, namespace: &str) -> Result<PathBuf, ConfigError> {
        check_segment(SegmentKind::Namespace, namespace)?;
        let dir = self.okteto_home()?.join(namespace);
        self.ensure_dir(&dir)?;
        Ok(dir)
    }

    /// `<okteto home>/<namespace>/<name>`, created if absent.
    pub fn deployment_home(&self, namespace: &str, name: &str) -> Result<PathBuf, ConfigError> {
        check_segment(SegmentKind::Namespace, namespace)?;
        check_segment(SegmentKind::Deployment, name)?;
        let dir = self.okteto_home()?.join(namespace).join(name);
        self.ensure_dir(&dir)?;
        Ok(dir)
    }

    /// Kubeconfig file location. Not checked for existence.
    pub fn kubeconfig_path(&self) -> Result<PathBuf, ConfigError> {
        self.kubeconfig_path_sourced().map(Sourced::into_value)
    }

    pub fn kubeconfig_path_sourced(&self) -> Result<Sourced<PathBuf>, ConfigError> {
        let reader = EnvReader::new(&self.env);
        let default = default_kubeconfig_path(&self.home_dir()?);
        match reader.get_non_empty(KUBECONFIG) {
            Some(value) => {
                let first = first_kubeconfig_entry(&value, self.env.platform());
                debug!(kubeconfig = first, "using {}", KUBECONFIG);
                Ok(Sourced::from_env(PathBuf::from(first), KUBECONFIG))
            }
            None => Ok(Sourced::default_value(default)),
        }
    }

    /// Per-action timeout, computed once.
    pub fn timeout(&self) -> Duration {
        self.timeout_setting().value()
    }

    /// Cached timeout together with any warning raised computing it.
    pub fn timeout_setting(&self) -> &TimeoutSetting {
        self.timeout.get_or_init(|| compute_timeout(&self.env))
    }

    /// Resolve everything at once. Materializes the okteto folder.
    pub fn snapshot(&self) -> Result<ResolvedConfig, ConfigError> {
        Ok(ResolvedConfig {
            platform: self.env.platform(),
            home: self.home_dir_sourced()?,
            okteto_home: self.okteto_home_sourced()?,
            kubeconfig: self.kubeconfig_path_sourced()?,
            timeout: self.timeout_setting().clone(),
        })
    }

    fn ensure_dir(&self, dir: &Path) -> Result<(), ConfigError> {
        self.env
            .create_dir_all(dir)
            .map_err(|source| ConfigError::DirectoryCreateFailed {
                path: dir.to_path_buf(),
                source,
            })
    }
}

/// Accept only names that add exactly one level below their parent folder.
fn check_segment(kind: SegmentKind, value: &str) -> Result<(), ConfigError> {
    let mut components = Path::new(value).components();
    let plain = !value.contains(['/', '\\'])
        && matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
    if plain {
        Ok(())
    } else {
        Err(ConfigError::InvalidPathSegment {
            kind,
            value: value.to_string(),
        })
    }
}
