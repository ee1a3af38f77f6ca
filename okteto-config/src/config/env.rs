//! Recognized environment variables and a typed reader over [`Environment`].

use super::source::Sourced;
use super::validate::ConfigWarning;
use crate::environment::Environment;
use crate::errors::ConfigError;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Overrides the okteto folder. Must exist.
pub const OKTETO_FOLDER: &str = "OKTETO_FOLDER";
/// Overrides the user home directory. Must exist.
pub const OKTETO_HOME: &str = "OKTETO_HOME";
/// Overrides the per-action timeout.
pub const OKTETO_TIMEOUT: &str = "OKTETO_TIMEOUT";
/// Path-list of kubeconfig files; only the first entry is used.
pub const KUBECONFIG: &str = "KUBECONFIG";

pub const HOME: &str = "HOME";
pub const USERPROFILE: &str = "USERPROFILE";
pub const HOMEDRIVE: &str = "HOMEDRIVE";
pub const HOMEPATH: &str = "HOMEPATH";

/// Home candidates on Windows, in lookup order.
pub const WINDOWS_HOME_VARS: [&str; 4] = [HOME, USERPROFILE, HOMEDRIVE, HOMEPATH];

/// Typed reader that records non-fatal problems as [`ConfigWarning`]s.
pub struct EnvReader<'a, E: Environment + ?Sized> {
    env: &'a E,
    warnings: Vec<ConfigWarning>,
}

impl<'a, E: Environment + ?Sized> EnvReader<'a, E> {
    pub fn new(env: &'a E) -> Self {
        Self {
            env,
            warnings: Vec::new(),
        }
    }

    /// Get all accumulated warnings.
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    /// Take ownership of warnings.
    pub fn take_warnings(&mut self) -> Vec<ConfigWarning> {
        std::mem::take(&mut self.warnings)
    }

    /// Raw value, `None` when unset.
    pub fn get(&self, name: &str) -> Option<String> {
        self.env.var(name)
    }

    /// Value when set and non-empty.
    pub fn get_non_empty(&self, name: &str) -> Option<String> {
        self.env.var(name).filter(|v| !v.is_empty())
    }

    /// Path override that must already exist.
    ///
    /// Unset yields `Ok(None)`. A set value (even an empty one) that does not
    /// exist is an error.
    pub fn get_existing_path(
        &self,
        name: &'static str,
    ) -> Result<Option<Sourced<PathBuf>>, ConfigError> {
        let Some(value) = self.env.var(name) else {
            return Ok(None);
        };
        let path = PathBuf::from(value);
        if !self.env.path_exists(&path) {
            return Err(ConfigError::OverridePathMissing { var: name, path });
        }
        debug!(var = name, path = %path.display(), "using path override");
        Ok(Some(Sourced::from_env(path, name)))
    }

    /// Duration override such as `90s`, `2m`, `1.5m` or `1h 30m`.
    ///
    /// An unparsable value, or one with surrounding whitespace, is ignored: a
    /// warning is logged and recorded and `default` is returned.
    pub fn get_duration(&mut self, name: &str, default: Duration) -> Sourced<Duration> {
        let Some(value) = self.env.var(name) else {
            return Sourced::default_value(default);
        };
        let parsed = if value.trim() == value {
            humantime::parse_duration(&value).map_err(|e| e.to_string())
        } else {
            Err("surrounding whitespace".to_string())
        };
        match parsed {
            Ok(parsed) => {
                info!(
                    "{} applied: '{}'",
                    name,
                    humantime::format_duration(parsed)
                );
                Sourced::from_env(parsed, name)
            }
            Err(e) => {
                warn!("{} '{}' is not a valid duration, ignoring: {}", name, value, e);
                self.warnings.push(ConfigWarning::warning(
                    name,
                    value,
                    format!("not a valid duration ({e}), using default"),
                ));
                Sourced::default_value(default)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigSource;
    use crate::testing::MemoryEnvironment;

    #[test]
    fn test_get_non_empty_filters_empty() {
        let env = MemoryEnvironment::unix().with_var("KUBECONFIG", "");
        let reader = EnvReader::new(&env);
        assert_eq!(reader.get("KUBECONFIG").as_deref(), Some(""));
        assert!(reader.get_non_empty("KUBECONFIG").is_none());
        assert!(reader.get_non_empty("UNSET").is_none());
    }

    #[test]
    fn test_get_existing_path_unset() {
        let env = MemoryEnvironment::unix();
        let reader = EnvReader::new(&env);
        assert!(reader.get_existing_path(OKTETO_HOME).unwrap().is_none());
    }

    #[test]
    fn test_get_existing_path_present() {
        let env = MemoryEnvironment::unix()
            .with_dir("/srv/home")
            .with_var(OKTETO_HOME, "/srv/home");
        let reader = EnvReader::new(&env);
        let sourced = reader.get_existing_path(OKTETO_HOME).unwrap().unwrap();
        assert_eq!(sourced.value, PathBuf::from("/srv/home"));
        assert_eq!(sourced.source, ConfigSource::Environment);
        assert_eq!(sourced.env_var.as_deref(), Some(OKTETO_HOME));
    }

    #[test]
    fn test_get_existing_path_missing() {
        let env = MemoryEnvironment::unix().with_var(OKTETO_HOME, "/nope");
        let reader = EnvReader::new(&env);
        let err = reader.get_existing_path(OKTETO_HOME).unwrap_err();
        match err {
            ConfigError::OverridePathMissing { var, path } => {
                assert_eq!(var, OKTETO_HOME);
                assert_eq!(path, PathBuf::from("/nope"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_get_existing_path_empty_value_is_missing() {
        let env = MemoryEnvironment::unix().with_var(OKTETO_FOLDER, "");
        let reader = EnvReader::new(&env);
        assert!(reader.get_existing_path(OKTETO_FOLDER).is_err());
    }

    #[test]
    fn test_get_duration_valid_values() {
        for (raw, secs) in [
            ("2m", 120),
            ("90s", 90),
            ("1.5m", 90),
            ("1h 30m", 5400),
            ("1h30m", 5400),
        ] {
            let env = MemoryEnvironment::unix().with_var(OKTETO_TIMEOUT, raw);
            let mut reader = EnvReader::new(&env);
            let d = reader.get_duration(OKTETO_TIMEOUT, Duration::from_secs(30));
            assert_eq!(d.value, Duration::from_secs(secs), "parsing '{}'", raw);
            assert_eq!(d.source, ConfigSource::Environment);
            assert!(reader.warnings().is_empty());
        }
    }

    #[test]
    fn test_get_duration_invalid_uses_default() {
        let env = MemoryEnvironment::unix().with_var(OKTETO_TIMEOUT, "notaduration");
        let mut reader = EnvReader::new(&env);
        let d = reader.get_duration(OKTETO_TIMEOUT, Duration::from_secs(30));
        assert_eq!(d.value, Duration::from_secs(30));
        assert_eq!(d.source, ConfigSource::Default);

        let warnings = reader.take_warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].var, OKTETO_TIMEOUT);
        assert_eq!(warnings[0].value, "notaduration");
        assert!(reader.warnings().is_empty());
    }

    #[test]
    fn test_get_duration_surrounding_whitespace_uses_default() {
        for raw in [" 5s", "5s ", "\t2m"] {
            let env = MemoryEnvironment::unix().with_var(OKTETO_TIMEOUT, raw);
            let mut reader = EnvReader::new(&env);
            let d = reader.get_duration(OKTETO_TIMEOUT, Duration::from_secs(30));
            assert_eq!(d.value, Duration::from_secs(30), "parsing '{}'", raw);
            assert_eq!(d.source, ConfigSource::Default);
            assert_eq!(reader.warnings()[0].value, raw);
        }
    }

    #[test]
    fn test_get_duration_unset_is_default() {
        let env = MemoryEnvironment::unix();
        let mut reader = EnvReader::new(&env);
        let d = reader.get_duration(OKTETO_TIMEOUT, Duration::from_secs(30));
        assert_eq!(d, Sourced::default_value(Duration::from_secs(30)));
    }
}
