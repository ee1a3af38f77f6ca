//! Resolution E2E Tests
//!
//! Drives `ConfigResolver` against a real temporary filesystem (through a
//! thin wrapper over `SystemEnvironment` with injected variables) and against
//! the in-memory environment for platform-specific cases.

use okteto_config::config::env::{
    HOME, HOMEDRIVE, HOMEPATH, KUBECONFIG, OKTETO_FOLDER, OKTETO_HOME, OKTETO_TIMEOUT,
    USERPROFILE,
};
use okteto_config::testing::{MemoryEnvironment, init_test_logging};
use okteto_config::{
    ConfigError, ConfigResolver, ConfigSource, Environment, Platform, SystemEnvironment,
};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;

#[ctor::ctor]
fn setup() {
    init_test_logging();
}

/// Real filesystem, injected variables.
struct TempFsEnvironment {
    vars: HashMap<String, String>,
    timeout_reads: AtomicUsize,
}

impl TempFsEnvironment {
    fn new(vars: &[(&str, &str)]) -> Self {
        Self {
            vars: vars
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            timeout_reads: AtomicUsize::new(0),
        }
    }
}

impl Environment for TempFsEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        if name == OKTETO_TIMEOUT {
            self.timeout_reads.fetch_add(1, Ordering::SeqCst);
        }
        self.vars.get(name).cloned()
    }

    fn path_exists(&self, path: &Path) -> bool {
        SystemEnvironment.path_exists(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        SystemEnvironment.create_dir_all(path)
    }

    fn platform(&self) -> Platform {
        Platform::Unix
    }
}

fn home_str(tmp: &TempDir) -> String {
    tmp.path().to_string_lossy().to_string()
}

// ===========================================================================
// Directory materialization
// ===========================================================================

#[test]
fn e2e_layout_is_created_under_home() {
    let tmp = TempDir::new().unwrap();
    let home = home_str(&tmp);
    let resolver = ConfigResolver::new(TempFsEnvironment::new(&[(HOME, home.as_str())]));

    let okteto = resolver.okteto_home().unwrap();
    let namespace = resolver.namespace_home("cindy").unwrap();
    let deployment = resolver.deployment_home("cindy", "movies").unwrap();

    assert_eq!(okteto, tmp.path().join(".okteto"));
    assert_eq!(namespace, tmp.path().join(".okteto").join("cindy"));
    assert_eq!(
        deployment,
        tmp.path().join(".okteto").join("cindy").join("movies")
    );
    assert!(okteto.is_dir());
    assert!(namespace.is_dir());
    assert!(deployment.is_dir());
}

#[cfg(unix)]
#[test]
fn e2e_created_directories_are_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    let home = home_str(&tmp);
    let resolver = ConfigResolver::new(TempFsEnvironment::new(&[(HOME, home.as_str())]));

    for dir in [
        resolver.okteto_home().unwrap(),
        resolver.deployment_home("ns", "app").unwrap(),
    ] {
        let mode = std::fs::metadata(&dir).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0, "{} has mode {:o}", dir.display(), mode);
    }
}

#[test]
fn e2e_existing_content_survives_resolution() {
    let tmp = TempDir::new().unwrap();
    let home = home_str(&tmp);
    let resolver = ConfigResolver::new(TempFsEnvironment::new(&[(HOME, home.as_str())]));

    let ns = resolver.namespace_home("team").unwrap();
    let marker = ns.join("state.yml");
    std::fs::write(&marker, "kept").unwrap();

    assert_eq!(resolver.namespace_home("team").unwrap(), ns);
    assert_eq!(std::fs::read_to_string(&marker).unwrap(), "kept");
}

#[test]
fn e2e_folder_override_used_verbatim() {
    let home = TempDir::new().unwrap();
    let folder = TempDir::new().unwrap();
    let folder_str = folder.path().to_string_lossy().to_string();
    let resolver = ConfigResolver::new(TempFsEnvironment::new(&[
        (HOME, home_str(&home).as_str()),
        (OKTETO_FOLDER, folder_str.as_str()),
    ]));

    let dir = resolver.okteto_home_sourced().unwrap();
    assert_eq!(dir.value, PathBuf::from(&folder_str));
    assert_eq!(dir.source, ConfigSource::Environment);
    assert!(!home.path().join(".okteto").exists());
}

#[test]
fn e2e_missing_folder_override_creates_nothing() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope");
    let resolver = ConfigResolver::new(TempFsEnvironment::new(&[
        (HOME, home_str(&tmp).as_str()),
        (OKTETO_FOLDER, &*missing.to_string_lossy()),
    ]));

    let err = resolver.okteto_home().unwrap_err();
    assert!(err.to_string().contains("OKTETO_FOLDER"));
    assert!(err.to_string().contains(&*missing.to_string_lossy()));
    assert!(!missing.exists());
    assert!(!tmp.path().join(".okteto").exists());
}

#[test]
fn e2e_home_override_must_exist() {
    let tmp = TempDir::new().unwrap();
    let resolver = ConfigResolver::new(TempFsEnvironment::new(&[(
        OKTETO_HOME,
        &*tmp.path().join("gone").to_string_lossy(),
    )]));
    assert!(matches!(
        resolver.home_dir(),
        Err(ConfigError::OverridePathMissing { var: OKTETO_HOME, .. })
    ));
}

#[test]
fn e2e_create_failure_reports_path() {
    let tmp = TempDir::new().unwrap();
    // HOME is a regular file, so HOME/.okteto cannot be created.
    let file_home = tmp.path().join("not-a-dir");
    std::fs::write(&file_home, "x").unwrap();
    let resolver = ConfigResolver::new(TempFsEnvironment::new(&[(
        HOME,
        &*file_home.to_string_lossy(),
    )]));

    match resolver.okteto_home().unwrap_err() {
        ConfigError::DirectoryCreateFailed { path, .. } => {
            assert_eq!(path, file_home.join(".okteto"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

// ===========================================================================
// Kubeconfig
// ===========================================================================

#[test]
fn e2e_kubeconfig_first_entry_on_unix() {
    let resolver = ConfigResolver::new(TempFsEnvironment::new(&[
        (HOME, "/home/dev"),
        (KUBECONFIG, "/a/config:/b/config"),
    ]));
    assert_eq!(
        resolver.kubeconfig_path().unwrap(),
        PathBuf::from("/a/config")
    );
}

#[test]
fn e2e_kubeconfig_default_under_home() {
    let resolver = ConfigResolver::new(TempFsEnvironment::new(&[(HOME, "/home/dev")]));
    assert_eq!(
        resolver.kubeconfig_path().unwrap(),
        PathBuf::from("/home/dev").join(".kube").join("config")
    );
}

// ===========================================================================
// Windows-style home resolution
// ===========================================================================

#[test]
fn e2e_windows_drive_and_path() {
    let env = MemoryEnvironment::windows()
        .with_var(HOMEDRIVE, "C:")
        .with_var(HOMEPATH, r"\Users\x");
    let home = ConfigResolver::new(env).home_dir().unwrap();
    assert_eq!(home, PathBuf::from(r"C:\Users\x"));
}

#[test]
fn e2e_windows_without_candidates_fails() {
    let err = ConfigResolver::new(MemoryEnvironment::windows())
        .home_dir()
        .unwrap_err();
    let msg = err.to_string();
    for var in [HOME, USERPROFILE, HOMEDRIVE, HOMEPATH] {
        assert!(msg.contains(var), "message should name {var}: {msg}");
    }
}

// ===========================================================================
// Timeout
// ===========================================================================

#[test]
fn e2e_timeout_shared_across_threads() {
    let env = Arc::new(TempFsEnvironment::new(&[]));
    let resolver = Arc::new(ConfigResolver::new(Arc::clone(&env)));

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let resolver = Arc::clone(&resolver);
            std::thread::spawn(move || resolver.timeout())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Duration::from_secs(30));
    }
    assert_eq!(env.timeout_reads.load(Ordering::SeqCst), 1);
}

#[test]
fn e2e_timeout_overrides() {
    let parsed = ConfigResolver::new(TempFsEnvironment::new(&[(OKTETO_TIMEOUT, "2m")]));
    assert_eq!(parsed.timeout(), Duration::from_secs(120));

    let invalid = ConfigResolver::new(TempFsEnvironment::new(&[(OKTETO_TIMEOUT, "notaduration")]));
    assert_eq!(invalid.timeout(), Duration::from_secs(30));
    let warning = invalid.timeout_setting().warning.as_ref().unwrap();
    assert_eq!(warning.var, OKTETO_TIMEOUT);
}
