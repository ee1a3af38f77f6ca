//! Test helpers: an in-memory [`Environment`] and test logging.
//!
//! ```ignore
//! use okteto_config::testing::MemoryEnvironment;
//! use okteto_config::ConfigResolver;
//!
//! let env = MemoryEnvironment::unix().with_var("HOME", "/home/dev");
//! let resolver = ConfigResolver::new(env);
//! assert_eq!(resolver.okteto_home()?, PathBuf::from("/home/dev/.okteto"));
//! ```

use crate::environment::{Environment, Platform};
use std::collections::{BTreeSet, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, Once, PoisonError};

#[derive(Debug, Default)]
struct State {
    vars: HashMap<String, String>,
    dirs: BTreeSet<PathBuf>,
    lookups: HashMap<String, usize>,
    create_calls: usize,
    fail_create: Option<io::ErrorKind>,
}

/// In-memory variables and directory tree with call counters.
///
/// Builder methods (`with_*`) configure the initial state; `set_var` and
/// `remove_var` change it after the environment has been shared.
#[derive(Debug)]
pub struct MemoryEnvironment {
    platform: Platform,
    state: Mutex<State>,
}

impl MemoryEnvironment {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            state: Mutex::new(State::default()),
        }
    }

    pub fn unix() -> Self {
        Self::new(Platform::Unix)
    }

    pub fn windows() -> Self {
        Self::new(Platform::Windows)
    }

    pub fn with_var(self, name: &str, value: &str) -> Self {
        self.set_var(name, value);
        self
    }

    /// Mark `path` and its ancestors as existing directories.
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        insert_with_ancestors(&mut self.state().dirs, path.as_ref());
        self
    }

    /// Make every `create_dir_all` call fail with `kind`.
    pub fn failing_create(self, kind: io::ErrorKind) -> Self {
        self.state().fail_create = Some(kind);
        self
    }

    pub fn set_var(&self, name: &str, value: &str) {
        self.state()
            .vars
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove_var(&self, name: &str) {
        self.state().vars.remove(name);
    }

    pub fn has_dir(&self, path: impl AsRef<Path>) -> bool {
        self.state().dirs.contains(path.as_ref())
    }

    /// Number of known directories.
    pub fn dir_count(&self) -> usize {
        self.state().dirs.len()
    }

    /// How many times `name` has been read.
    pub fn lookups(&self, name: &str) -> usize {
        self.state().lookups.get(name).copied().unwrap_or(0)
    }

    /// How many times `create_dir_all` has been called.
    pub fn create_calls(&self) -> usize {
        self.state().create_calls
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Environment for MemoryEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        let mut state = self.state();
        *state.lookups.entry(name.to_string()).or_insert(0) += 1;
        state.vars.get(name).cloned()
    }

    fn path_exists(&self, path: &Path) -> bool {
        self.state().dirs.contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state();
        state.create_calls += 1;
        if let Some(kind) = state.fail_create {
            return Err(io::Error::from(kind));
        }
        insert_with_ancestors(&mut state.dirs, path);
        Ok(())
    }

    fn platform(&self) -> Platform {
        self.platform
    }
}

fn insert_with_ancestors(dirs: &mut BTreeSet<PathBuf>, path: &Path) {
    for ancestor in path.ancestors() {
        if !ancestor.as_os_str().is_empty() {
            dirs.insert(ancestor.to_path_buf());
        }
    }
}

static TEST_LOGGING_INIT: Once = Once::new();

/// Install a compact tracing subscriber that writes through the test harness.
///
/// Safe to call multiple times. The level comes from `OKTETO_TEST_LOG_LEVEL`
/// (default `debug`).
pub fn init_test_logging() {
    TEST_LOGGING_INIT.call_once(|| {
        let level = std::env::var("OKTETO_TEST_LOG_LEVEL").unwrap_or_else(|_| "debug".to_string());
        let filter = tracing_subscriber::EnvFilter::try_new(format!("okteto_config={level}"))
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        // Another subscriber may already be installed by the test binary.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .compact()
            .try_init();
    });
}
