//! Configuration resolution for the Okteto CLI.
//!
//! This module provides:
//! - The recognized environment variables and a typed reader over them
//! - Home, okteto folder, namespace and deployment directory resolution
//! - Kubeconfig location
//! - The per-action timeout, computed once
//! - Source tracking for debugging

pub mod env;
pub mod kubeconfig;
pub mod resolver;
pub mod source;
pub mod timeout;
pub mod validate;

pub use env::EnvReader;
pub use resolver::{ConfigResolver, OKTETO_FOLDER_NAME, ResolvedConfig};
pub use source::{ConfigSource, Sourced};
pub use timeout::{DEFAULT_TIMEOUT, TimeoutSetting};
pub use validate::ConfigWarning;

use std::sync::OnceLock;
use std::time::Duration;

static GLOBAL: OnceLock<ConfigResolver> = OnceLock::new();

/// Process-wide resolver over the real environment.
pub fn global() -> &'static ConfigResolver {
    GLOBAL.get_or_init(ConfigResolver::system)
}

/// Process-wide per-action timeout. Computed on first call.
pub fn timeout() -> Duration {
    global().timeout()
}

#[cfg(test)]
pub(crate) fn env_test_lock() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
