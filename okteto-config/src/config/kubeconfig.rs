//! Kubeconfig location.

use crate::environment::Platform;
use std::path::{Path, PathBuf};

/// `<home>/.kube/config`
pub fn default_kubeconfig_path(home: &Path) -> PathBuf {
    home.join(".kube").join("config")
}

/// First entry of a `KUBECONFIG` path-list.
///
/// The list is split on the platform separator; a leading separator yields
/// an empty first entry, which is returned as-is.
pub fn first_kubeconfig_entry(value: &str, platform: Platform) -> &str {
    value
        .split(platform.path_list_separator())
        .next()
        .unwrap_or(value)
}
