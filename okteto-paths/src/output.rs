//! Human and JSON rendering of resolved values.

use anyhow::Context;
use okteto_config::{ConfigError, ConfigSource, ResolvedConfig, Sourced};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub fn print_path(path: &Path) {
    println!("{}", path.display());
}

pub fn print_timeout(timeout: Duration, secs: bool) {
    println!("{}", format_timeout(timeout, secs));
}

pub fn print_json(snapshot: &ResolvedConfig) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(snapshot).context("failed to encode configuration")?;
    println!("{json}");
    Ok(())
}

pub fn print_snapshot(snapshot: &ResolvedConfig) {
    print!("{}", format_snapshot(snapshot));
}

pub fn format_timeout(timeout: Duration, secs: bool) -> String {
    if secs {
        timeout.as_secs().to_string()
    } else {
        humantime::format_duration(timeout).to_string()
    }
}

fn describe_source<T>(sourced: &Sourced<T>) -> String {
    match (&sourced.source, &sourced.env_var) {
        (ConfigSource::Default, _) | (_, None) => sourced.source.to_string(),
        (source, Some(var)) => format!("{source}: {var}"),
    }
}

fn path_line(out: &mut String, label: &str, sourced: &Sourced<PathBuf>) {
    let _ = writeln!(
        out,
        "{:<12} {}  ({})",
        label,
        sourced.value.display(),
        describe_source(sourced)
    );
}

pub fn format_snapshot(snapshot: &ResolvedConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<12} {}", "platform", snapshot.platform);
    path_line(&mut out, "home", &snapshot.home);
    path_line(&mut out, "folder", &snapshot.okteto_home);
    path_line(&mut out, "kubeconfig", &snapshot.kubeconfig);
    let _ = writeln!(
        out,
        "{:<12} {}  ({})",
        "timeout",
        format_timeout(snapshot.timeout.value(), false),
        describe_source(&snapshot.timeout.timeout)
    );
    if let Some(warning) = &snapshot.timeout.warning {
        let _ = writeln!(out, "{:<12} {}", "", warning);
    }
    out
}

/// `error[CODE]: message` followed by numbered remediation steps.
pub fn format_error(err: &ConfigError) -> String {
    let entry = err.code().entry();
    format!(
        "error[{}]: {}\n\n{}",
        entry.code,
        err,
        entry.format_remediation()
    )
}
