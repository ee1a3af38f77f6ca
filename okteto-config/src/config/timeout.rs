//! Per-action timeout.

use super::env::{EnvReader, OKTETO_TIMEOUT};
use super::source::Sourced;
use super::validate::ConfigWarning;
use crate::environment::Environment;
use serde::Serialize;
use std::time::Duration;

/// Timeout used when `OKTETO_TIMEOUT` is unset or invalid.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The resolved timeout and the warning produced while resolving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeoutSetting {
    #[serde(with = "duration_human")]
    pub timeout: Sourced<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<ConfigWarning>,
}

impl TimeoutSetting {
    pub fn value(&self) -> Duration {
        self.timeout.value
    }
}

/// Read `OKTETO_TIMEOUT`, falling back to [`DEFAULT_TIMEOUT`].
pub(crate) fn compute_timeout<E: Environment + ?Sized>(env: &E) -> TimeoutSetting {
    let mut reader = EnvReader::new(env);
    let timeout = reader.get_duration(OKTETO_TIMEOUT, DEFAULT_TIMEOUT);
    let warning = reader.take_warnings().into_iter().next();
    TimeoutSetting { timeout, warning }
}

mod duration_human {
    use super::Sourced;
    use serde::{Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Sourced<Duration>, s: S) -> Result<S::Ok, S::Error> {
        value
            .clone()
            .map(|d| humantime::format_duration(d).to_string())
            .serialize(s)
    }
}
