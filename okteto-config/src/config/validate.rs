//! Non-fatal configuration problems.

use serde::Serialize;
use std::fmt;

/// An override that was ignored. Resolution continues with the default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigWarning {
    /// Variable the warning is about.
    pub var: String,
    /// Raw value that was read.
    pub value: String,
    pub message: String,
}

impl ConfigWarning {
    pub fn warning(
        var: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            var: var.into(),
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning: {} ({}='{}')", self.message, self.var, self.value)
    }
}
