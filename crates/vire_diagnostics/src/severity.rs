//! Diagnostic severity levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity, ordered from least to most severe.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Severity {
    /// A suggestion.
    Help,
    /// Extra context.
    Note,
    /// Possible problem; does not fail compilation.
    Warning,
    /// Legal input the toolchain does not support ("sorry").
    Sorry,
    /// Invalid input.
    Error,
    /// Inconsistent compiler state detected while processing valid-looking input.
    InternalError,
}

impl Severity {
    /// Returns `true` for severities that count toward the error total.
    pub fn is_error(self) -> bool {
        self >= Severity::Sorry
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Help => "help",
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Sorry => "sorry",
            Severity::Error => "error",
            Severity::InternalError => "internal error",
        };
        f.write_str(s)
    }
}
