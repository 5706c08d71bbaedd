//! Severity levels for diagnostics.

use std::fmt;

/// How serious a recovered condition is.
///
/// Neither level stops the pipeline. A warning means input was skipped or
/// repaired, so the scene may not match the file. Advice means the input was
/// used as-is but a setting could not be honored, such as grouping nodes that
/// all share one elevation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Advice,
    Warning,
}

impl Severity {
    pub fn is_warning(self) -> bool {
        self == Severity::Warning
    }

    pub fn is_advice(self) -> bool {
        self == Severity::Advice
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Advice => "advice",
            Severity::Warning => "warning",
        })
    }
}
