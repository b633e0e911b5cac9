//! Free-text diagnostics and structured hints attached to a [`crate::ProcessingContext`].
//!
//! The two are deliberately separate. [`Diagnostic`] carries a human-readable
//! message for display (CLI output, logs). [`Hint`] is the machine-checkable
//! counterpart — a `(axis, cluster, code)` triple a caller can match on
//! without parsing message text, e.g. to decide whether a failure is the
//! known "mixed line endings" cluster.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
}

impl Diagnostic {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: DiagnosticLevel::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: DiagnosticLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: DiagnosticLevel::Error, message: message.into() }
    }
}

/// Which pipeline axis a [`Hint`] pertains to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Fs,
    Resolve,
    Content,
    Header,
    Generation,
    Render,
    Comparison,
    Strip,
    Plan,
    Patch,
    Write,
}

/// A structured, matchable counterpart to a [`Diagnostic`].
///
/// `cluster` groups related causes under one stable name (e.g. `"newlines"`,
/// `"bom"`, `"fields"`); `code` identifies the specific condition within that
/// cluster. Both are plain strings rather than closed enums so new clusters
/// can be introduced by a processor family without a domain-wide enum change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub axis: Axis,
    pub cluster: &'static str,
    pub code: &'static str,
}

impl Hint {
    pub fn new(axis: Axis, cluster: &'static str, code: &'static str) -> Self {
        Self { axis, cluster, code }
    }
}
