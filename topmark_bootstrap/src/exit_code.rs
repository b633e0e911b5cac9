//! Process exit codes, mapped from a [`topmark_domain::RunResult`] per the
//! core's semantic categories: nominal success, a dry run that would have
//! changed something, bad usage, or a hard failure.

use std::fmt;

use topmark_domain::RunResult;

/// Exit status the bootstrap binary returns to the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum ExitCode {
    /// Nominal: ran to completion, nothing left to change.
    #[default]
    Success = 0,
    /// A dry run found files that would change; non-zero so `--check` is
    /// usable as a CI gate.
    WouldChange = 1,
    /// Bad CLI arguments or an unresolvable input path.
    UsageError = 64,
    /// A step failed for at least one file (I/O error, write race, etc.).
    Failure = 70,
    /// Interrupted by SIGINT/SIGTERM before the batch finished.
    Interrupted = 130,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Derives the exit code from a completed batch's results.
    ///
    /// Failure outranks would-change: a run with one failed file and nine
    /// compliant ones is still a failure, not a clean pass.
    pub fn from_run_result(result: &RunResult) -> Self {
        if result.any_failed() {
            ExitCode::Failure
        } else if result.any_changed_or_would_change() {
            ExitCode::WouldChange
        } else {
            ExitCode::Success
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            ExitCode::Success => "success",
            ExitCode::WouldChange => "would change",
            ExitCode::UsageError => "usage error",
            ExitCode::Failure => "failure",
            ExitCode::Interrupted => "interrupted",
        };
        write!(f, "{description} ({})", self.as_i32())
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code.as_i32()
    }
}
