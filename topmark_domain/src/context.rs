//! Per-file processing state threaded through the pipeline.
//!
//! `ProcessingContext` is the mutable record one file carries from the
//! Resolver through the Writer. Each step reads what earlier steps left and
//! writes only the axes named in its own contract (see [`crate::status`]).
//! Fields are `pub` within the crate's public surface rather than hidden
//! behind setters: a staged pipeline with eleven steps each touching a
//! handful of fields gets no benefit from per-field mutators, only
//! boilerplate.

use std::path::PathBuf;

use crate::diagnostic::{Diagnostic, Hint};
use crate::file_type::{FileType, InsertCapability};
use crate::status::StatusAxes;

/// Line-ending convention detected in a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewlineStyle {
    Lf,
    Crlf,
    /// Bare CR (`\r`), classic-Mac style. Recognized on its own, not treated
    /// as a mixture with anything (spec.md §8.3: "CR-only files recognized;
    /// not considered mixed").
    Cr,
    /// No line ending observed yet, or the file is empty.
    Unknown,
}

impl NewlineStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
            Self::Cr => "\r",
            Self::Unknown => "\n",
        }
    }
}

/// Snapshots of a file's text at each major transformation stage, kept
/// around for diagnostics and diffing rather than only the final result.
#[derive(Debug, Clone, Default)]
pub struct Views {
    /// Verbatim lines as read from disk (reader output), each retaining its line ending.
    pub image: Option<Vec<String>>,
    /// The header block as detected in `image` (scanner output), if any.
    pub existing_header: Option<Vec<String>>,
    /// Parsed field name/value pairs from `existing_header` (scanner output).
    pub parsed_fields: Option<Vec<(String, String)>>,
    /// Expected field name/value pairs computed from config + existing fields (builder output).
    pub built_fields: Option<Vec<(String, String)>>,
    /// The freshly rendered expected header text (renderer output).
    pub rendered_header: Option<Vec<String>>,
    /// Full file content after the planned change (planner/patcher input).
    pub updated: Option<Vec<String>>,
    /// Unified diff between `image` and `updated` (patcher output).
    pub diff: Option<String>,
}

/// Mutable per-file state carried through the pipeline.
#[derive(Debug, Clone)]
pub struct ProcessingContext {
    pub path: PathBuf,
    pub file_type: Option<FileType>,
    pub status: StatusAxes,
    pub diagnostics: Vec<Diagnostic>,
    pub hints: Vec<Hint>,

    /// UTF-8 BOM present at the start of the file.
    pub leading_bom: bool,
    /// First line begins with `#!`.
    pub has_shebang: bool,
    /// A leading UTF-8 BOM is immediately followed by a `#!` shebang (soft sniffer flag).
    pub bom_before_shebang: bool,
    /// The sniffed sample contains two or more of `{LF, CRLF, CR}` (soft sniffer flag).
    pub mixed_newlines: bool,
    pub newline_style: NewlineStyle,
    /// File's last line ends with its newline style (vs. no trailing newline).
    pub ends_with_newline: bool,

    pub file_lines: Option<Vec<String>>,
    /// Inclusive `(start, end)` line span of the header the scanner located, if any.
    pub header_span: Option<(usize, usize)>,
    pub insert_capability: InsertCapability,

    /// Cooperative cancellation: once true, remaining steps no-op rather than
    /// running (see spec's per-step `may_proceed` gating).
    pub halt: bool,
    pub halt_reason: Option<String>,

    pub views: Views,
}

impl ProcessingContext {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            file_type: None,
            status: StatusAxes::default(),
            diagnostics: Vec::new(),
            hints: Vec::new(),
            leading_bom: false,
            has_shebang: false,
            bom_before_shebang: false,
            mixed_newlines: false,
            newline_style: NewlineStyle::Unknown,
            ends_with_newline: true,
            file_lines: None,
            header_span: None,
            insert_capability: InsertCapability::Unevaluated,
            halt: false,
            halt_reason: None,
            views: Views::default(),
        }
    }

    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn push_hint(&mut self, hint: Hint) {
        self.hints.push(hint);
    }

    /// Requests a terminal halt: remaining steps' `may_proceed` gates should
    /// return false once this is set.
    pub fn request_halt(&mut self, reason: impl Into<String>) {
        self.halt = true;
        self.halt_reason = Some(reason.into());
    }

    /// Synthesizes the coarse outcome for this file from its status axes.
    pub fn outcome(&self) -> crate::status::Outcome {
        self.status.outcome()
    }
}
