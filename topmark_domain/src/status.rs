//! Status enums for each axis of the per-file processing pipeline.
//!
//! Each enum captures one orthogonal phase (fs, resolve, content, header,
//! generation, render, comparison, strip, plan, patch, write). A step writes
//! only the axes named in its contract; nothing here classifies a coarse
//! outcome — that synthesis happens one level up, in [`crate::Outcome`].

use std::fmt;

macro_rules! status_enum {
    ($name:ident { $($variant:ident => $desc:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn description(&self) -> &'static str {
                match self {
                    $(Self::$variant => $desc),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.description())
            }
        }
    };
}

status_enum!(FsStatus {
    Pending => "pending",
    Ok => "ok",
    Empty => "empty file",
    NotFound => "not found",
    NoReadPermission => "no read permission",
    Unreadable => "read error",
    NoWritePermission => "no write permission",
    Binary => "binary file",
    BomBeforeShebang => "UTF BOM before shebang",
    UnicodeDecodeError => "Unicode decode error",
    MixedLineEndings => "file contains mixed line endings",
});

status_enum!(ResolveStatus {
    Pending => "resolve pending",
    Resolved => "resolved",
    TypeResolvedHeadersUnsupported => "known file type, headers not supported",
    TypeResolvedNoProcessorRegistered => "known file type, no header processor",
    Unsupported => "unsupported file type",
});

status_enum!(ContentStatus {
    Pending => "file content pending",
    Ok => "ok",
    Unsupported => "unsupported",
    SkippedMixedLineEndings => "mixed line endings",
    SkippedPolicyBomBeforeShebang => "BOM before shebang",
    SkippedReflow => "would reflow content (breaks check/strip idempotence)",
    Unreadable => "unreadable",
});

status_enum!(HeaderStatus {
    Pending => "header detection pending",
    Missing => "header missing",
    Detected => "header detected",
    Malformed => "header malformed",
    MalformedAllFields => "header malformed (all fields invalid)",
    MalformedSomeFields => "header malformed (some fields invalid)",
    Empty => "header empty",
});

status_enum!(GenerationStatus {
    Pending => "header field generation pending",
    Generated => "header fields generated",
    NoFields => "no header fields",
    Skipped => "header field generation skipped",
});

status_enum!(RenderStatus {
    Pending => "header field rendering pending",
    Rendered => "header fields rendered",
    Skipped => "header rendering skipped",
});

status_enum!(ComparisonStatus {
    Pending => "comparison pending",
    Changed => "changes found",
    Unchanged => "no changes found",
    Skipped => "comparison skipped",
});

status_enum!(StripStatus {
    Pending => "stripping pending",
    NotNeeded => "stripping not needed",
    Ready => "ready for stripping",
    Failed => "stripping failed",
});

status_enum!(PlanStatus {
    Pending => "update pending",
    Previewed => "update previewed",
    Replaced => "header replaced",
    Inserted => "header inserted",
    Removed => "header removed",
    Skipped => "update skipped",
    Failed => "update failed",
});

status_enum!(PatchStatus {
    Pending => "patch pending",
    Generated => "patch generated",
    Skipped => "patch skipped",
    Failed => "patch failed",
});

status_enum!(WriteStatus {
    Pending => "write pending",
    Written => "changes written to file",
    Skipped => "write was skipped",
    Failed => "write failed",
});

impl Default for FsStatus {
    fn default() -> Self {
        Self::Pending
    }
}
impl Default for ResolveStatus {
    fn default() -> Self {
        Self::Pending
    }
}
impl Default for ContentStatus {
    fn default() -> Self {
        Self::Pending
    }
}
impl Default for HeaderStatus {
    fn default() -> Self {
        Self::Pending
    }
}
impl Default for GenerationStatus {
    fn default() -> Self {
        Self::Pending
    }
}
impl Default for RenderStatus {
    fn default() -> Self {
        Self::Pending
    }
}
impl Default for ComparisonStatus {
    fn default() -> Self {
        Self::Pending
    }
}
impl Default for StripStatus {
    fn default() -> Self {
        Self::Pending
    }
}
impl Default for PlanStatus {
    fn default() -> Self {
        Self::Pending
    }
}
impl Default for PatchStatus {
    fn default() -> Self {
        Self::Pending
    }
}
impl Default for WriteStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// All per-axis statuses for one file, as carried by [`crate::ProcessingContext`].
#[derive(Debug, Clone, Default)]
pub struct StatusAxes {
    pub fs: FsStatus,
    pub resolve: ResolveStatus,
    pub content: ContentStatus,
    pub header: HeaderStatus,
    pub generation: GenerationStatus,
    pub render: RenderStatus,
    pub comparison: ComparisonStatus,
    pub strip: StripStatus,
    pub plan: PlanStatus,
    pub patch: PatchStatus,
    pub write: WriteStatus,
}

/// Coarse outcome synthesized from [`StatusAxes`] by the view/API layer.
///
/// No pipeline step constructs this directly; it is derived after the run
/// completes so that CLI/reporting code has one bucket to switch on instead
/// of eleven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Header already matched the expected content; nothing to do.
    AlreadyCompliant,
    /// A header was inserted, replaced, or removed (apply mode).
    Changed,
    /// A change would occur but was not applied (dry-run / preview).
    WouldChange,
    /// File skipped by policy or resolution (unsupported type, no processor, etc.).
    Skipped,
    /// A step failed; see diagnostics for detail.
    Failed,
}

impl StatusAxes {
    /// Synthesizes the coarse [`Outcome`] for reporting.
    ///
    /// Mirrors the axis precedence the original pipeline's view layer uses:
    /// a hard failure on any axis always wins, then skip, then actual file
    /// change, then would-change, else compliant.
    pub fn outcome(&self) -> Outcome {
        if matches!(self.write, WriteStatus::Failed)
            || matches!(self.patch, PatchStatus::Failed)
            || matches!(self.strip, StripStatus::Failed)
            || matches!(self.plan, PlanStatus::Failed)
        {
            return Outcome::Failed;
        }
        if matches!(self.resolve, ResolveStatus::Unsupported)
            || matches!(
                self.resolve,
                ResolveStatus::TypeResolvedHeadersUnsupported
                    | ResolveStatus::TypeResolvedNoProcessorRegistered
            )
            || matches!(self.plan, PlanStatus::Skipped)
        {
            return Outcome::Skipped;
        }
        if matches!(self.write, WriteStatus::Written) {
            return Outcome::Changed;
        }
        if matches!(
            self.plan,
            PlanStatus::Previewed | PlanStatus::Replaced | PlanStatus::Inserted | PlanStatus::Removed
        ) {
            return Outcome::WouldChange;
        }
        Outcome::AlreadyCompliant
    }
}
