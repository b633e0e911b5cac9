//! # Domain Layer
//!
//! Pure types and policy logic for topmark's header-processing pipeline:
//! file type recognition, tri-state policy resolution, run configuration,
//! per-file processing state, and the pipeline's status vocabulary. Nothing
//! in this crate touches the filesystem beyond matching a path's string
//! shape — reading, scanning, rendering, and writing are all the `topmark`
//! crate's concern.

pub mod builtins;
pub mod config;
pub mod context;
pub mod diagnostic;
pub mod error;
pub mod file_type;
pub mod filetype_detectors;
pub mod policy;
pub mod registry;
pub mod run_result;
pub mod status;

pub use config::{Config, FileWriteStrategy, HeaderFieldSpec, HeaderOutputFormat, MutableConfig, Operation, OutputTarget};
pub use context::{NewlineStyle, ProcessingContext, Views};
pub use diagnostic::{Axis, Diagnostic, DiagnosticLevel, Hint};
pub use error::TopmarkError;
pub use file_type::{
    CommentSyntax, ContentGate, ContentMatcher, FileType, FileTypeHeaderPolicy, InsertCapability,
    InsertCheckResult, InsertChecker, PreInsertView,
};
pub use policy::{MutablePolicy, Policy};
pub use registry::FileTypeRegistry;
pub use run_result::RunResult;
pub use status::{
    ComparisonStatus, ContentStatus, FsStatus, GenerationStatus, HeaderStatus, Outcome, PatchStatus,
    PlanStatus, RenderStatus, ResolveStatus, StatusAxes, StripStatus, WriteStatus,
};
