//! The per-file pipeline: eleven steps sharing one [`ProcessingContext`],
//! driven in a fixed order by [`Runner`].
//!
//! Each step declares a `name`, a `may_proceed` gate (so it can no-op
//! cleanly when an earlier step already decided the file's fate), and a
//! `run` that mutates only the axes its contract names. No step returns a
//! `Result` to the Runner: failures are recorded as statuses and
//! diagnostics, per spec.md §7.

pub mod builder;
pub mod comparer;
pub mod patcher;
pub mod planner;
pub mod reader;
pub mod renderer;
pub mod resolver;
pub mod scanner;
pub mod sniffer;
pub mod stripper;
pub mod writer;

use topmark_domain::{Config, Diagnostic, FileTypeRegistry, ProcessingContext};

use crate::registry::ProcessorRegistry;
use crate::sinks::WriteSink;

/// Read-only environment threaded through every step: the frozen config and
/// the two immutable registries. Shared across a whole batch run, never
/// mutated once a [`Runner`] is constructed.
pub struct StepEnv<'a> {
    pub config: &'a Config,
    pub file_types: &'a FileTypeRegistry,
    pub processors: &'a ProcessorRegistry,
    pub sink: &'a dyn WriteSink,
}

/// One stage of the per-file pipeline.
pub trait PipelineStep: Send + Sync {
    fn name(&self) -> &'static str;

    /// Step-local gate: whether this step should do any work given the
    /// context's current statuses and halt flag. A step that returns
    /// `false` here leaves its axes untouched (they keep their `Pending`
    /// default, or whatever an earlier step set). Takes `env` too since a
    /// few gates (Stripper/Planner's `Operation` branch) depend on config,
    /// not just per-file state.
    fn may_proceed(&self, ctx: &ProcessingContext, env: &StepEnv) -> bool;

    fn run(&self, ctx: &mut ProcessingContext, env: &StepEnv);
}

/// Drives one file through the full step sequence, short-circuiting on
/// `ctx.halt`.
pub struct Runner {
    steps: Vec<Box<dyn PipelineStep>>,
}

impl Runner {
    /// The canonical step order: Resolver, Sniffer, Reader, Scanner,
    /// Builder, Renderer, Comparer, Stripper, Planner, Patcher, Writer.
    /// Stripper and Planner both run but gate on `config.operation` so
    /// exactly one of them does any work for a given file (spec.md §2's
    /// "(Stripper | Planner)" alternative).
    pub fn new() -> Self {
        Self {
            steps: vec![
                Box::new(resolver::Resolver),
                Box::new(sniffer::Sniffer),
                Box::new(reader::Reader),
                Box::new(scanner::Scanner),
                Box::new(builder::Builder),
                Box::new(renderer::Renderer),
                Box::new(comparer::Comparer),
                Box::new(stripper::Stripper),
                Box::new(planner::Planner),
                Box::new(patcher::Patcher),
                Box::new(writer::Writer),
            ],
        }
    }

    /// Runs every step against `ctx` in order, honoring `ctx.halt` and each
    /// step's `may_proceed` gate.
    pub fn run_file(&self, ctx: &mut ProcessingContext, env: &StepEnv) {
        for step in &self.steps {
            if ctx.halt {
                break;
            }
            if !step.may_proceed(ctx, env) {
                continue;
            }
            tracing::debug!(path = %ctx.path.display(), step = step.name(), "running step");
            step.run(ctx, env);
        }
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared helper: push an info/warning/error diagnostic onto `ctx`.
pub(crate) fn diag_info(ctx: &mut ProcessingContext, message: impl Into<String>) {
    ctx.push_diagnostic(Diagnostic::info(message));
}
pub(crate) fn diag_warn(ctx: &mut ProcessingContext, message: impl Into<String>) {
    ctx.push_diagnostic(Diagnostic::warning(message));
}
pub(crate) fn diag_error(ctx: &mut ProcessingContext, message: impl Into<String>) {
    ctx.push_diagnostic(Diagnostic::error(message));
}
