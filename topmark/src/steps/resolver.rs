//! Resolves a path to a registered [`FileType`] and whether topmark can act
//! on it at all — the three ways a lookup can come up short (no match,
//! matched but headers not supported, matched but no processor bound) each
//! get their own [`ResolveStatus`] so later reporting doesn't have to guess.

use topmark_domain::{FileType, PlanStatus, ProcessingContext, ResolveStatus};

use super::{PipelineStep, StepEnv};

pub struct Resolver;

impl PipelineStep for Resolver {
    fn name(&self) -> &'static str {
        "resolver"
    }

    fn may_proceed(&self, ctx: &ProcessingContext, _env: &StepEnv) -> bool {
        matches!(ctx.status.resolve, ResolveStatus::Pending)
    }

    fn run(&self, ctx: &mut ProcessingContext, env: &StepEnv) {
        let Some(file_type) = env.file_types.resolve(&ctx.path) else {
            ctx.status.resolve = ResolveStatus::Unsupported;
            ctx.status.plan = PlanStatus::Skipped;
            ctx.request_halt("no registered file type matches this path");
            return;
        };

        mark_resolved(ctx, file_type);

        if file_type.skip_processing {
            ctx.status.resolve = ResolveStatus::TypeResolvedHeadersUnsupported;
            ctx.status.plan = PlanStatus::Skipped;
            ctx.request_halt(format!("'{}' files do not carry headers", file_type.name));
            return;
        }

        if env.processors.get(file_type.name).is_none() {
            ctx.status.resolve = ResolveStatus::TypeResolvedNoProcessorRegistered;
            ctx.status.plan = PlanStatus::Skipped;
            ctx.request_halt(format!("no header processor registered for '{}'", file_type.name));
            return;
        }

        ctx.status.resolve = ResolveStatus::Resolved;
    }
}

fn mark_resolved(ctx: &mut ProcessingContext, file_type: &FileType) {
    ctx.file_type = Some(file_type.clone());
}
