//! The `Strip` branch of the `(Stripper | Planner)` alternative: removes an
//! existing header rather than inserting/updating one. Owns the `plan` axis
//! directly in this mode, since [`super::planner::Planner`] gates itself off
//! when `config.operation == Operation::Strip` and never runs.

use topmark_domain::{HeaderStatus, Operation, PlanStatus, ProcessingContext, StripStatus};

use super::{diag_info, PipelineStep, StepEnv};

pub struct Stripper;

impl PipelineStep for Stripper {
    fn name(&self) -> &'static str {
        "stripper"
    }

    fn may_proceed(&self, ctx: &ProcessingContext, env: &StepEnv) -> bool {
        env.config.operation == Operation::Strip && matches!(ctx.status.strip, StripStatus::Pending)
    }

    fn run(&self, ctx: &mut ProcessingContext, env: &StepEnv) {
        if matches!(ctx.status.header, HeaderStatus::Missing) {
            ctx.status.strip = StripStatus::NotNeeded;
            ctx.status.plan = PlanStatus::Skipped;
            diag_info(ctx, "no header present; nothing to strip");
            return;
        }

        let (Some(file_type), Some(processor)) =
            (ctx.file_type.clone(), ctx.file_type.as_ref().and_then(|ft| env.processors.get(ft.name)))
        else {
            ctx.status.strip = StripStatus::Failed;
            ctx.status.plan = PlanStatus::Failed;
            return;
        };
        let lines = ctx.file_lines.clone().unwrap_or_default();

        let (updated, span) = processor.strip_header(&file_type, &lines, ctx.header_span);
        let Some(span) = span else {
            ctx.status.strip = StripStatus::NotNeeded;
            ctx.status.plan = PlanStatus::Skipped;
            diag_info(ctx, "no header found to strip");
            return;
        };

        ctx.header_span = Some(span);
        ctx.views.updated = Some(updated);
        ctx.status.strip = StripStatus::Ready;
        ctx.status.plan = if env.config.apply_changes { PlanStatus::Removed } else { PlanStatus::Previewed };
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use topmark_domain::{builtins, FileTypeRegistry, MutableConfig};

    use super::*;
    use crate::registry::ProcessorRegistry;
    use crate::sinks::NullSink;

    #[test]
    fn strips_a_detected_header() {
        let file_types = FileTypeRegistry::build(builtins::catalog()).unwrap();
        let processors = ProcessorRegistry::from_file_types(&file_types);
        let mut mutable = MutableConfig::builder();
        mutable.operation = Operation::Strip;
        mutable.apply_changes = Some(true);
        let config = mutable.freeze().unwrap();
        let env = StepEnv { config: &config, file_types: &file_types, processors: &processors, sink: &NullSink };

        let mut ctx = ProcessingContext::new(PathBuf::from("x.py"));
        ctx.file_type = file_types.resolve(&ctx.path).cloned();
        ctx.status.header = HeaderStatus::Detected;
        ctx.header_span = Some((0, 4));
        ctx.file_lines = Some(
            vec!["# topmark:header:start", "#", "#   file : x.py", "#", "# topmark:header:end", "print(1)"]
                .into_iter()
                .map(|l| format!("{l}\n"))
                .collect(),
        );
        Stripper.run(&mut ctx, &env);

        assert_eq!(ctx.status.strip, StripStatus::Ready);
        assert_eq!(ctx.status.plan, PlanStatus::Removed);
        assert_eq!(ctx.views.updated.unwrap(), vec!["print(1)\n".to_string()]);
    }

    #[test]
    fn missing_header_needs_no_strip() {
        let file_types = FileTypeRegistry::build(builtins::catalog()).unwrap();
        let processors = ProcessorRegistry::from_file_types(&file_types);
        let mut mutable = MutableConfig::builder();
        mutable.operation = Operation::Strip;
        let config = mutable.freeze().unwrap();
        let env = StepEnv { config: &config, file_types: &file_types, processors: &processors, sink: &NullSink };

        let mut ctx = ProcessingContext::new(PathBuf::from("x.py"));
        ctx.file_type = file_types.resolve(&ctx.path).cloned();
        ctx.status.header = HeaderStatus::Missing;
        Stripper.run(&mut ctx, &env);

        assert_eq!(ctx.status.strip, StripStatus::NotNeeded);
        assert_eq!(ctx.status.plan, PlanStatus::Skipped);
    }
}
