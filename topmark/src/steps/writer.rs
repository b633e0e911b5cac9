//! Commits a planned change through whichever [`crate::sinks::WriteSink`]
//! `run_batch`/the bootstrap layer configured for this run (stdout, atomic
//! rename, in-place, or nowhere at all for a dry run).
//!
//! Re-joins the planned lines into one string here rather than earlier:
//! every upstream step works line-by-line so insert/replace splicing stays
//! simple, and only the final write needs one contiguous buffer.

use topmark_domain::{OutputTarget, PlanStatus, ProcessingContext, WriteStatus};

use super::{diag_error, PipelineStep, StepEnv};

pub struct Writer;

impl PipelineStep for Writer {
    fn name(&self) -> &'static str {
        "writer"
    }

    fn may_proceed(&self, ctx: &ProcessingContext, env: &StepEnv) -> bool {
        matches!(ctx.status.write, WriteStatus::Pending)
            && matches!(ctx.status.plan, PlanStatus::Inserted | PlanStatus::Replaced | PlanStatus::Removed)
            && (env.config.apply_changes || matches!(env.config.output_target, OutputTarget::Stdout))
    }

    fn run(&self, ctx: &mut ProcessingContext, env: &StepEnv) {
        let Some(updated) = ctx.views.updated.clone() else {
            ctx.status.write = WriteStatus::Skipped;
            return;
        };

        let mut contents = updated.join("");
        // A leading BOM survived sniffing/reading as a flag, not bytes; only
        // reattach it if doing so wouldn't resurrect the BOM-before-shebang
        // condition the sniffer itself flags as irregular.
        if ctx.leading_bom && !contents.starts_with("#!") {
            contents = format!("\u{feff}{contents}");
        }

        match env.sink.write(&ctx.path, &contents) {
            Ok(()) => ctx.status.write = WriteStatus::Written,
            Err(err) => {
                ctx.status.write = WriteStatus::Failed;
                diag_error(ctx, format!("failed to write {}: {err}", ctx.path.display()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::tempdir;
    use topmark_domain::{builtins, FileTypeRegistry, MutableConfig};

    use super::*;
    use crate::registry::ProcessorRegistry;
    use crate::sinks::{AtomicFileSink, NullSink};

    #[test]
    fn writes_through_the_configured_sink() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("x.py");
        std::fs::write(&path, "print(1)\n").unwrap();

        let file_types = FileTypeRegistry::build(builtins::catalog()).unwrap();
        let processors = ProcessorRegistry::from_file_types(&file_types);
        let mut mutable = MutableConfig::builder();
        mutable.apply_changes = Some(true);
        let config = mutable.freeze().unwrap();
        let sink = AtomicFileSink;
        let env = StepEnv { config: &config, file_types: &file_types, processors: &processors, sink: &sink };

        let mut ctx = ProcessingContext::new(path.clone());
        ctx.status.plan = PlanStatus::Inserted;
        ctx.views.updated = Some(vec!["# header\n".to_string(), "print(1)\n".to_string()]);
        Writer.run(&mut ctx, &env);

        assert_eq!(ctx.status.write, WriteStatus::Written);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# header\nprint(1)\n");
    }

    #[test]
    fn dry_run_without_stdout_target_never_invokes_writer() {
        let file_types = FileTypeRegistry::build(builtins::catalog()).unwrap();
        let processors = ProcessorRegistry::from_file_types(&file_types);
        let config = MutableConfig::builder().freeze().unwrap();
        let env = StepEnv { config: &config, file_types: &file_types, processors: &processors, sink: &NullSink };

        let mut ctx = ProcessingContext::new(PathBuf::from("x.py"));
        ctx.status.plan = PlanStatus::Previewed;
        assert!(!Writer.may_proceed(&ctx, &env));
    }
}
