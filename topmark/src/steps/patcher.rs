//! Produces a unified diff between the verbatim image and the planned
//! update, for preview/reporting. A no-op plan (rendering collapsed back to
//! identical text) downgrades silently to `Skipped` rather than `Failed`.

use similar::TextDiff;
use topmark_domain::{PatchStatus, PlanStatus, ProcessingContext};

use super::{PipelineStep, StepEnv};

pub struct Patcher;

impl PipelineStep for Patcher {
    fn name(&self) -> &'static str {
        "patcher"
    }

    fn may_proceed(&self, ctx: &ProcessingContext, _env: &StepEnv) -> bool {
        matches!(ctx.status.patch, PatchStatus::Pending)
            && matches!(
                ctx.status.plan,
                PlanStatus::Inserted | PlanStatus::Replaced | PlanStatus::Removed | PlanStatus::Previewed
            )
    }

    fn run(&self, ctx: &mut ProcessingContext, _env: &StepEnv) {
        let Some(updated) = ctx.views.updated.clone() else {
            ctx.status.patch = PatchStatus::Skipped;
            return;
        };
        let original = ctx.views.image.clone().unwrap_or_default();

        let original_text = original.join("");
        let updated_text = updated.join("");
        if original_text == updated_text {
            ctx.status.patch = PatchStatus::Skipped;
            return;
        }

        let path_display = ctx.path.display().to_string();
        let diff = TextDiff::from_lines(&original_text, &updated_text)
            .unified_diff()
            .header(&path_display, &path_display)
            .to_string();

        ctx.views.diff = Some(diff);
        ctx.status.patch = PatchStatus::Generated;
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
    fn generates_a_diff_for_an_insertion() {
        let file_types = FileTypeRegistry::build(builtins::catalog()).unwrap();
        let processors = ProcessorRegistry::from_file_types(&file_types);
        let config = MutableConfig::builder().freeze().unwrap();
        let env = StepEnv { config: &config, file_types: &file_types, processors: &processors, sink: &NullSink };

        let mut ctx = ProcessingContext::new(PathBuf::from("x.py"));
        ctx.status.plan = PlanStatus::Inserted;
        ctx.views.image = Some(vec!["print(1)\n".to_string()]);
        ctx.views.updated = Some(vec!["# header\n".to_string(), "print(1)\n".to_string()]);
        Patcher.run(&mut ctx, &env);

        assert_eq!(ctx.status.patch, PatchStatus::Generated);
        assert!(ctx.views.diff.unwrap().contains("+# header"));
    }

    #[test]
    fn identical_text_skips_patch() {
        let file_types = FileTypeRegistry::build(builtins::catalog()).unwrap();
        let processors = ProcessorRegistry::from_file_types(&file_types);
        let config = MutableConfig::builder().freeze().unwrap();
        let env = StepEnv { config: &config, file_types: &file_types, processors: &processors, sink: &NullSink };

        let mut ctx = ProcessingContext::new(PathBuf::from("x.py"));
        ctx.status.plan = PlanStatus::Previewed;
        ctx.views.image = Some(vec!["print(1)\n".to_string()]);
        ctx.views.updated = Some(vec!["print(1)\n".to_string()]);
        Patcher.run(&mut ctx, &env);

        assert_eq!(ctx.status.patch, PatchStatus::Skipped);
    }
}
