//! Decides whether an existing, well-formed header already matches what the
//! builder/renderer computed — both as parsed field dictionaries (order- and
//! whitespace-insensitive) and as rendered text (byte-for-byte, catching
//! formatting drift the dictionary comparison alone would miss).

use std::collections::HashMap;

use topmark_domain::{ComparisonStatus, HeaderStatus, ProcessingContext, RenderStatus};

use super::{PipelineStep, StepEnv};

pub struct Comparer;

impl PipelineStep for Comparer {
    fn name(&self) -> &'static str {
        "comparer"
    }

    fn may_proceed(&self, ctx: &ProcessingContext, _env: &StepEnv) -> bool {
        matches!(ctx.status.comparison, ComparisonStatus::Pending)
            && matches!(ctx.status.header, HeaderStatus::Detected | HeaderStatus::Empty)
            && matches!(ctx.status.render, RenderStatus::Rendered | RenderStatus::Skipped)
    }

    fn run(&self, ctx: &mut ProcessingContext, _env: &StepEnv) {
        if matches!(ctx.status.render, RenderStatus::Skipped) {
            // Nothing was rendered to compare against (no-fields, policy says
            // don't synthesize an empty block) — leave the existing header alone.
            ctx.status.comparison = ComparisonStatus::Skipped;
            return;
        }

        let existing_fields: HashMap<String, String> =
            ctx.views.parsed_fields.clone().unwrap_or_default().into_iter().collect();
        let built_fields: HashMap<String, String> =
            ctx.views.built_fields.clone().unwrap_or_default().into_iter().collect();
        let dict_matches = existing_fields == built_fields;

        let existing_text = ctx.views.existing_header.clone().unwrap_or_default().join("");
        let rendered_text = ctx.views.rendered_header.clone().unwrap_or_default().join("");
        let text_matches = existing_text == rendered_text;

        ctx.status.comparison =
            if dict_matches && text_matches { ComparisonStatus::Unchanged } else { ComparisonStatus::Changed };
    }
}
