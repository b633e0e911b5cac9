//! Locates an existing header, if any, and classifies it: missing, present
//! and clean, present with some/all fields unparseable, present but empty
//! (markers with no payload), or malformed (found only outside the file
//! type's expected scan window, via the processors' permissive fallback).

use topmark_domain::{Axis, HeaderStatus, Hint, ProcessingContext, ResolveStatus};

use crate::processors::permissive_bounds;

use super::{PipelineStep, StepEnv};

pub struct Scanner;

impl PipelineStep for Scanner {
    fn name(&self) -> &'static str {
        "scanner"
    }

    fn may_proceed(&self, ctx: &ProcessingContext, _env: &StepEnv) -> bool {
        matches!(ctx.status.resolve, ResolveStatus::Resolved)
            && matches!(ctx.status.content, topmark_domain::ContentStatus::Ok)
            && matches!(ctx.status.header, HeaderStatus::Pending)
    }

    fn run(&self, ctx: &mut ProcessingContext, env: &StepEnv) {
        let Some(file_type) = ctx.file_type.clone() else {
            ctx.status.header = HeaderStatus::Missing;
            return;
        };
        let lines = ctx.file_lines.clone().unwrap_or_default();

        if lines.is_empty() {
            ctx.status.header = HeaderStatus::Missing;
            return;
        }

        let Some(processor) = env.processors.get(file_type.name) else {
            ctx.status.header = HeaderStatus::Missing;
            return;
        };

        if let Some((start, end)) = processor.header_bounds(&file_type, &lines) {
            let payload = &lines[start + 1..end];
            let fields = processor.parse_fields(payload);
            let non_blank = payload.iter().filter(|line| !processor.line_content(line).is_empty()).count();

            ctx.header_span = Some((start, end));
            ctx.views.existing_header = Some(lines[start..=end].to_vec());
            ctx.views.parsed_fields = Some(fields.iter().map(|f| (f.key.clone(), f.value.clone())).collect());

            ctx.status.header = if non_blank == 0 {
                HeaderStatus::Empty
            } else if fields.is_empty() {
                ctx.push_hint(Hint::new(Axis::Header, "fields", "all_malformed"));
                HeaderStatus::MalformedAllFields
            } else if fields.len() < non_blank {
                ctx.push_hint(Hint::new(Axis::Header, "fields", "some_malformed"));
                HeaderStatus::MalformedSomeFields
            } else {
                HeaderStatus::Detected
            };
            return;
        }

        if let Some(span) = permissive_bounds(&lines, |line, directive| processor.line_has_directive(line, directive))
        {
            ctx.header_span = Some(span);
            ctx.status.header = HeaderStatus::Malformed;
            return;
        }

        ctx.status.header = HeaderStatus::Missing;
    }
}
