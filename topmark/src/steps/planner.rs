//! The `Sync` branch of the `(Stripper | Planner)` alternative: decides
//! whether to insert a new header, replace a stale one, or leave the file
//! alone, honoring `add_only`/`update_only` and the insertion-reflow guard.
//!
//! A "nothing to do" verdict (header already matches, or an empty header
//! whose policy forbids rendering) deliberately leaves `plan` at `Pending`
//! rather than setting `Skipped` — [`topmark_domain::StatusAxes::outcome`]
//! only reads `Skipped` as a policy/resolution skip, and a file needing no
//! change should synthesize as `AlreadyCompliant`.

use topmark_domain::{
    Axis, ComparisonStatus, ContentStatus, HeaderStatus, Hint, InsertCapability, NewlineStyle, Operation,
    PlanStatus, PreInsertView, ProcessingContext,
};

use super::{diag_info, diag_warn, PipelineStep, StepEnv};

pub struct Planner;

impl PipelineStep for Planner {
    fn name(&self) -> &'static str {
        "planner"
    }

    fn may_proceed(&self, ctx: &ProcessingContext, env: &StepEnv) -> bool {
        env.config.operation != Operation::Strip && matches!(ctx.status.plan, PlanStatus::Pending)
    }

    fn run(&self, ctx: &mut ProcessingContext, env: &StepEnv) {
        let type_name = ctx.file_type.as_ref().map(|ft| ft.name).unwrap_or_default();
        let policy = env.config.policy_for(type_name);

        match ctx.status.header {
            HeaderStatus::Malformed | HeaderStatus::MalformedAllFields | HeaderStatus::MalformedSomeFields => {
                ctx.status.plan = PlanStatus::Skipped;
                diag_warn(ctx, "existing header is malformed; leaving it untouched");
            }
            HeaderStatus::Missing => {
                let file_is_empty = ctx.file_lines.as_ref().is_none_or(|lines| lines.is_empty());
                if file_is_empty && !policy.allow_header_in_empty_files {
                    ctx.status.plan = PlanStatus::Skipped;
                    diag_info(ctx, "file is empty; header insertion not enabled for empty files");
                    return;
                }
                if policy.update_only {
                    ctx.status.plan = PlanStatus::Skipped;
                    diag_info(ctx, "no header present and update_only is set");
                    return;
                }
                plan_insert(ctx, env, &policy);
            }
            HeaderStatus::Empty | HeaderStatus::Detected => match ctx.status.comparison {
                ComparisonStatus::Unchanged | ComparisonStatus::Skipped | ComparisonStatus::Pending => {}
                ComparisonStatus::Changed => {
                    if policy.add_only {
                        ctx.status.plan = PlanStatus::Skipped;
                        diag_info(ctx, "header differs from expected but add_only is set");
                        return;
                    }
                    plan_replace(ctx, env);
                }
            },
            HeaderStatus::Pending => {}
        }
    }
}

fn plan_insert(ctx: &mut ProcessingContext, env: &StepEnv, policy: &topmark_domain::Policy) {
    let Some(rendered) = ctx.views.rendered_header.clone() else {
        ctx.status.plan = PlanStatus::Skipped;
        diag_info(ctx, "no header fields to render; nothing to insert");
        return;
    };
    let (Some(file_type), Some(processor)) =
        (ctx.file_type.clone(), ctx.file_type.as_ref().and_then(|ft| env.processors.get(ft.name)))
    else {
        ctx.status.plan = PlanStatus::Failed;
        return;
    };
    let lines = ctx.file_lines.clone().unwrap_or_default();

    if let Some(checker) = file_type.pre_insert_checker.as_ref() {
        let view = PreInsertView { file_lines: Some(&lines), newline_style: ctx.newline_style.as_str() };
        let verdict = checker(&view);
        ctx.insert_capability = verdict.capability;
        if verdict.capability != InsertCapability::Ok {
            ctx.status.content = ContentStatus::Unsupported;
            ctx.status.plan = PlanStatus::Skipped;
            let reason = verdict.reason.unwrap_or_else(|| "insertion not supported here".to_string());
            diag_warn(ctx, reason);
            ctx.push_hint(Hint::new(Axis::Content, "insertion", "unsupported_content"));
            ctx.request_halt("planner: pre-insert check failed");
            return;
        }
    }

    let insertion = processor.resolve_insertion(&file_type, &lines);
    if insertion.reflow_required && !policy.allow_reflow {
        ctx.status.content = ContentStatus::SkippedReflow;
        ctx.status.plan = PlanStatus::Skipped;
        diag_warn(ctx, "inserting a header here would split an existing line; skipped per policy");
        ctx.push_hint(Hint::new(Axis::Content, "insertion", "reflow_required"));
        ctx.request_halt("planner: reflow required");
        return;
    }

    let line = insertion.line.min(lines.len());
    let mut updated = Vec::with_capacity(lines.len() + rendered.len() + 2);
    updated.extend_from_slice(&lines[..line]);
    if insertion.needs_leading_blank {
        updated.push(blank_line(ctx.newline_style));
    }
    updated.extend_from_slice(&rendered);
    if file_type.header_policy.ensure_blank_after_header && lines.get(line).is_some_and(|l| !is_blank(l)) {
        updated.push(blank_line(ctx.newline_style));
    }
    updated.extend_from_slice(&lines[line..]);

    ctx.views.updated = Some(updated);
    ctx.status.plan = if env.config.apply_changes { PlanStatus::Inserted } else { PlanStatus::Previewed };
}

fn plan_replace(ctx: &mut ProcessingContext, env: &StepEnv) {
    let Some(rendered) = ctx.views.rendered_header.clone() else {
        ctx.status.plan = PlanStatus::Skipped;
        return;
    };
    let Some((start, end)) = ctx.header_span else {
        ctx.status.plan = PlanStatus::Failed;
        return;
    };
    let lines = ctx.file_lines.clone().unwrap_or_default();

    let mut updated = Vec::with_capacity(lines.len().saturating_sub(end - start + 1) + rendered.len());
    updated.extend_from_slice(&lines[..start]);
    updated.extend_from_slice(&rendered);
    updated.extend_from_slice(&lines[end + 1..]);

    ctx.views.updated = Some(updated);
    ctx.status.plan = if env.config.apply_changes { PlanStatus::Replaced } else { PlanStatus::Previewed };
}

fn blank_line(style: NewlineStyle) -> String {
    style.as_str().to_string()
}

fn is_blank(line: &str) -> bool {
    crate::processors::strip_eol(line).trim().is_empty()
}
