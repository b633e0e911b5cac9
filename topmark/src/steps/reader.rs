//! Loads a sniffed-ok file fully into memory: decodes UTF-8, strips any BOM,
//! splits into newline-preserving lines, and records the dominant newline
//! style and trailing-newline state the renderer/writer must reproduce.
//!
//! Also where the two soft sniffer flags turn into an actual skip (or not):
//! `bom_before_shebang` and `mixed_newlines` are only fatal to this file's
//! run when the effective policy says so.

use std::fs;

use topmark_domain::{Axis, ContentStatus, FsStatus, Hint, NewlineStyle, PlanStatus, ProcessingContext, ResolveStatus};

use super::{diag_warn, PipelineStep, StepEnv};

pub struct Reader;

impl PipelineStep for Reader {
    fn name(&self) -> &'static str {
        "reader"
    }

    fn may_proceed(&self, ctx: &ProcessingContext, _env: &StepEnv) -> bool {
        matches!(ctx.status.resolve, ResolveStatus::Resolved)
            && matches!(ctx.status.fs, FsStatus::Ok | FsStatus::Empty)
            && matches!(ctx.status.content, ContentStatus::Pending)
    }

    fn run(&self, ctx: &mut ProcessingContext, env: &StepEnv) {
        let type_name = ctx.file_type.as_ref().map(|ft| ft.name).unwrap_or_default();
        let policy = env.config.policy_for(type_name);

        if ctx.bom_before_shebang && !policy.ignore_bom_before_shebang {
            ctx.status.content = ContentStatus::SkippedPolicyBomBeforeShebang;
            ctx.status.plan = PlanStatus::Skipped;
            diag_warn(ctx, "BOM appears before the shebang line; skipped per policy");
            ctx.push_hint(Hint::new(Axis::Content, "bom", "bom_before_shebang"));
            ctx.request_halt("reader: bom before shebang");
            return;
        }
        if ctx.mixed_newlines && !policy.ignore_mixed_line_endings {
            ctx.status.content = ContentStatus::SkippedMixedLineEndings;
            ctx.status.plan = PlanStatus::Skipped;
            diag_warn(ctx, "file mixes newline styles; skipped per policy");
            ctx.push_hint(Hint::new(Axis::Content, "newlines", "mixed"));
            ctx.request_halt("reader: mixed line endings");
            return;
        }

        if matches!(ctx.status.fs, FsStatus::Empty) {
            ctx.file_lines = Some(Vec::new());
            ctx.views.image = Some(Vec::new());
            ctx.status.content = ContentStatus::Ok;
            return;
        }

        let bytes = match fs::read(&ctx.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                ctx.status.fs = FsStatus::Unreadable;
                ctx.status.content = ContentStatus::Unreadable;
                ctx.status.plan = PlanStatus::Failed;
                diag_warn(ctx, format!("could not read {}: {err}", ctx.path.display()));
                ctx.request_halt("reader: read failed");
                return;
            }
        };

        let without_bom = if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) { &bytes[3..] } else { &bytes[..] };

        let text = match std::str::from_utf8(without_bom) {
            Ok(text) => text,
            Err(err) => {
                ctx.status.fs = FsStatus::UnicodeDecodeError;
                ctx.status.content = ContentStatus::Unreadable;
                ctx.status.plan = PlanStatus::Failed;
                diag_warn(ctx, format!("{} is not valid UTF-8: {err}", ctx.path.display()));
                ctx.request_halt("reader: invalid utf-8");
                return;
            }
        };

        if text.is_empty() {
            ctx.status.fs = FsStatus::Empty;
            ctx.file_lines = Some(Vec::new());
            ctx.views.image = Some(Vec::new());
            ctx.status.content = ContentStatus::Ok;
            return;
        }

        let lines = split_keepends(text);
        ctx.has_shebang = lines.first().is_some_and(|l| l.starts_with("#!"));
        ctx.newline_style = detect_newline_style(&lines);
        ctx.ends_with_newline = lines.last().is_some_and(|l| l.ends_with('\n') || l.ends_with('\r'));

        ctx.views.image = Some(lines.clone());
        ctx.file_lines = Some(lines);
        ctx.status.content = ContentStatus::Ok;
    }
}

/// Splits `text` into lines, each retaining its own `\n`/`\r\n`/`\r`
/// terminator (or none, for a final unterminated line).
fn split_keepends(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(text[start..=i].to_string());
                i += 1;
                start = i;
            }
            b'\r' => {
                let end = if bytes.get(i + 1) == Some(&b'\n') { i + 1 } else { i };
                lines.push(text[start..=end].to_string());
                i = end + 1;
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        lines.push(text[start..].to_string());
    }
    lines
}

fn detect_newline_style(lines: &[String]) -> NewlineStyle {
    for line in lines {
        if line.ends_with("\r\n") {
            return NewlineStyle::Crlf;
        }
        if line.ends_with('\n') {
            return NewlineStyle::Lf;
        }
        if line.ends_with('\r') {
            return NewlineStyle::Cr;
        }
    }
    NewlineStyle::Unknown
}
