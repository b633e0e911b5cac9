//! Peeks at the first few kilobytes of a resolved file to classify it as
//! binary, unreadable, empty, or plain text before committing to a full
//! read, and flags the two "soft" conditions ([`ProcessingContext::bom_before_shebang`],
//! [`ProcessingContext::mixed_newlines`]) that a policy may choose to
//! tolerate rather than skip outright.

use std::fs::File;
use std::io::{ErrorKind, Read};

use topmark_domain::{FsStatus, PlanStatus, ProcessingContext, ResolveStatus};

use super::{diag_error, PipelineStep, StepEnv};

/// Large enough to see past a shebang, an encoding pragma, and a handful of
/// newline-style-defining lines without reading the whole file.
const SAMPLE_SIZE: usize = 8192;

pub struct Sniffer;

impl PipelineStep for Sniffer {
    fn name(&self) -> &'static str {
        "sniffer"
    }

    fn may_proceed(&self, ctx: &ProcessingContext, _env: &StepEnv) -> bool {
        matches!(ctx.status.resolve, ResolveStatus::Resolved) && matches!(ctx.status.fs, FsStatus::Pending)
    }

    fn run(&self, ctx: &mut ProcessingContext, _env: &StepEnv) {
        let mut file = match File::open(&ctx.path) {
            Ok(file) => file,
            Err(err) => {
                fail(ctx, fs_status_for_open_error(&err), format!("could not open {}: {err}", ctx.path.display()));
                return;
            }
        };

        let mut buf = vec![0u8; SAMPLE_SIZE];
        let read = match file.read(&mut buf) {
            Ok(n) => n,
            Err(err) => {
                fail(ctx, FsStatus::Unreadable, format!("could not read {}: {err}", ctx.path.display()));
                return;
            }
        };
        buf.truncate(read);

        if buf.is_empty() {
            ctx.status.fs = FsStatus::Empty;
            return;
        }

        if buf.contains(&0) {
            fail(ctx, FsStatus::Binary, format!("{} looks like a binary file", ctx.path.display()));
            return;
        }

        let (leading_bom, sample) =
            if buf.starts_with(&[0xEF, 0xBB, 0xBF]) { (true, &buf[3..]) } else { (false, &buf[..]) };
        ctx.leading_bom = leading_bom;

        match decode_sample(sample) {
            Ok(text) => {
                ctx.has_shebang = text.starts_with("#!");
            }
            Err(()) => {
                fail(ctx, FsStatus::UnicodeDecodeError, format!("{} is not valid UTF-8", ctx.path.display()));
                return;
            }
        }
        ctx.bom_before_shebang = leading_bom && ctx.has_shebang;
        ctx.mixed_newlines = has_mixed_newlines(&buf);

        ctx.status.fs = FsStatus::Ok;
    }
}

fn fail(ctx: &mut ProcessingContext, status: FsStatus, message: String) {
    ctx.status.fs = status;
    diag_error(ctx, message);
    ctx.status.plan = PlanStatus::Failed;
    ctx.request_halt("sniffer: hard failure");
}

fn fs_status_for_open_error(err: &std::io::Error) -> FsStatus {
    match err.kind() {
        ErrorKind::NotFound => FsStatus::NotFound,
        ErrorKind::PermissionDenied => FsStatus::NoReadPermission,
        _ => FsStatus::Unreadable,
    }
}

/// Decodes `sample` as UTF-8, tolerating a multi-byte sequence truncated by
/// the sample boundary itself (that's an artifact of sampling, not a real
/// decode error) by decoding only the valid prefix in that case.
fn decode_sample(sample: &[u8]) -> Result<&str, ()> {
    match std::str::from_utf8(sample) {
        Ok(text) => Ok(text),
        Err(err) if err.error_len().is_none() => {
            std::str::from_utf8(&sample[..err.valid_up_to()]).map_err(|_| ())
        }
        Err(_) => Err(()),
    }
}

/// True once at least two of `{LF-not-part-of-CRLF, CRLF, bare CR}` appear in
/// the sample.
fn has_mixed_newlines(sample: &[u8]) -> bool {
    let crlf = sample.windows(2).filter(|w| *w == b"\r\n").count();
    let total_lf = sample.iter().filter(|&&b| b == b'\n').count();
    let total_cr = sample.iter().filter(|&&b| b == b'\r').count();
    let bare_lf = total_lf.saturating_sub(crlf);
    let bare_cr = total_cr.saturating_sub(crlf);
    [bare_lf > 0, crlf > 0, bare_cr > 0].iter().filter(|&&present| present).count() >= 2
}
