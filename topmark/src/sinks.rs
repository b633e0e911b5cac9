//! Where a planned change actually lands: an in-place file, an atomically
//! renamed-in file, stdout, or nowhere at all (dry-run/check mode).
//!
//! [`AtomicFileSink`] is the default — the same crash-safety shape as the
//! teacher's checksum/compression stage writers: write to a temp file in the
//! same directory (so the final rename stays on one filesystem), fsync, then
//! rename over the original.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use std::process;

use topmark_domain::TopmarkError;

/// Commits one file's planned new contents somewhere.
pub trait WriteSink: Send + Sync {
    fn write(&self, path: &Path, contents: &str) -> Result<(), TopmarkError>;
}

/// Writes nowhere; used for dry-run/check runs where `apply_changes` is false.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl WriteSink for NullSink {
    fn write(&self, _path: &Path, _contents: &str) -> Result<(), TopmarkError> {
        Ok(())
    }
}

/// Writes every file's new contents to stdout instead of back to disk,
/// prefixed with a path marker so a multi-file run stays parseable.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl WriteSink for StdoutSink {
    fn write(&self, path: &Path, contents: &str) -> Result<(), TopmarkError> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "----- {} -----", path.display()).map_err(TopmarkError::from)?;
        handle.write_all(contents.as_bytes()).map_err(TopmarkError::from)?;
        Ok(())
    }
}

/// Overwrites `path` directly. No crash safety: a process killed mid-write
/// leaves a truncated file. Offered for filesystems where the atomic sink's
/// same-directory temp file isn't possible (read-only parent, no rename
/// permission) and the caller accepts the risk.
#[derive(Debug, Clone, Copy, Default)]
pub struct InplaceFileSink;

impl WriteSink for InplaceFileSink {
    fn write(&self, path: &Path, contents: &str) -> Result<(), TopmarkError> {
        let mut file = File::create(path).map_err(TopmarkError::from)?;
        file.write_all(contents.as_bytes()).map_err(TopmarkError::from)?;
        file.sync_all().map_err(TopmarkError::from)
    }
}

/// Writes a hidden temp file beside `path`, fsyncs it, then renames it over
/// `path`. The temp name embeds the pid and a random suffix so two sinks
/// never collide even when writing the same path concurrently within one
/// run (shouldn't happen — each path is processed by exactly one pipeline
/// run — but costs nothing to rule out).
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomicFileSink;

impl WriteSink for AtomicFileSink {
    fn write(&self, path: &Path, contents: &str) -> Result<(), TopmarkError> {
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("topmark-output");
        let suffix: u32 = rand::random();
        let tmp_name = format!(".{file_name}.topmark.tmp-{}-{suffix:08x}", process::id());
        let tmp_path = dir.join(tmp_name);

        let original_mode = fs::metadata(path).ok().map(|meta| meta.permissions());

        let result = (|| -> Result<(), TopmarkError> {
            let mut tmp_file = File::create(&tmp_path).map_err(TopmarkError::from)?;
            tmp_file.write_all(contents.as_bytes()).map_err(TopmarkError::from)?;
            if let Some(perms) = original_mode.clone() {
                tmp_file.set_permissions(perms).map_err(TopmarkError::from)?;
            }
            tmp_file.sync_all().map_err(TopmarkError::from)?;
            drop(tmp_file);
            fs::rename(&tmp_path, path).map_err(TopmarkError::from)?;
            if let Ok(dir_handle) = File::open(dir) {
                let _ = dir_handle.sync_all();
            }
            Ok(())
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn atomic_sink_replaces_file_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("example.py");
        fs::write(&path, "old\n").unwrap();

        AtomicFileSink.write(&path, "new\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn atomic_sink_creates_new_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fresh.py");

        AtomicFileSink.write(&path, "hello\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains("tmp-"))
            .collect();
        assert!(leftovers.is_empty(), "temp file was not cleaned up");
    }

    #[test]
    #[cfg(unix)]
    fn atomic_sink_preserves_executable_bit() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("script.sh");
        fs::write(&path, "#!/bin/sh\necho old\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        AtomicFileSink.write(&path, "#!/bin/sh\necho new\n").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn null_sink_touches_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("untouched.py");
        fs::write(&path, "original\n").unwrap();

        NullSink.write(&path, "would-be-new\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "original\n");
    }
}
