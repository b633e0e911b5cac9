//! Bootstrap layer: the one crate in this workspace allowed to touch argv,
//! stdio, process signals, and `std::process::exit`. Everything downstream
//! of [`run`] only ever sees an immutable `Config` and a resolved path list.
//!
//! ## Module structure
//!
//! - `cli` — argument parsing
//! - `config` — CLI-to-`Config` translation
//! - `exit_code` — exit status mapping
//! - `logger` — `tracing-subscriber` setup
//! - `signals` — SIGINT/SIGTERM handling

pub mod cli;
pub mod config;
pub mod exit_code;
pub mod logger;
pub mod signals;

use std::path::PathBuf;

use clap::Parser;
use topmark_domain::{builtins, FileTypeRegistry, RunResult};

use crate::cli::Cli;
use crate::exit_code::ExitCode;

/// Parses `args`, validates the input paths, runs the engine, and returns
/// the resulting exit code plus the batch's [`RunResult`] (useful to callers
/// that want to print a summary without re-running anything).
///
/// `args` includes the program name at index 0, matching `std::env::args()`.
pub fn run<I, T>(args: I) -> (ExitCode, Option<RunResult>)
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return (ExitCode::UsageError, None);
        }
    };

    logger::init(logger::Verbosity::from_count(cli.verbose));
    signals::install();

    let paths = match resolve_paths(&cli.paths) {
        Ok(paths) => paths,
        Err(message) => {
            tracing::error!("{message}");
            return (ExitCode::UsageError, None);
        }
    };

    let config = match config::build_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("invalid configuration: {err}");
            return (ExitCode::UsageError, None);
        }
    };

    let file_types = match FileTypeRegistry::build(builtins::catalog()) {
        Ok(registry) => registry,
        Err(err) => {
            tracing::error!("failed to build file type registry: {err}");
            return (ExitCode::Failure, None);
        }
    };
    let processors = topmark::registry::ProcessorRegistry::from_file_types(&file_types);

    let result = topmark::run_batch(&paths, &config, &file_types, &processors);

    for ctx in &result.contexts {
        for diagnostic in &ctx.diagnostics {
            tracing::warn!(path = %ctx.path.display(), "{}", diagnostic.message);
        }
    }

    let exit_code = if signals::is_shutdown_requested() {
        ExitCode::Interrupted
    } else {
        ExitCode::from_run_result(&result)
    };
    (exit_code, Some(result))
}

/// Confirms every path names an existing file (not a directory, not
/// missing) before handing the list to the engine — the Resolver step
/// assumes its input already exists.
fn resolve_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>, String> {
    for path in paths {
        let metadata = std::fs::metadata(path).map_err(|err| format!("cannot access {}: {err}", path.display()))?;
        if !metadata.is_file() {
            return Err(format!("{} is not a file", path.display()));
        }
    }
    Ok(paths.to_vec())
}
