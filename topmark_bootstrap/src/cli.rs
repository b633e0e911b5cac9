//! Minimal `clap`-derived CLI: enough to drive the engine end to end
//! (which files, strip vs. sync, apply vs. preview, where output goes) but
//! none of the layered TOML/`pyproject.toml` configuration discovery the
//! core explicitly leaves to an external collaborator.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "topmark", about = "Insert, update, verify, or strip file header blocks")]
pub struct Cli {
    /// Files to process.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Write changes to disk. Without this flag, runs in preview/check mode.
    #[arg(long)]
    pub apply: bool,

    /// Remove existing headers instead of inserting/updating them.
    #[arg(long)]
    pub strip: bool,

    /// Print the processed file contents to stdout instead of writing them back.
    #[arg(long)]
    pub stdout: bool,

    /// `key=value` header fields, repeatable; declaration order is preserved.
    #[arg(long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,

    /// How a header block is rendered.
    #[arg(long, value_enum, default_value = "native")]
    pub format: OutputFormat,

    /// Overwrite files in place rather than via the atomic temp-file-and-rename sink.
    #[arg(long)]
    pub inplace: bool,

    /// Increase log verbosity (`-v`, `-vv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Native,
    Plain,
    Json,
}

/// A `--field` argument split into its key and value.
///
/// # Errors
///
/// Returns the offending argument string if it has no `=`.
pub fn parse_field(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("invalid --field '{arg}', expected KEY=VALUE")),
    }
}
