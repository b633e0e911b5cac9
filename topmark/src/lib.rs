//! Header processing engine: the per-file pipeline (see [`steps`]) plus the
//! glue that runs it over a batch of paths.
//!
//! Everything here is synchronous and `Sync`-safe; cross-file parallelism is
//! `rayon`, not async I/O — files are independent units of work, not chunks
//! of one I/O-bound stream, so a thread-pool `par_iter` fits better than a
//! task-per-file executor.

pub mod processors;
pub mod registry;
pub mod sinks;
pub mod steps;

use std::path::PathBuf;

use rayon::prelude::*;
use topmark_domain::{Config, FileTypeRegistry, FileWriteStrategy, OutputTarget, ProcessingContext, RunResult};

use crate::registry::ProcessorRegistry;
use crate::sinks::{AtomicFileSink, InplaceFileSink, NullSink, StdoutSink, WriteSink};
use crate::steps::{Runner, StepEnv};

/// Picks the write sink implied by `config`, mirroring the precedence a
/// reader would expect: stdout target wins outright, otherwise apply mode
/// picks atomic vs. in-place, and a dry run writes nowhere.
fn sink_for(config: &Config) -> Box<dyn WriteSink> {
    match config.output_target {
        OutputTarget::Stdout => Box::new(StdoutSink),
        OutputTarget::File if config.apply_changes => match config.file_write_strategy {
            FileWriteStrategy::Atomic => Box::new(AtomicFileSink),
            FileWriteStrategy::Inplace => Box::new(InplaceFileSink),
        },
        OutputTarget::File => Box::new(NullSink),
    }
}

/// Runs the full pipeline over every path in `paths`, in parallel, and
/// collects the per-file results into one [`RunResult`].
///
/// `file_types` and `processors` are shared read-only across the batch;
/// `config` is frozen before this is ever called. A single [`Runner`] and
/// [`StepEnv`] are built once and reused for every file, since neither holds
/// any per-file state.
pub fn run_batch(
    paths: &[PathBuf],
    config: &Config,
    file_types: &FileTypeRegistry,
    processors: &ProcessorRegistry,
) -> RunResult {
    let sink = sink_for(config);
    let runner = Runner::new();
    let env = StepEnv { config, file_types, processors, sink: sink.as_ref() };

    let contexts: Vec<ProcessingContext> = paths
        .par_iter()
        .map(|path| {
            let span = tracing::info_span!("process_file", path = %path.display());
            let _guard = span.enter();
            let mut ctx = ProcessingContext::new(path.clone());
            runner.run_file(&mut ctx, &env);
            ctx
        })
        .collect();

    RunResult::new(contexts)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;
    use topmark_domain::{builtins, MutableConfig, Outcome};

    use super::*;

    #[test]
    fn run_batch_inserts_headers_across_multiple_files() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.py");
        let b = dir.path().join("b.py");
        std::fs::write(&a, "print(1)\n").unwrap();
        std::fs::write(&b, "print(2)\n").unwrap();

        let file_types = FileTypeRegistry::build(builtins::catalog()).unwrap();
        let processors = ProcessorRegistry::from_file_types(&file_types);
        let mut mutable = MutableConfig::builder();
        mutable.apply_changes = Some(true);
        mutable.header_fields = vec!["project".to_string()];
        mutable.field_values = [("project".to_string(), "TopMark".to_string())].into_iter().collect();
        let config = mutable.freeze().unwrap();

        let result = run_batch(&[a.clone(), b.clone()], &config, &file_types, &processors);

        assert_eq!(result.contexts.len(), 2);
        assert_eq!(result.count_by_outcome(Outcome::Changed), 2);
        assert!(std::fs::read_to_string(&a).unwrap().starts_with("#"));
        assert!(std::fs::read_to_string(&b).unwrap().starts_with("#"));
    }

    #[test]
    fn run_batch_dry_run_never_touches_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("x.py");
        std::fs::write(&path, "print(1)\n").unwrap();

        let file_types = FileTypeRegistry::build(builtins::catalog()).unwrap();
        let processors = ProcessorRegistry::from_file_types(&file_types);
        let mut mutable = MutableConfig::builder();
        mutable.header_fields = vec!["project".to_string()];
        mutable.field_values = [("project".to_string(), "TopMark".to_string())].into_iter().collect();
        let config = mutable.freeze().unwrap();

        let result = run_batch(&[path.clone()], &config, &file_types, &processors);

        assert_eq!(result.count_by_outcome(Outcome::WouldChange), 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "print(1)\n");
    }

    #[test]
    fn run_batch_reports_failure_for_unreadable_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.py");

        let file_types = FileTypeRegistry::build(builtins::catalog()).unwrap();
        let processors = ProcessorRegistry::from_file_types(&file_types);
        let config = MutableConfig::builder().freeze().unwrap();

        let result = run_batch(&[missing], &config, &file_types, &processors);

        assert!(result.any_failed());
    }
}
