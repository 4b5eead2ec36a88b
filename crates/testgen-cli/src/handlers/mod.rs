//! Command handlers - extracted from main.rs for testability
//!
//! Each stage runs its inputs one at a time; a failing input is reported
//! and the batch moves on. Watch mode then reruns the single-file pipeline
//! for every changed input, always overwriting.

pub mod generate;
pub mod steps;

pub use generate::execute_tests;
pub use steps::execute_steps;

use crate::commands::SelectionArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{BatchTally, ProgressReporter};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use testgen::{FileReport, FileWatcher, TestgenResult, WatchConfig, WatchStats};

const WATCH_POLL: Duration = Duration::from_millis(100);

/// Project layout after applying `--root` and the directory overrides
#[must_use]
pub fn resolve_layout(config: &CliConfig, selection: &SelectionArgs) -> testgen::ProjectLayout {
    let mut layout = testgen::ProjectLayout::from_root(&config.root);
    if let Some(dir) = &selection.features_dir {
        layout = layout.with_feature_dir(dir);
    }
    if let Some(dir) = &selection.step_maps_dir {
        layout = layout.with_step_map_dir(dir);
    }
    layout
}

/// Reporter configured from the CLI flags
#[must_use]
pub fn reporter_for(config: &CliConfig) -> ProgressReporter {
    ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet())
}

/// Process `inputs` in order, reporting each one.
pub fn run_batch<F>(reporter: &mut ProgressReporter, inputs: &[PathBuf], mut process: F) -> BatchTally
where
    F: FnMut(&Path) -> TestgenResult<FileReport>,
{
    let started = Instant::now();
    let mut tally = BatchTally::default();
    reporter.start_progress(inputs.len() as u64, "processing");
    for input in inputs {
        match process(input) {
            Ok(report) => {
                tally.record(&report.outcome);
                reporter.report(&report);
            }
            Err(e) => {
                tracing::debug!(input = %input.display(), error = ?e, "input failed");
                tally.record_failure();
                reporter.failure(&format!("{}: {e}", input.display()));
            }
        }
        reporter.increment(1);
    }
    reporter.finish();
    reporter.summary(&tally, started.elapsed());
    tally
}

/// Exit status for a finished batch: skips are fine, failures are not.
pub fn batch_status(tally: &BatchTally) -> CliResult<()> {
    if tally.failed > 0 {
        return Err(CliError::BatchFailed {
            failed: tally.failed,
            total: tally.total(),
        });
    }
    Ok(())
}

/// Rerun `process` for every changed input under `dir` until the process
/// is terminated. Only returns if the watcher cannot start.
pub fn watch_loop<F>(reporter: &mut ProgressReporter, dir: &Path, suffix: &str, mut process: F) -> CliResult<()>
where
    F: FnMut(&Path) -> TestgenResult<FileReport>,
{
    let mut watcher = FileWatcher::new(WatchConfig::new(dir, suffix));
    watcher.start()?;
    let mut stats = WatchStats::new();
    reporter.info(&format!("watching {} for *{suffix} changes", dir.display()));

    loop {
        let changes = watcher.wait_for_changes(WATCH_POLL);
        let inputs: Vec<PathBuf> = changes
            .into_iter()
            .filter(|change| change.kind.wants_rerun())
            .map(|change| change.path)
            .collect();
        if inputs.is_empty() {
            continue;
        }
        stats.record_trigger(inputs.len());
        tracing::info!(
            trigger = stats.trigger_count,
            changes = inputs.len(),
            "change detected"
        );
        for input in &inputs {
            reporter.info(&format!("detected change: {}", input.display()));
        }
        run_batch(reporter, &inputs, &mut process);
    }
}
