//! Per-input outcome lines and batch progress

use console::{style, Style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use testgen::{FileReport, WriteOutcome};

/// Kind of outcome line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Outputs written
    Generated,
    /// Outputs already present
    Skipped,
    /// Dry run preview
    Preview,
    /// Input failed
    Failed,
    /// Informational
    Info,
}

impl LineKind {
    fn plain_prefix(self) -> &'static str {
        match self {
            Self::Generated => "DONE",
            Self::Skipped => "SKIP",
            Self::Preview => "DRY",
            Self::Failed => "FAIL",
            Self::Info => "INFO",
        }
    }

    fn styled_prefix(self) -> String {
        match self {
            Self::Generated => style("✓").green().bold().to_string(),
            Self::Skipped => style("⚠").yellow().bold().to_string(),
            Self::Preview => style("→").cyan().bold().to_string(),
            Self::Failed => style("✗").red().bold().to_string(),
            Self::Info => style("ℹ").blue().bold().to_string(),
        }
    }
}

/// Counts for the closing summary line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchTally {
    /// Inputs whose outputs were written
    pub generated: usize,
    /// Inputs skipped because outputs existed
    pub skipped: usize,
    /// Inputs previewed in dry-run mode
    pub previewed: usize,
    /// Inputs that failed
    pub failed: usize,
}

impl BatchTally {
    /// Count one report
    pub fn record(&mut self, outcome: &WriteOutcome) {
        match outcome {
            WriteOutcome::Written(_) => self.generated += 1,
            WriteOutcome::Skipped { .. } => self.skipped += 1,
            WriteOutcome::Preview(_) => self.previewed += 1,
        }
    }

    /// Count one failure
    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    /// All inputs seen
    #[must_use]
    pub const fn total(&self) -> usize {
        self.generated + self.skipped + self.previewed + self.failed
    }
}

/// Progress reporter for batch runs
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    progress_bar: Option<ProgressBar>,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            progress_bar: None,
            use_color,
            quiet,
        }
    }

    /// Start a progress bar; single inputs get none.
    pub fn start_progress(&mut self, total: u64, message: &str) {
        if self.quiet || total < 2 || !self.term.is_term() {
            return;
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb.set_message(message.to_string());
        self.progress_bar = Some(pb);
    }

    /// Increment progress
    pub fn increment(&self, delta: u64) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(delta);
        }
    }

    /// Finish and remove the progress bar
    pub fn finish(&mut self) {
        if let Some(pb) = self.progress_bar.take() {
            pb.finish_and_clear();
        }
    }

    /// Format one line without printing it
    #[must_use]
    pub fn format_line(&self, kind: LineKind, message: &str) -> String {
        let prefix = if self.use_color {
            kind.styled_prefix()
        } else {
            kind.plain_prefix().to_string()
        };
        format!("{prefix} {message}")
    }

    /// Outcome line for one processed input
    #[must_use]
    pub fn report_line(&self, report: &FileReport) -> (LineKind, String) {
        let name = &report.base_name;
        match &report.outcome {
            WriteOutcome::Written(paths) => (
                LineKind::Generated,
                format!("{name}: generated {}", join_paths(paths)),
            ),
            WriteOutcome::Skipped { existing } => (
                LineKind::Skipped,
                format!(
                    "{name}: skipped, {} already exists (use --force to overwrite)",
                    existing.display()
                ),
            ),
            WriteOutcome::Preview(paths) => (
                LineKind::Preview,
                format!("{name}: would write {}", join_paths(paths)),
            ),
        }
    }

    /// Print the outcome of one input
    pub fn report(&self, report: &FileReport) {
        let (kind, message) = self.report_line(report);
        self.emit(kind, &message);
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // Always print failures, even in quiet mode
        self.write(&self.format_line(LineKind::Failed, message));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        self.emit(LineKind::Info, message);
    }

    /// Print the closing summary
    pub fn summary(&self, tally: &BatchTally, duration: Duration) {
        if self.quiet && tally.failed == 0 {
            return;
        }

        let line = format!(
            "{} input(s) in {:.2}s ({} generated, {} skipped, {} dry-run, {} failed)",
            tally.total(),
            duration.as_secs_f64(),
            tally.generated,
            tally.skipped,
            tally.previewed,
            tally.failed
        );
        let status = if self.use_color {
            if tally.failed > 0 {
                Style::new().red().bold().apply_to("FAILED").to_string()
            } else {
                Style::new().green().bold().apply_to("OK").to_string()
            }
        } else if tally.failed > 0 {
            "FAILED".to_string()
        } else {
            "OK".to_string()
        };
        self.write(&format!("{status} {line}"));
    }

    fn emit(&self, kind: LineKind, message: &str) {
        if self.quiet {
            return;
        }
        self.write(&self.format_line(kind, message));
    }

    fn write(&self, line: &str) {
        match self.progress_bar {
            Some(ref pb) => pb.suspend(|| {
                let _ = self.term.write_line(line);
            }),
            None => {
                let _ = self.term.write_line(line);
            }
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
