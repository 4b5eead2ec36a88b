//! Change notifications for continuous regeneration.
//!
//! A [`FileWatcher`] wraps a `notify` watcher on one input directory and
//! hands back debounced, per-path deduplicated batches of changes to files
//! carrying the watched suffix. The caller reruns the single-file pipeline
//! for each change; the watcher itself keeps no other state.

use crate::result::{TestgenError, TestgenResult};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::{Duration, Instant};

/// What to watch and how eagerly to report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    /// Directory holding the inputs
    pub watch_dir: PathBuf,
    /// File-name suffix of inputs (`.feature`, `.stepMap.json`)
    pub suffix: String,
    /// Minimum time between two reported batches, in milliseconds
    pub debounce_ms: u64,
}

impl WatchConfig {
    /// Watch `dir` for files ending in `suffix`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            watch_dir: dir.into(),
            suffix: suffix.into(),
            debounce_ms: 300,
        }
    }

    /// Set debounce duration
    #[must_use]
    pub const fn with_debounce(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Whether a changed path is an input.
    ///
    /// Hidden files are ignored, which also excludes the writer's
    /// `.name.tmp` staging files.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| !name.starts_with('.') && name.ends_with(&self.suffix))
    }
}

/// A file change event
#[derive(Debug, Clone)]
pub struct FileChange {
    /// The changed file path
    pub path: PathBuf,
    /// Type of change
    pub kind: FileChangeKind,
    /// When the event was collected
    pub timestamp: Instant,
}

/// Kind of file change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileChangeKind {
    /// File was created
    Created,
    /// File was modified
    Modified,
    /// File was deleted
    Deleted,
    /// Anything else notify reports
    Other,
}

impl From<EventKind> for FileChangeKind {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Create(_) => Self::Created,
            EventKind::Modify(_) => Self::Modified,
            EventKind::Remove(_) => Self::Deleted,
            EventKind::Any | EventKind::Access(_) | EventKind::Other => Self::Other,
        }
    }
}

impl FileChangeKind {
    /// Whether the file should be (re)processed.
    #[must_use]
    pub const fn wants_rerun(self) -> bool {
        matches!(self, Self::Created | Self::Modified)
    }
}

/// Directory watcher with debounce.
pub struct FileWatcher {
    config: WatchConfig,
    watcher: Option<RecommendedWatcher>,
    receiver: Option<Receiver<Result<Event, notify::Error>>>,
    last_trigger: Option<Instant>,
    pending_changes: Vec<FileChange>,
}

impl FileWatcher {
    /// Create a stopped watcher.
    #[must_use]
    pub const fn new(config: WatchConfig) -> Self {
        Self {
            config,
            watcher: None,
            receiver: None,
            last_trigger: None,
            pending_changes: Vec::new(),
        }
    }

    /// Start watching the configured directory.
    pub fn start(&mut self) -> TestgenResult<()> {
        if !self.config.watch_dir.is_dir() {
            return Err(TestgenError::NotFound {
                path: self.config.watch_dir.clone(),
            });
        }
        let (tx, rx) = channel();
        let watcher_config = Config::default().with_poll_interval(Duration::from_millis(100));

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                // receiver gone means the watcher was stopped
                let _ = tx.send(res);
            },
            watcher_config,
        )
        .map_err(|e| TestgenError::Watch {
            message: format!("failed to create watcher: {e}"),
        })?;

        watcher
            .watch(&self.config.watch_dir, RecursiveMode::NonRecursive)
            .map_err(|e| TestgenError::Watch {
                message: format!("failed to watch {}: {e}", self.config.watch_dir.display()),
            })?;

        tracing::info!(dir = %self.config.watch_dir.display(), suffix = %self.config.suffix, "watching");
        self.watcher = Some(watcher);
        self.receiver = Some(rx);
        Ok(())
    }

    /// Stop watching
    pub fn stop(&mut self) {
        self.watcher = None;
        self.receiver = None;
    }

    /// Collect events without blocking; returns a batch once the debounce
    /// window has passed.
    pub fn check_changes(&mut self) -> Option<Vec<FileChange>> {
        let receiver = self.receiver.as_ref()?;
        let now = Instant::now();

        while let Ok(result) = receiver.try_recv() {
            match result {
                Ok(event) => {
                    let kind = FileChangeKind::from(event.kind);
                    for path in event.paths {
                        if self.config.matches(&path) {
                            self.pending_changes.push(FileChange {
                                path,
                                kind,
                                timestamp: now,
                            });
                        }
                    }
                }
                Err(e) => tracing::warn!(error = %e, "watch error"),
            }
        }

        if self.pending_changes.is_empty() {
            return None;
        }

        let should_trigger = self.last_trigger.map_or(true, |last| {
            now.duration_since(last) >= Duration::from_millis(self.config.debounce_ms)
        });
        if !should_trigger {
            return None;
        }

        self.last_trigger = Some(now);
        let changes = std::mem::take(&mut self.pending_changes);
        Some(dedup_changes(changes))
    }

    /// Block until a batch of changes is available.
    pub fn wait_for_changes(&mut self, poll: Duration) -> Vec<FileChange> {
        loop {
            if let Some(changes) = self.check_changes() {
                return changes;
            }
            std::thread::sleep(poll);
        }
    }

    /// Get the configuration
    #[must_use]
    pub const fn config(&self) -> &WatchConfig {
        &self.config
    }

    /// Check if watcher is running
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.watcher.is_some()
    }
}

impl std::fmt::Debug for FileWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWatcher")
            .field("config", &self.config)
            .field("is_running", &self.is_running())
            .field("pending_changes", &self.pending_changes.len())
            .finish()
    }
}

/// One entry per path, first-seen order, last kind wins.
fn dedup_changes(changes: Vec<FileChange>) -> Vec<FileChange> {
    let mut out: Vec<FileChange> = Vec::with_capacity(changes.len());
    for change in changes {
        if let Some(existing) = out.iter_mut().find(|c| c.path == change.path) {
            existing.kind = change.kind;
        } else {
            out.push(change);
        }
    }
    out
}

/// Counters for a watch session.
#[derive(Debug, Clone, Default)]
pub struct WatchStats {
    /// Batches handled
    pub trigger_count: u64,
    /// Files handled across all batches
    pub change_count: u64,
}

impl WatchStats {
    /// Create new stats
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a trigger
    pub fn record_trigger(&mut self, change_count: usize) {
        self.trigger_count += 1;
        self.change_count += change_count as u64;
    }
}
