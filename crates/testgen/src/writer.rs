//! Output policy: skip, overwrite or preview, and all-or-nothing writes.

use crate::generator::{BASE_PAGE_FILE, BASE_PAGE_SOURCE};
use crate::result::TestgenResult;
use std::path::{Path, PathBuf};

/// How existing outputs are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Replace existing outputs
    pub force: bool,
    /// Report targets without touching the file system
    pub dry_run: bool,
}

impl WriteOptions {
    /// Overwrite policy from a flag.
    #[must_use]
    pub const fn force(force: bool) -> Self {
        Self {
            force,
            dry_run: false,
        }
    }

    /// Set preview mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// What happened to one set of outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// All files were written
    Written(Vec<PathBuf>),
    /// An output already existed and overwrite was not requested
    Skipped {
        /// The first existing output found
        existing: PathBuf,
    },
    /// Dry run: these files would have been written
    Preview(Vec<PathBuf>),
}

/// Write a set of files together.
///
/// Without `force`, any existing target skips the whole set before anything
/// is touched. Contents are staged in hidden `.tmp` siblings and renamed into
/// place only after every stage succeeded.
pub fn write_all(files: &[(PathBuf, String)], options: WriteOptions) -> TestgenResult<WriteOutcome> {
    if !options.force {
        if let Some((existing, _)) = files.iter().find(|(path, _)| path.exists()) {
            return Ok(WriteOutcome::Skipped {
                existing: existing.clone(),
            });
        }
    }

    let targets: Vec<PathBuf> = files.iter().map(|(path, _)| path.clone()).collect();
    if options.dry_run {
        return Ok(WriteOutcome::Preview(targets));
    }

    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(files.len());
    for (path, contents) in files {
        match stage(path, contents) {
            Ok(tmp) => staged.push((tmp, path.as_path())),
            Err(e) => {
                discard(&staged);
                return Err(e);
            }
        }
    }
    for (i, (tmp, path)) in staged.iter().enumerate() {
        if let Err(e) = std::fs::rename(tmp, path) {
            discard(&staged[i..]);
            return Err(e.into());
        }
        tracing::debug!(path = %path.display(), "wrote");
    }
    Ok(WriteOutcome::Written(targets))
}

fn discard(staged: &[(PathBuf, &Path)]) {
    for (tmp, _) in staged {
        let _ = std::fs::remove_file(tmp);
    }
}

fn stage(path: &Path, contents: &str) -> TestgenResult<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let name = path
        .file_name()
        .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
    let tmp = path.with_file_name(format!(".{name}.tmp"));
    std::fs::write(&tmp, contents)?;
    Ok(tmp)
}

/// Create the shared base class in `page_object_dir` when it is missing.
///
/// Returns whether it was written; an existing file is never replaced.
pub fn ensure_base_page(page_object_dir: &Path) -> TestgenResult<bool> {
    let path = page_object_dir.join(BASE_PAGE_FILE);
    if path.exists() {
        return Ok(false);
    }
    std::fs::create_dir_all(page_object_dir)?;
    std::fs::write(&path, BASE_PAGE_SOURCE)?;
    tracing::info!(path = %path.display(), "created base page class");
    Ok(true)
}
