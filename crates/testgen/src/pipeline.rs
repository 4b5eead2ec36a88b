//! Single-file pipelines and input selection.
//!
//! Each function handles exactly one input and reports what happened to it;
//! batching, progress output and exit status belong to the caller.

use crate::classifier::StepClassifier;
use crate::config::{base_name, ProjectLayout, STEP_MAP_SUFFIX};
use crate::feature::FeatureSource;
use crate::generator::CodeGenerator;
use crate::lexical::LexicalClassifier;
use crate::result::{TestgenError, TestgenResult};
use crate::step_map::StepMap;
use crate::writer::{ensure_base_page, write_all, WriteOptions, WriteOutcome};
use std::path::{Path, PathBuf};

/// Outcome for one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Input path
    pub input: PathBuf,
    /// Feature base name
    pub base_name: String,
    /// What happened to the outputs
    pub outcome: WriteOutcome,
}

/// Resolve the inputs a command should process.
///
/// With `all`, every file in `dir` ending in `suffix`, sorted by name.
/// Named inputs are taken relative to `dir`, and the suffix is appended
/// when missing. Named files are not checked for existence here, so a
/// missing one surfaces as a per-file failure.
pub fn select_inputs(dir: &Path, suffix: &str, all: bool, names: &[String]) -> TestgenResult<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    if all {
        if !dir.is_dir() {
            return Err(TestgenError::NotFound {
                path: dir.to_path_buf(),
            });
        }
        let mut found: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && base_name(path, suffix).is_some())
            .collect();
        found.sort();
        inputs.extend(found);
    }
    for name in names {
        let file = if name.ends_with(suffix) {
            name.clone()
        } else {
            format!("{name}{suffix}")
        };
        let path = dir.join(file);
        if !inputs.contains(&path) {
            inputs.push(path);
        }
    }
    Ok(inputs)
}

/// Classify one feature file and persist its StepMap.
pub fn classify_file<L: LexicalClassifier>(
    path: &Path,
    layout: &ProjectLayout,
    classifier: &StepClassifier<L>,
    options: WriteOptions,
) -> TestgenResult<FileReport> {
    let feature = FeatureSource::load(path)?;
    let map = feature.classify(classifier);
    let target = layout.step_map_path(&feature.base_name);
    let outcome = write_all(&[(target, map.to_json())], options)?;
    log_outcome(&feature.base_name, &outcome);
    Ok(FileReport {
        input: path.to_path_buf(),
        base_name: feature.base_name,
        outcome,
    })
}

/// Generate the page object and spec for one StepMap file.
///
/// Once the pair is written, the shared base class is created alongside
/// when missing.
pub fn generate_file<L: LexicalClassifier>(
    path: &Path,
    layout: &ProjectLayout,
    generator: &CodeGenerator<L>,
    options: WriteOptions,
) -> TestgenResult<FileReport> {
    let base = base_name(path, STEP_MAP_SUFFIX).ok_or_else(|| TestgenError::UnsupportedInput {
        path: path.to_path_buf(),
        expected: STEP_MAP_SUFFIX,
    })?;
    let map = StepMap::load(path)?;
    let pair = generator.generate(&base, &map)?;

    let files = [
        (layout.page_object_path(&base), pair.page_object),
        (layout.spec_path(&base), pair.test_spec),
    ];
    let outcome = write_all(&files, options)?;
    if matches!(outcome, WriteOutcome::Written(_)) {
        ensure_base_page(&layout.page_object_dir)?;
    }
    log_outcome(&base, &outcome);
    Ok(FileReport {
        input: path.to_path_buf(),
        base_name: base,
        outcome,
    })
}

fn log_outcome(base_name: &str, outcome: &WriteOutcome) {
    match outcome {
        WriteOutcome::Written(paths) => tracing::info!(base_name, files = paths.len(), "generated"),
        WriteOutcome::Skipped { existing } => {
            tracing::info!(base_name, existing = %existing.display(), "skipped");
        }
        WriteOutcome::Preview(paths) => tracing::info!(base_name, files = paths.len(), "dry run"),
    }
}
