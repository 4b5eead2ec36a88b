//! `testgen steps`: feature files to StepMaps

use super::{batch_status, reporter_for, resolve_layout, run_batch, watch_loop};
use crate::commands::StepsArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use testgen::{classify_file, select_inputs, SelectorConfig, StepClassifier, WriteOptions, FEATURE_SUFFIX};

/// Execute the steps command
pub fn execute_steps(config: &CliConfig, args: &StepsArgs) -> CliResult<()> {
    let selection = &args.selection;
    if !selection.has_selection() {
        return Err(CliError::NoInputSelected);
    }

    let layout = resolve_layout(config, selection);
    let classifier = StepClassifier::new(SelectorConfig::load(&layout)?);
    let inputs = select_inputs(&layout.feature_dir, FEATURE_SUFFIX, selection.all, &selection.files)?;
    let mut reporter = reporter_for(config);

    if inputs.is_empty() {
        reporter.info(&format!("no *{FEATURE_SUFFIX} files in {}", layout.feature_dir.display()));
    }
    let options = WriteOptions::force(selection.force);
    let tally = run_batch(&mut reporter, &inputs, |path| {
        classify_file(path, &layout, &classifier, options)
    });

    if selection.watch {
        return watch_loop(&mut reporter, &layout.feature_dir, FEATURE_SUFFIX, |path| {
            classify_file(path, &layout, &classifier, WriteOptions::force(true))
        });
    }
    batch_status(&tally)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::commands::SelectionArgs;
    use crate::config::{ColorChoice, Verbosity};
    use tempfile::TempDir;

    fn config(root: &std::path::Path) -> CliConfig {
        CliConfig::new()
            .with_root(root)
            .with_verbosity(Verbosity::Quiet)
            .with_color(ColorChoice::Never)
    }

    fn args(selection: SelectionArgs) -> StepsArgs {
        StepsArgs { selection }
    }

    #[test]
    fn test_requires_selection() {
        let dir = TempDir::new().unwrap();
        let err = execute_steps(&config(dir.path()), &args(SelectionArgs::default())).unwrap_err();
        assert!(matches!(err, CliError::NoInputSelected));
    }

    #[test]
    fn test_all_writes_step_maps() {
        let dir = TempDir::new().unwrap();
        let features = dir.path().join("features");
        std::fs::create_dir_all(&features).unwrap();
        std::fs::write(
            features.join("login.feature"),
            "Feature: Login\n\n  Scenario: Login\n    When the user clicks the login button\n",
        )
        .unwrap();

        let selection = SelectionArgs {
            all: true,
            ..SelectionArgs::default()
        };
        execute_steps(&config(dir.path()), &args(selection)).unwrap();
        assert!(dir.path().join("stepMaps/login.stepMap.json").exists());
    }

    #[test]
    fn test_missing_named_file_fails_batch() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("features")).unwrap();
        let selection = SelectionArgs {
            files: vec!["ghost".to_string()],
            ..SelectionArgs::default()
        };
        let err = execute_steps(&config(dir.path()), &args(selection)).unwrap_err();
        assert!(matches!(err, CliError::BatchFailed { failed: 1, total: 1 }));
    }
}
