//! `testgen tests`: StepMaps to page objects and specs

use super::{batch_status, reporter_for, resolve_layout, run_batch, watch_loop};
use crate::commands::TestsArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use testgen::{generate_file, select_inputs, CodeGenerator, WriteOptions, STEP_MAP_SUFFIX};

/// Execute the tests command
pub fn execute_tests(config: &CliConfig, args: &TestsArgs) -> CliResult<()> {
    let selection = &args.selection;
    if !selection.has_selection() {
        return Err(CliError::NoInputSelected);
    }

    let mut layout = resolve_layout(config, selection);
    if let Some(dir) = &args.output_dir {
        layout = layout.with_output_dir(dir);
    }
    let generator = CodeGenerator::new();
    let inputs = select_inputs(&layout.step_map_dir, STEP_MAP_SUFFIX, selection.all, &selection.files)?;
    let mut reporter = reporter_for(config);

    if inputs.is_empty() {
        reporter.info(&format!("no *{STEP_MAP_SUFFIX} files in {}", layout.step_map_dir.display()));
    }
    let options = WriteOptions::force(selection.force).with_dry_run(args.dry_run);
    let tally = run_batch(&mut reporter, &inputs, |path| {
        generate_file(path, &layout, &generator, options)
    });

    if selection.watch {
        let rerun = WriteOptions::force(true).with_dry_run(args.dry_run);
        return watch_loop(&mut reporter, &layout.step_map_dir, STEP_MAP_SUFFIX, |path| {
            generate_file(path, &layout, &generator, rerun)
        });
    }
    batch_status(&tally)
}
