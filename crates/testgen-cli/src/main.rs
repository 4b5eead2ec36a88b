//! testgen: Gherkin features to Playwright tests
//!
//! ## Usage
//!
//! ```bash
//! testgen steps --all                 # features/*.feature -> stepMaps/
//! testgen steps --file login --force  # one feature, overwrite
//! testgen tests --all --dry-run       # list what would be generated
//! testgen tests --all --watch         # regenerate on StepMap changes
//! ```

use clap::Parser;
use std::process::ExitCode;
use testgen_cli::Cli;

fn main() -> ExitCode {
    match testgen_cli::run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
