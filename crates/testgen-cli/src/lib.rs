//! testgen CLI library
//!
//! Command-line front end for the testgen pipeline: `steps` classifies
//! feature files into StepMaps, `tests` turns StepMaps into Playwright page
//! objects and specs.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod handlers;
mod output;

pub use commands::{Cli, ColorArg, Commands, SelectionArgs, StepsArgs, TestsArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{BatchTally, LineKind, ProgressReporter};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the filter follows the verbosity.
pub fn init_logging(verbosity: Verbosity) -> CliResult<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_directive()));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| CliError::logging(e.to_string()))
}

/// Build configuration from the parsed flags
#[must_use]
pub fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(cli.color.clone().into())
        .with_root(&cli.root)
}

/// Run a parsed command line
pub fn run(cli: Cli) -> CliResult<()> {
    let config = build_config(&cli);
    init_logging(config.verbosity)?;
    tracing::debug!(?config, "starting");

    match cli.command {
        Commands::Steps(args) => handlers::execute_steps(&config, &args),
        Commands::Tests(args) => handlers::execute_tests(&config, &args),
    }
}
