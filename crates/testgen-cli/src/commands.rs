//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// testgen: Gherkin features to Playwright page objects and specs
#[derive(Parser, Debug)]
#[command(name = "testgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Project root holding features/, stepMaps/ and tests/
    #[arg(long, default_value = ".", global = true)]
    pub root: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify feature steps into StepMap files
    Steps(StepsArgs),

    /// Generate page objects and specs from StepMap files
    Tests(TestsArgs),
}

/// Input selection shared by both stages
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Process every input in the source directory
    #[arg(long)]
    pub all: bool,

    /// Process the named inputs (suffix optional)
    #[arg(long = "file", num_args = 1.., value_name = "NAME")]
    pub files: Vec<String>,

    /// Overwrite existing outputs
    #[arg(long)]
    pub force: bool,

    /// Rerun on every change in the source directory
    #[arg(short, long)]
    pub watch: bool,

    /// Directory holding *.feature files
    #[arg(long, value_name = "DIR")]
    pub features_dir: Option<PathBuf>,

    /// Directory holding *.stepMap.json files
    #[arg(long, value_name = "DIR")]
    pub step_maps_dir: Option<PathBuf>,
}

impl SelectionArgs {
    /// Whether anything was selected
    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.all || !self.files.is_empty()
    }
}

/// Arguments for the steps command
#[derive(Args, Debug, Clone, Default)]
pub struct StepsArgs {
    /// Input selection
    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Arguments for the tests command
#[derive(Args, Debug, Clone, Default)]
pub struct TestsArgs {
    /// Input selection
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Print the target paths without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Directory receiving pageobjects/ and specs/
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
