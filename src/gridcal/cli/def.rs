use std::path::PathBuf;

use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;

/// Structure of the main command (gridcal).
#[allow(unused)]
#[derive(Parser, Debug)]
#[command(
    about = "Gridcal, a random-search calibrator for grid simulators",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// The main command issued.
    #[command(subcommand)]
    pub command: GridcalCommand,

    /// Disable interactive output, for use in scripts.
    #[arg(short, long, global = true)]
    pub script: bool,

    /// The path to the calibration config file.
    #[arg(short, long, default_value = "./gridcal.toml", global = true)]
    pub config: PathBuf,

    /// Verbose mode, displays debug info. For even more try: -vv.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Dry run, log what would happen but touch nothing.
    #[arg(short, long, global = true)]
    pub dry: bool,
}

/// Enum for the top-level commands.
#[derive(Subcommand, Debug)]
pub enum GridcalCommand {
    /// Run the random-search calibration against the simulator.
    #[command()]
    Run(RunStruct),

    /// Display version information.
    #[command()]
    Version,
}

/// Arguments supplied with the `run` command.
#[derive(Args, Debug, Clone, Copy)]
pub struct RunStruct {
    /// Override the number of trials from the config file.
    #[arg(short, long)]
    pub trials: Option<usize>,

    /// Seed the parameter sampler, for reproducible searches.
    #[arg(long)]
    pub seed: Option<u64>,
}
