use std::env;
use std::process::exit;

use anyhow::anyhow;
use anyhow::Context;
use anyhow::Result;
use clap::CommandFactory;
use clap::FromArgMatches;
use colog::default_builder;
use colog::formatter;
use gridcal_lib::config::CalibrationConfig;
use gridcal_lib::constants::ERROR_STYLE;
use gridcal_lib::constants::PRIMARY_STYLE;
use gridcal_lib::ctx;
use gridcal_lib::error::Ctx;
use gridcal_lib::file_system::FileSystemInteractor;
use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;
use log::debug;
use log::info;
use log::trace;
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::log::LogTokens;
use super::printing::get_styles;
use crate::cli::def::Cli;
use crate::cli::def::GridcalCommand;
use crate::cli::printing::generate_progress_bar;
use crate::cli::printing::print_version;
use crate::search::random_search;

/// This function parses the command that gridcal was run with.
pub fn parse_command() {
    let styled = Cli::command().styles(get_styles()).get_matches();

    // This unwrap will print the error if the command is wrong.
    let command = Cli::from_arg_matches(&styled).unwrap();

    // https://github.com/rust-lang/rust/blob/master/library/std/src/backtrace.rs
    let backtrace_enabled = match env::var("RUST_LIB_BACKTRACE") {
        Ok(s) => s != "0",
        Err(_) => match env::var("RUST_BACKTRACE") {
            Ok(s) => s != "0",
            Err(_) => false,
        },
    };

    if backtrace_enabled {
        eprintln!("{:?}", process_command(&command));
    } else if let Err(e) = process_command(&command) {
        eprintln!("{}error:{:#} {}", ERROR_STYLE, ERROR_STYLE, e.root_cause());
        eprint!("{}", e);
        exit(1);
    }
}

/// CLAP has parsed the command, now we process it.
pub fn process_command(cmd: &Cli) -> Result<()> {
    let progress = setup_logging(cmd)?;

    let file_system = FileSystemInteractor { dry_run: cmd.dry };

    match cmd.command {
        GridcalCommand::Run(args) => {
            debug!("Reading the config: {:?}", cmd.config);

            let mut config = CalibrationConfig::from_file(&cmd.config, &file_system)?;

            if let Some(trials) = args.trials {
                config.trials = trials;
            }

            trace!("The config is: {config:#?}");

            if cmd.dry {
                info!(
                    "Would have run {} trials against {:?} (dry)",
                    config.trials, config.simulator
                );
                return Ok(());
            }

            let mut rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            let bar = progress.add(generate_progress_bar(config.trials as u64)?);

            let best = random_search(&config, &file_system, &mut rng, &bar)?;

            bar.finish();
            progress.remove(&bar);
            progress.clear()?;

            match best {
                Some(trial) => {
                    info!("Best configuration found:");
                    info!("{PRIMARY_STYLE}{trial}{PRIMARY_STYLE:#}");
                }
                None => {
                    info!("No trial produced usable data");
                    info!(
                        "Check that the simulator can read its input trace \
                        and write to the output folder"
                    );
                }
            }
        }

        GridcalCommand::Version => print_version(cmd.script),
    }

    Ok(())
}

/// Prepare the log levels for the application.
fn setup_logging(cmd: &Cli) -> Result<MultiProgress> {
    let mut log_build = default_builder();
    log_build.format(formatter(LogTokens));

    let bar = MultiProgress::new();

    if cmd.verbose == 2 {
        log_build.filter(None, LevelFilter::Trace);
    } else if cmd.verbose == 1 {
        log_build.filter(None, LevelFilter::Debug);
    } else if cmd.verbose == 0 {
        log_build.filter(None, LevelFilter::Info);
    } else {
        return Err(anyhow!("Only two levels of verbosity supported (ie. -vv)")).context("");
    }

    LogWrapper::new(bar.clone(), log_build.build())
        .try_init()
        .with_context(ctx!(
            "Failed to initialize the command line interface", ;
            "Make sure you are using a supported terminal",
        ))?;

    Ok(bar)
}
