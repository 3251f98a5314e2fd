//! Gridcal calibrates an external grid simulator against recorded job
//! traces by random search over its CPU-speed parameters.

/// The command line interface and relevant structures.
pub mod cli;

/// Running one calibration trial against the external simulator.
pub mod runner;

/// The random search over the CPU-speed parameter space.
pub mod search;

/// Convenience functions for unit tests.
#[cfg(test)]
pub mod test_utils;

/// The main CLI entry-point of the `gridcal` utility.
///
/// This function parses command-line arguments and executes
/// sub-commands as specified by the user.
fn main() {
    cli::process::parse_command();
}
