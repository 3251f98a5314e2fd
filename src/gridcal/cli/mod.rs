/// The clap definition of the command line.
pub mod def;

/// The log output tokens.
pub mod log;

/// Printing helpers for the terminal.
pub mod printing;

/// Processing of the parsed command line.
pub mod process;
