use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;

use crate::constants::JOBS_PER_TRIAL_DEFAULT;
use crate::constants::TRIALS_DEFAULT;
use crate::error::ctx;
use crate::error::Ctx;
use crate::file_system::FileOperations;

/// A config struct used throughout the `gridcal` application.
///
/// Everything the search loop and the runner touch is named here, so a test
/// setup can point the whole tool at a temporary directory and a fake
/// simulator executable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CalibrationConfig {
    //
    // Basic settings.
    //
    /// The path to the simulator executable.
    pub simulator: PathBuf,

    /// The path to the JSON configuration file the simulator is started with.
    pub simulator_config: PathBuf,

    /// The path to the JSON site descriptor file read by the simulator.
    pub site_info: PathBuf,

    /// The folder in which the simulator places its output artifacts.
    pub output_folder: PathBuf,

    /// The job trace fed to the simulator on every trial.
    pub input_job_csv: PathBuf,

    /// The name of the site being calibrated.
    pub site: String,

    //
    // Advanced settings.
    //
    /// The number of random-search trials to run.
    #[serde(default = "TRIALS_DEFAULT")]
    pub trials: usize,

    /// The number of jobs the simulator schedules per trial.
    #[serde(default = "JOBS_PER_TRIAL_DEFAULT")]
    pub jobs_per_trial: usize,
}

impl CalibrationConfig {
    /// Load a `CalibrationConfig` instance from a TOML file at the provided
    /// path.
    pub fn from_file<F: FileOperations>(path: &Path, fs: &F) -> Result<CalibrationConfig> {
        toml::from_str(&fs.read_utf8(path)?).with_context(ctx!(
          "Could not parse {path:?}", ;
          "A commented example lives in gridcal.toml at the repository root",
        ))
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
