use std::process::Command;

use anyhow::Context;
use anyhow::Result;
use gridcal_lib::config::CalibrationConfig;
use gridcal_lib::constants::KEY_CPU_MIN_MAX;
use gridcal_lib::constants::KEY_INPUT_JOB_CSV;
use gridcal_lib::constants::KEY_NUM_OF_JOBS;
use gridcal_lib::constants::KEY_OUTPUT_DB;
use gridcal_lib::constants::KEY_SITES;
use gridcal_lib::constants::KEY_SPEED_PRECISION;
use gridcal_lib::constants::SIMULATOR_CONFIG_FLAG;
use gridcal_lib::ctx;
use gridcal_lib::error::Ctx;
use gridcal_lib::file_system::FileOperations;
use gridcal_lib::metrics::metrics_from_table;
use gridcal_lib::metrics::TrialMetrics;
use gridcal_lib::simulator::patch_document;
use gridcal_lib::simulator::set_site_cpu_speed;
use gridcal_lib::simulator::Artifacts;
use log::debug;
use log::warn;
use serde_json::json;
use serde_json::Map;

use crate::search::TrialParams;

/// Runs single calibration trials against the external simulator.
#[derive(Debug, Clone, Copy)]
pub struct SimulationRunner<'a, F> {
    /// The calibration setup this runner executes trials for.
    config: &'a CalibrationConfig,

    /// The file system used for all document rewrites.
    fs: &'a F,
}

impl<'a, F: FileOperations> SimulationRunner<'a, F> {
    /// Create a runner for one calibration setup.
    pub fn new(config: &'a CalibrationConfig, fs: &'a F) -> Self {
        SimulationRunner { config, fs }
    }

    /// Run the simulator once with the sampled parameters.
    ///
    /// The returned metrics are [TrialMetrics::no_data] when the simulator
    /// left no readable job table behind, a broken run is not an error.
    /// Failing to rewrite the simulator's documents or to start the binary
    /// at all is one.
    pub fn run_trial(&self, params: &TrialParams, tag: &str) -> Result<TrialMetrics> {
        let artifacts = Artifacts::new(&self.config.output_folder, &self.config.site, tag);

        self.prepare_documents(params, &artifacts)?;

        self.invoke_simulator()?;

        let metrics = if artifacts.table.exists() {
            match metrics_from_table(&artifacts.table) {
                Ok(metrics) => metrics,
                Err(error) => {
                    warn!("Could not read the output of run {tag}: {error:#}");
                    TrialMetrics::no_data()
                }
            }
        } else {
            warn!(
                "The simulator left no job table at {:?}, scoring run {tag} as unusable",
                artifacts.table
            );
            TrialMetrics::no_data()
        };

        self.clean_artifacts(&artifacts)?;

        Ok(metrics)
    }

    /// Merge the per-run keys into the simulator's documents.
    fn prepare_documents(&self, params: &TrialParams, artifacts: &Artifacts) -> Result<()> {
        let mut overrides = Map::new();
        overrides.insert(
            KEY_NUM_OF_JOBS.to_string(),
            json!(self.config.jobs_per_trial),
        );
        overrides.insert(KEY_CPU_MIN_MAX.to_string(), json!(params.cpu_min_max));
        overrides.insert(
            KEY_SPEED_PRECISION.to_string(),
            json!(params.speed_precision),
        );
        overrides.insert(KEY_SITES.to_string(), json!([self.config.site]));
        overrides.insert(KEY_OUTPUT_DB.to_string(), json!(artifacts.database));
        overrides.insert(
            KEY_INPUT_JOB_CSV.to_string(),
            json!(self.config.input_job_csv),
        );

        patch_document(self.fs, &self.config.simulator_config, &overrides)?;

        set_site_cpu_speed(
            self.fs,
            &self.config.site_info,
            &self.config.site,
            &params.cpu_speed,
        )
    }

    /// Start the simulator and block until it exits.
    fn invoke_simulator(&self) -> Result<()> {
        debug!("Invoking {:?}", self.config.simulator);

        let status = Command::new(&self.config.simulator)
            .arg(SIMULATOR_CONFIG_FLAG)
            .arg(&self.config.simulator_config)
            .status()
            .with_context(ctx!(
              "Could not start the simulator {:?}", self.config.simulator;
              "Ensure that the binary exists and is executable",
            ))?;

        if !status.success() {
            warn!("The simulator exited with {status}, continuing with whatever it wrote");
        }

        Ok(())
    }

    /// Remove the artifacts a run left behind.
    fn clean_artifacts(&self, artifacts: &Artifacts) -> Result<()> {
        for path in [&artifacts.database, &artifacts.table] {
            if self.fs.remove_file(path)? {
                debug!("Deleted the output file {path:?}");
            } else {
                debug!("No output file at {path:?} to delete");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;
