use std::fmt::Display;

use anyhow::Result;
use gridcal_lib::config::CalibrationConfig;
use gridcal_lib::constants::CPU_SPEED_LOWER_MIN;
use gridcal_lib::constants::CPU_SPEED_UPPER_MAX;
use gridcal_lib::constants::SPEED_PRECISIONS;
use gridcal_lib::file_system::FileOperations;
use gridcal_lib::metrics::TrialMetrics;
use gridcal_lib::simulator::site_cpu_count;
use indicatif::ProgressBar;
use log::info;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::runner::SimulationRunner;

/// One sampled point of the CPU-speed parameter space.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialParams {
    /// The inclusive bounds of the per-unit CPU speed factor.
    pub cpu_min_max: [u64; 2],

    /// The power of ten every speed factor is scaled by.
    pub speed_precision: u32,

    /// One sampled speed per CPU unit of the target site.
    pub cpu_speed: Vec<u64>,
}

impl TrialParams {
    /// Sample a parameter point, one speed entry per CPU unit.
    ///
    /// The lower bound is drawn from [1, 8] and the upper bound from
    /// [lower + 1, 9], so the range is never empty and never leaves the
    /// search space.
    pub fn sample(rng: &mut impl Rng, cpu_count: usize) -> Self {
        let lower = rng.gen_range(CPU_SPEED_LOWER_MIN..=CPU_SPEED_UPPER_MAX - 1);
        let offset = rng.gen_range(0..=CPU_SPEED_UPPER_MAX - 1 - lower);
        let upper = lower + 1 + offset;

        let speed_precision = SPEED_PRECISIONS
            .choose(rng)
            .copied()
            .unwrap_or(SPEED_PRECISIONS[0]);

        let scale = 10u64.pow(speed_precision);
        let cpu_speed = (0..cpu_count)
            .map(|_| rng.gen_range(lower..=upper) * scale)
            .collect();

        TrialParams {
            cpu_min_max: [lower, upper],
            speed_precision,
            cpu_speed,
        }
    }
}

/// One executed trial and its measured score.
#[derive(Debug, Clone, PartialEq)]
pub struct Trial {
    /// The index of the trial within the search.
    pub index: usize,

    /// The sampled parameters.
    pub params: TrialParams,

    /// The metrics the runner measured for them.
    pub metrics: TrialMetrics,
}

impl Trial {
    /// The unweighted average of both error metrics, if both measured.
    pub fn average(&self) -> Option<f64> {
        self.metrics.average()
    }

    /// Whether this trial should replace the best one found so far.
    ///
    /// A trial without usable data never wins and ties keep the earlier
    /// trial.
    pub fn improves_on(&self, best: Option<&Trial>) -> bool {
        match (self.average(), best.and_then(|trial| trial.average())) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(new), Some(incumbent)) => new < incumbent,
        }
    }
}

impl Display for Trial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "trial {}: cpu_min_max={:?}, speed_precision={}",
            self.index, self.params.cpu_min_max, self.params.speed_precision
        )?;

        match self.average() {
            Some(average) => write!(f, " --> avg error: {average}"),
            None => write!(f, " --> no usable data"),
        }
    }
}

/// Randomly search the parameter space for the lowest-error configuration.
///
/// Every trial runs to completion, simulator included, before the next one
/// is sampled. Returns the best trial, or [None] when no trial produced
/// usable data at all.
pub fn random_search<F: FileOperations>(
    config: &CalibrationConfig,
    fs: &F,
    rng: &mut impl Rng,
    bar: &ProgressBar,
) -> Result<Option<Trial>> {
    let cpu_count = site_cpu_count(fs, &config.site_info, &config.site)?;
    let runner = SimulationRunner::new(config, fs);

    let mut best: Option<Trial> = None;

    for index in 0..config.trials {
        let params = TrialParams::sample(rng, cpu_count);
        let tag = format!("random_{index}");

        let metrics = runner.run_trial(&params, &tag)?;

        let trial = Trial {
            index,
            params,
            metrics,
        };

        info!("{trial}");

        if trial.improves_on(best.as_ref()) {
            best = Some(trial);
        }

        bar.inc(1);
    }

    Ok(best)
}

#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;
