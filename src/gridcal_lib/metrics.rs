use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use serde::Deserialize;

use crate::constants::MULTI_CORE;
use crate::constants::SINGLE_CORE;
use crate::constants::STATUS_FINISHED;
use crate::error::ctx;
use crate::error::Ctx;

/// One job row of the simulator's output table.
#[derive(Debug, Clone, Deserialize)]
pub struct JobRecord {
    /// The scheduling state the job ended in.
    #[serde(rename = "STATUS")]
    pub status: String,

    /// The number of cores the job ran on.
    #[serde(rename = "CORES")]
    pub cores: u64,

    /// The CPU time the job consumed, as booked by the simulator.
    #[serde(rename = "CPU_CONSUMPTION_TIME")]
    pub cpu_consumption_time: f64,

    /// The execution time the job took.
    #[serde(rename = "EXECUTION_TIME")]
    pub execution_time: f64,
}

/// One error metric of a trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    /// No finished jobs matched, there is nothing to measure.
    NoData,

    /// The mean absolute error across the matching finished jobs.
    Mae(f64),
}

impl Metric {
    /// The measured value, if there is one.
    pub fn value(&self) -> Option<f64> {
        match self {
            Metric::NoData => None,
            Metric::Mae(value) => Some(*value),
        }
    }
}

/// The two error metrics of one simulator run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialMetrics {
    /// Mean absolute error across single-core jobs.
    pub single_core: Metric,

    /// Mean absolute error across 8-core jobs, normalized per core.
    pub multi_core: Metric,
}

impl TrialMetrics {
    /// The metrics of a run that produced no usable data.
    pub fn no_data() -> Self {
        TrialMetrics {
            single_core: Metric::NoData,
            multi_core: Metric::NoData,
        }
    }

    /// The unweighted mean of both metrics.
    ///
    /// There is no average unless both metrics measured something.
    pub fn average(&self) -> Option<f64> {
        match (self.single_core.value(), self.multi_core.value()) {
            (Some(single), Some(multi)) => Some((single + multi) / 2.0),
            _ => None,
        }
    }
}

/// Compute the error metrics from the job table the simulator exported.
pub fn metrics_from_table(path: &Path) -> Result<TrialMetrics> {
    let mut reader = csv::Reader::from_path(path).with_context(ctx!(
      "Could not open the simulator output {path:?}", ;
      "The simulator should have exported a job table next to its database",
    ))?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: JobRecord = row.with_context(ctx!(
          "Could not parse a job row in {path:?}", ;
          "The job table must carry STATUS, CORES, CPU_CONSUMPTION_TIME \
          and EXECUTION_TIME columns",
        ))?;

        records.push(record);
    }

    Ok(TrialMetrics {
        single_core: mean_absolute_error(&records, SINGLE_CORE),
        multi_core: mean_absolute_error(&records, MULTI_CORE),
    })
}

/// The mean absolute per-core error across finished jobs with this core
/// count.
pub fn mean_absolute_error(records: &[JobRecord], cores: u64) -> Metric {
    let errors: Vec<f64> = records
        .iter()
        .filter(|record| record.status == STATUS_FINISHED && record.cores == cores)
        .map(|record| ((record.cpu_consumption_time - record.execution_time) / cores as f64).abs())
        .collect();

    if errors.is_empty() {
        Metric::NoData
    } else {
        Metric::Mae(errors.iter().sum::<f64>() / errors.len() as f64)
    }
}

#[cfg(test)]
#[path = "tests/metrics.rs"]
mod tests;
