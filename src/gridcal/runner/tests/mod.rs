use gridcal_lib::file_system::FileOperations;
use gridcal_lib::metrics::Metric;
use gridcal_lib::metrics::TrialMetrics;
use gridcal_lib::simulator::Artifacts;
use serde_json::json;
use serde_json::Value;

use super::SimulationRunner;
use crate::search::TrialParams;
use crate::test_utils::sample_setup;
use crate::test_utils::CRASHING_SIMULATOR;
use crate::test_utils::FAKE_SIMULATOR;
use crate::test_utils::REAL_FS;
use crate::test_utils::SILENT_SIMULATOR;

fn sample_params() -> TrialParams {
    TrialParams {
        cpu_min_max: [2, 5],
        speed_precision: 6,
        cpu_speed: vec![2_000_000, 3_000_000, 5_000_000, 4_000_000],
    }
}

#[cfg(unix)]
#[test]
fn run_trial_computes_both_metrics() {
    let (_dir, config) = sample_setup(FAKE_SIMULATOR);
    let runner = SimulationRunner::new(&config, &REAL_FS);

    let metrics = runner.run_trial(&sample_params(), "unit").unwrap();

    assert_eq!(metrics.single_core, Metric::Mae(2.0));
    assert_eq!(metrics.multi_core, Metric::Mae(1.0));
}

#[cfg(unix)]
#[test]
fn run_trial_rewrites_the_documents() {
    let (_dir, config) = sample_setup(FAKE_SIMULATOR);
    let runner = SimulationRunner::new(&config, &REAL_FS);

    let params = sample_params();
    runner.run_trial(&params, "unit").unwrap();

    let document: Value = REAL_FS.try_read_json(&config.simulator_config).unwrap();
    assert_eq!(document["Num_of_Jobs"], json!(10));
    assert_eq!(document["cpu_min_max"], json!([2, 5]));
    assert_eq!(document["cpu_speed_precision"], json!(6));
    assert_eq!(document["Sites"], json!(["NET2_Amherst"]));
    assert_eq!(document["Scheduler"], json!("fifo"));

    let sites: Value = REAL_FS.try_read_json(&config.site_info).unwrap();
    assert_eq!(
        sites["NET2_Amherst"]["CPUSpeed"],
        json!([2_000_000, 3_000_000, 5_000_000, 4_000_000])
    );
    assert_eq!(sites["NET2_Boston"]["CPUSpeed"], json!([7, 7]));
}

#[cfg(unix)]
#[test]
fn run_trial_cleans_up_the_artifacts() {
    let (_dir, config) = sample_setup(FAKE_SIMULATOR);
    let runner = SimulationRunner::new(&config, &REAL_FS);

    runner.run_trial(&sample_params(), "unit").unwrap();

    let artifacts = Artifacts::new(&config.output_folder, &config.site, "unit");
    assert!(!artifacts.database.exists());
    assert!(!artifacts.table.exists());
}

#[cfg(unix)]
#[test]
fn run_trial_tolerates_a_crashing_simulator() {
    let (_dir, config) = sample_setup(CRASHING_SIMULATOR);
    let runner = SimulationRunner::new(&config, &REAL_FS);

    let metrics = runner.run_trial(&sample_params(), "unit").unwrap();

    assert_eq!(metrics.single_core, Metric::Mae(2.0));
    assert_eq!(metrics.multi_core, Metric::Mae(1.0));
}

#[cfg(unix)]
#[test]
fn run_trial_scores_a_silent_simulator_as_unusable() {
    let (_dir, config) = sample_setup(SILENT_SIMULATOR);
    let runner = SimulationRunner::new(&config, &REAL_FS);

    let metrics = runner.run_trial(&sample_params(), "unit").unwrap();

    assert_eq!(metrics, TrialMetrics::no_data());
}

#[test]
fn run_trial_fails_without_a_simulator() {
    let (dir, mut config) = sample_setup(FAKE_SIMULATOR);
    config.simulator = dir.path().join("nonexistent_simulator");

    let runner = SimulationRunner::new(&config, &REAL_FS);

    assert!(runner.run_trial(&sample_params(), "unit").is_err());
}
