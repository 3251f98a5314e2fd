use gridcal_lib::config::CalibrationConfig;
use gridcal_lib::file_system::FileOperations;
use gridcal_lib::file_system::FileSystemInteractor;
use serde_json::json;
use tempdir::TempDir;

pub const REAL_FS: FileSystemInteractor = FileSystemInteractor { dry_run: false };

/// A fake simulator. It digs the output database path out of the config it
/// is handed and exports one finished single-core and one finished 8-core
/// job next to it.
pub const FAKE_SIMULATOR: &str = r#"#!/bin/sh
db=$(sed -n 's/.*"Output_DB": "\(.*\)".*/\1/p' "$2")
csv="${db%.db}.csv"
printf 'STATUS,CORES,CPU_CONSUMPTION_TIME,EXECUTION_TIME\n' > "$csv"
printf 'finished,1,12.0,10.0\n' >> "$csv"
printf 'finished,8,24.0,16.0\n' >> "$csv"
: > "$db"
"#;

/// A fake simulator that writes the same job table but exits non-zero.
pub const CRASHING_SIMULATOR: &str = r#"#!/bin/sh
db=$(sed -n 's/.*"Output_DB": "\(.*\)".*/\1/p' "$2")
csv="${db%.db}.csv"
printf 'STATUS,CORES,CPU_CONSUMPTION_TIME,EXECUTION_TIME\n' > "$csv"
printf 'finished,1,12.0,10.0\n' >> "$csv"
printf 'finished,8,24.0,16.0\n' >> "$csv"
: > "$db"
exit 3
"#;

/// A fake simulator that exits cleanly without writing anything.
pub const SILENT_SIMULATOR: &str = "#!/bin/sh\nexit 0\n";

/// Lay out a complete calibration setup around a fake simulator script.
///
/// The returned config points every path into the temp dir, which must be
/// kept alive for as long as the config is used.
pub fn sample_setup(script: &str) -> (TempDir, CalibrationConfig) {
    let dir = TempDir::new("gridcal_test").unwrap();
    let root = dir.path();

    let simulator = root.join("fake_simulator.sh");
    REAL_FS.write_utf8_truncate(&simulator, script).unwrap();
    REAL_FS.set_permissions(&simulator, 0o755).unwrap();

    let simulator_config = root.join("config.json");
    REAL_FS
        .try_write_json(&simulator_config, &json!({ "Scheduler": "fifo" }))
        .unwrap();

    let site_info = root.join("site_info_cpu.json");
    REAL_FS
        .try_write_json(
            &site_info,
            &json!({
                "NET2_Amherst": { "CPUCount": 4, "CPUSpeed": [0, 0, 0, 0] },
                "NET2_Boston": { "CPUCount": 2, "CPUSpeed": [7, 7] }
            }),
        )
        .unwrap();

    let config = CalibrationConfig {
        simulator,
        simulator_config,
        site_info,
        output_folder: root.to_path_buf(),
        input_job_csv: root.join("jobs_jan.csv"),
        site: "NET2_Amherst".to_string(),
        trials: 3,
        jobs_per_trial: 10,
    };

    (dir, config)
}
