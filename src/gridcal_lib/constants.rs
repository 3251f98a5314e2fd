use anstyle::AnsiColor;
use anstyle::Color;
use anstyle::Style;

/// The default number of search trials in one calibration run.
pub const TRIALS_DEFAULT: fn() -> usize = || 30;

/// The default number of jobs the simulator is asked to schedule per trial.
pub const JOBS_PER_TRIAL_DEFAULT: fn() -> usize = || 10;

/// The flag with which the simulator accepts its configuration file.
pub const SIMULATOR_CONFIG_FLAG: &str = "-c";

/// The inclusive lower edge of the CPU-speed factor search space.
pub const CPU_SPEED_LOWER_MIN: u64 = 1;

/// The hard cap on the sampled CPU-speed upper bound.
pub const CPU_SPEED_UPPER_MAX: u64 = 9;

/// The exponents from which the speed precision is drawn.
pub const SPEED_PRECISIONS: [u32; 8] = [5, 6, 7, 8, 9, 10, 11, 12];

/// The status the simulator's job table reports for a completed job.
pub const STATUS_FINISHED: &str = "finished";

/// The core count of a single-core job row.
pub const SINGLE_CORE: u64 = 1;

/// The core count of a multi-core job row.
pub const MULTI_CORE: u64 = 8;

/// The timestamp format used in the simulator's logs.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// The simulator configuration key for the scheduled job count.
pub const KEY_NUM_OF_JOBS: &str = "Num_of_Jobs";

/// The simulator configuration key for the CPU-speed factor bounds.
pub const KEY_CPU_MIN_MAX: &str = "cpu_min_max";

/// The simulator configuration key for the speed precision exponent.
pub const KEY_SPEED_PRECISION: &str = "cpu_speed_precision";

/// The simulator configuration key for the simulated site list.
pub const KEY_SITES: &str = "Sites";

/// The simulator configuration key for the output database path.
pub const KEY_OUTPUT_DB: &str = "Output_DB";

/// The simulator configuration key for the input job trace.
pub const KEY_INPUT_JOB_CSV: &str = "Input_Job_CSV";

/// The site descriptor key for the per-unit CPU speeds.
pub const KEY_CPU_SPEED: &str = "CPUSpeed";

/// The site descriptor key for the number of CPU units.
pub const KEY_CPU_COUNT: &str = "CPUCount";

/// Create a style with a defined foreground color.
pub const fn style_from_fg(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

/// The styling for the program name.
pub const PRIMARY_STYLE: Style = style_from_fg(AnsiColor::Green).bold();

/// The styling for the secondary text.
pub const SECONDARY_STYLE: Style = style_from_fg(AnsiColor::BrightGreen);

/// The styling for error messages.
pub const ERROR_STYLE: Style = style_from_fg(AnsiColor::Red).bold().blink();

/// The styling for help messages.
pub const HELP_STYLE: Style = style_from_fg(AnsiColor::Green).bold().underline();
