//! Reports the absolute difference between two simulator log timestamps.
//!
//! Run the utility with two timestamps in the simulator's log format:
//!
//!   timediff "2025-06-23 15:16:47.566" "2025-06-23 15:17:37.935"

use std::env;
use std::process::exit;

use anyhow::bail;
use anyhow::Result;
use gridcal_lib::constants::ERROR_STYLE;
use gridcal_lib::constants::HELP_STYLE;
use gridcal_lib::timediff::TimeDifference;

fn main() {
    if let Err(err) = process() {
        eprintln!("{}error:{:#} {}", ERROR_STYLE, ERROR_STYLE, err.root_cause());
        eprintln!(
            "{}help:{:#} Timestamps must look like 2025-06-23 15:16:47.566",
            HELP_STYLE, HELP_STYLE
        );
        exit(1);
    }
}

fn process() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() != 3 {
        bail!("timediff needs exactly two timestamps");
    }

    println!("Calculating difference between:");
    println!("Start time: {}", args[1]);
    println!("End time:   {}", args[2]);

    let difference = TimeDifference::between(&args[1], &args[2])?;

    println!("Time Difference: {difference}");
    println!("Total Difference in Seconds: {}", difference.total_seconds());

    Ok(())
}
