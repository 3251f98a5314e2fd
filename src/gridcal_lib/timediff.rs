use std::fmt::Display;

use anyhow::Context;
use anyhow::Result;
use chrono::NaiveDateTime;
use chrono::TimeDelta;

use crate::constants::TIMESTAMP_FORMAT;
use crate::error::ctx;
use crate::error::Ctx;

/// The absolute difference between two simulator log timestamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeDifference {
    /// The elapsed time, never negative.
    delta: TimeDelta,
}

impl TimeDifference {
    /// Parse both timestamps and take their absolute difference.
    ///
    /// The order of the two timestamps does not matter.
    pub fn between(first: &str, second: &str) -> Result<Self> {
        let start = parse_timestamp(first)?;
        let end = parse_timestamp(second)?;

        let delta = if end >= start {
            end - start
        } else {
            start - end
        };

        Ok(TimeDifference { delta })
    }

    /// The total elapsed seconds.
    pub fn total_seconds(&self) -> f64 {
        self.delta.num_microseconds().unwrap_or(i64::MAX) as f64 / 1e6
    }
}

impl Display for TimeDifference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let micros = self.delta.num_microseconds().unwrap_or(i64::MAX);
        let seconds = micros / 1_000_000;

        write!(
            f,
            "{}:{:02}:{:02}.{:06}",
            seconds / 3600,
            (seconds / 60) % 60,
            seconds % 60,
            micros % 1_000_000
        )
    }
}

/// Parse one timestamp in the simulator's log format.
///
/// The fractional part may have any length, or be absent entirely.
fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).with_context(ctx!(
      "Could not parse the timestamp {raw:?}", ;
      "Timestamps must look like 2025-06-23 15:16:47.566",
    ))
}

#[cfg(test)]
#[path = "tests/timediff.rs"]
mod tests;
