//! Time-of-day handling.
//!
//! Drink windows carry no date: an end time earlier than its start time is
//! taken to be on the following day.

use crate::constants::{round_to, HOURS_PER_DAY, MINUTES_PER_HOUR};
use crate::{Elapsed, ElapsedUnit, Error, Result};
use chrono::NaiveTime;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Parse a 24-hour `HH:MM` time of day
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime> {
    let trimmed = s.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| Error::invalid(format!("expected a time of day as HH:MM, got {:?}", s)))
}

/// Hours from `start` to `end`, rolling `end` over midnight when it is earlier
pub fn interval_hours(start: NaiveTime, end: NaiveTime) -> f64 {
    let hours = end.signed_duration_since(start).num_seconds() as f64 / SECONDS_PER_HOUR;
    if hours < 0.0 {
        hours + HOURS_PER_DAY
    } else {
        hours
    }
}

/// Elapsed time between two times of day
///
/// Under one hour the value is whole minutes; otherwise hours rounded to
/// two decimals.
pub fn elapsed_time(start: NaiveTime, end: NaiveTime) -> Elapsed {
    let hours = interval_hours(start, end);
    if hours < 1.0 {
        Elapsed {
            value: (hours * MINUTES_PER_HOUR).round(),
            unit: ElapsedUnit::Minutes,
        }
    } else {
        Elapsed {
            value: round_to(hours, 2),
            unit: ElapsedUnit::Hours,
        }
    }
}

/// Serde adapter writing `NaiveTime` as `HH:MM`
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_time_of_day(&s).map_err(de::Error::custom)
    }
}
