//! Legal interpretation and time-to-sober estimates.

use crate::constants::{
    round_to, ELIMINATION_RATE, LEGAL_LIMIT, MINUTES_PER_HOUR, THRESHOLD_APPROACHING,
    THRESHOLD_NEAR_LIMIT,
};
use crate::{BacResult, Interpretation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classify a BAC against the driving thresholds
///
/// | BAC (g/L)       | Label                           | Legal |
/// |-----------------|---------------------------------|-------|
/// | 0               | Abstinent                       | yes   |
/// | (0, 0.3)        | Sober                           | yes   |
/// | [0.3, 0.45)     | Approaching the legal limit     | yes   |
/// | [0.45, 0.5]     | Warning: near the legal limit   | yes   |
/// | above 0.5       | Warning: do not drive           | no    |
///
/// Accepts a [`BacResult`] or a raw g/L value; raw values are compared
/// unrounded, negative ones as zero. NaN is never legal to drive; use
/// [`BacResult::try_new`] to reject it up front.
pub fn interpret(bac: impl Into<f64>) -> Interpretation {
    let raw = bac.into();
    let value = raw.max(0.0);

    let (label, legal) = if raw.is_nan() {
        ("Warning: do not drive", false)
    } else if value == 0.0 {
        ("Abstinent", true)
    } else if value < THRESHOLD_APPROACHING {
        ("Sober", true)
    } else if value < THRESHOLD_NEAR_LIMIT {
        ("Approaching the legal limit", true)
    } else if value <= LEGAL_LIMIT {
        ("Warning: near the legal limit", true)
    } else {
        ("Warning: do not drive", false)
    };

    Interpretation {
        level_label: label.to_string(),
        legal_to_drive: legal,
    }
}

/// Estimated time until BAC reaches zero
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum SoberTime {
    /// Whole minutes, used below one hour
    Minutes(i64),
    /// Hours rounded to one decimal
    Hours(f64),
}

impl fmt::Display for SoberTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoberTime::Minutes(m) => write!(f, "{} minutes", m),
            SoberTime::Hours(h) => write!(f, "{:.1} hours", h),
        }
    }
}

/// Structured time to sober: `bac / beta` hours
pub fn sober_time(bac: impl Into<f64>) -> SoberTime {
    let hours = bac.into().max(0.0) / ELIMINATION_RATE;
    if hours < 1.0 {
        SoberTime::Minutes((hours * MINUTES_PER_HOUR).round() as i64)
    } else {
        SoberTime::Hours(round_to(hours, 1))
    }
}

/// Formatted time to sober, e.g. "40 minutes" or "2.3 hours"
pub fn time_to_sober(bac: impl Into<f64>) -> String {
    sober_time(bac).to_string()
}

/// Everything a caller shows after a computation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BacReport {
    pub bac: BacResult,
    pub interpretation: Interpretation,
    pub time_to_sober: SoberTime,
}

impl BacReport {
    pub fn from_bac(bac: BacResult) -> Self {
        Self {
            bac,
            interpretation: interpret(bac),
            time_to_sober: sober_time(bac),
        }
    }
}
