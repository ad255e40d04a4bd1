//! Physiological constants of the Widmark model.
//!
//! These are fixed so that every estimate is reproducible; nothing here is
//! read from configuration.

use crate::{Sex, StomachState};
use serde::Serialize;

/// Density of ethanol (g/ml).
pub const ALCOHOL_DENSITY: f64 = 0.789;

/// Elimination rate beta (g/L per hour).
pub const ELIMINATION_RATE: f64 = 0.15;

/// Widmark distribution ratio for men.
pub const R_MALE: f64 = 0.68;

/// Widmark distribution ratio for women.
pub const R_FEMALE: f64 = 0.55;

/// Absorption factor on an empty stomach.
pub const ABSORPTION_EMPTY: f64 = 1.0;

/// Absorption factor on a full stomach.
pub const ABSORPTION_FULL: f64 = 0.7;

// Interpretation thresholds (g/L)
pub const THRESHOLD_APPROACHING: f64 = 0.3;
pub const THRESHOLD_NEAR_LIMIT: f64 = 0.45;
pub const LEGAL_LIMIT: f64 = 0.5;

/// Decimal places kept on every BAC value.
pub const BAC_DECIMALS: i32 = 3;

pub const MINUTES_PER_HOUR: f64 = 60.0;
pub const HOURS_PER_DAY: f64 = 24.0;

/// Distribution ratio r for a sex.
pub const fn distribution_ratio(sex: Sex) -> f64 {
    match sex {
        Sex::Male => R_MALE,
        Sex::Female => R_FEMALE,
    }
}

/// Fraction of ingested alcohol absorbed for a stomach state.
pub const fn absorption_factor(stomach: StomachState) -> f64 {
    match stomach {
        StomachState::Empty => ABSORPTION_EMPTY,
        StomachState::Full => ABSORPTION_FULL,
    }
}

/// Read-only snapshot of the model constants, for display and reports.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WidmarkConstants {
    pub alcohol_density: f64,
    pub elimination_rate: f64,
    pub r_male: f64,
    pub r_female: f64,
    pub absorption_empty: f64,
    pub absorption_full: f64,
    pub legal_limit: f64,
}

pub const WIDMARK: WidmarkConstants = WidmarkConstants {
    alcohol_density: ALCOHOL_DENSITY,
    elimination_rate: ELIMINATION_RATE,
    r_male: R_MALE,
    r_female: R_FEMALE,
    absorption_empty: ABSORPTION_EMPTY,
    absorption_full: ABSORPTION_FULL,
    legal_limit: LEGAL_LIMIT,
};

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
