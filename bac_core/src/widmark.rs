//! Widmark single-drink estimation and elimination decay.
//!
//! BAC = (A * absorption) / (W * r) - beta * t
//!
//! where A is grams of pure alcohol, W body weight in kg, r the
//! distribution ratio and t the consumption time in hours.

use crate::clock::interval_hours;
use crate::constants::{absorption_factor, distribution_ratio, ALCOHOL_DENSITY, ELIMINATION_RATE};
use crate::{BacResult, DrinkEvent, Result, Subject};

/// Grams of pure alcohol in a drink
pub fn pure_alcohol_grams(drink: &DrinkEvent) -> f64 {
    drink.volume_ml * drink.abv * ALCOHOL_DENSITY
}

/// Estimate the BAC produced by a single drink at the end of its window
///
/// Fails with `InvalidInput` on non-positive body weight, negative volume or
/// an ABV outside [0, 1).
pub fn estimate_single_drink_bac(subject: &Subject, drink: &DrinkEvent) -> Result<BacResult> {
    subject.validate()?;
    drink.validate()?;

    let consumption_hours = interval_hours(drink.start, drink.end);
    let grams = pure_alcohol_grams(drink);
    let absorbed = grams * absorption_factor(drink.stomach);
    let r = distribution_ratio(subject.sex);

    let raw = absorbed / (subject.body_weight_kg * r) - ELIMINATION_RATE * consumption_hours;
    let bac = BacResult::new(raw);

    tracing::debug!(
        grams,
        consumption_hours,
        raw,
        "Widmark estimate: {} ({} kg {}, {} stomach)",
        bac,
        subject.body_weight_kg,
        subject.sex,
        drink.stomach
    );

    Ok(bac)
}

/// Apply elimination over `elapsed_hours` to an existing BAC
///
/// A negative elapsed time (clock skew on the caller's side) is clamped to
/// zero, so the result never exceeds `current`.
pub fn estimate_metabolized_bac(current: BacResult, elapsed_hours: f64) -> BacResult {
    let hours = if elapsed_hours < 0.0 {
        tracing::warn!(
            "Negative elapsed time ({} h) clamped to zero",
            elapsed_hours
        );
        0.0
    } else if elapsed_hours.is_nan() {
        tracing::warn!("NaN elapsed time treated as zero");
        0.0
    } else {
        elapsed_hours
    };

    BacResult::new(current.grams_per_liter() - ELIMINATION_RATE * hours)
}
