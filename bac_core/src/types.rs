//! Core value types for the BAC estimator.
//!
//! Everything here is an immutable input or output of a single computation:
//! - Subjects and drink events (inputs)
//! - BAC results, elapsed times and metabolism steps (outputs)
//! - Interpretations against the legal thresholds

use crate::constants::{round_to, BAC_DECIMALS};
use crate::{Error, Result};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Subject
// ============================================================================

/// Biological sex, selecting the Widmark distribution ratio
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl FromStr for Sex {
    type Err = Error;

    /// Case-insensitive; anything outside the alias set is rejected.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "man" | "uomo" => Ok(Sex::Male),
            "female" | "f" | "woman" | "donna" => Ok(Sex::Female),
            other => Err(Error::invalid(format!("unrecognized sex: {:?}", other))),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "male"),
            Sex::Female => write!(f, "female"),
        }
    }
}

/// The person whose BAC is being estimated
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Subject {
    pub body_weight_kg: f64,
    pub sex: Sex,
}

impl Subject {
    /// Build a validated subject
    pub fn new(body_weight_kg: f64, sex: Sex) -> Result<Self> {
        let subject = Self { body_weight_kg, sex };
        subject.validate()?;
        Ok(subject)
    }

    /// Reject non-positive or non-finite body weight
    pub fn validate(&self) -> Result<()> {
        if !self.body_weight_kg.is_finite() || self.body_weight_kg <= 0.0 {
            return Err(Error::invalid(format!(
                "body weight must be a positive number of kg, got {}",
                self.body_weight_kg
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Drink events
// ============================================================================

/// Stomach state, selecting the absorption factor
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StomachState {
    Empty,
    Full,
}

impl FromStr for StomachState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "empty" | "vuoto" => Ok(StomachState::Empty),
            "full" | "pieno" => Ok(StomachState::Full),
            other => Err(Error::invalid(format!(
                "unrecognized stomach state: {:?}",
                other
            ))),
        }
    }
}

impl fmt::Display for StomachState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StomachState::Empty => write!(f, "empty"),
            StomachState::Full => write!(f, "full"),
        }
    }
}

/// One drink consumed over a time-of-day window
///
/// `end` earlier than `start` means the window crosses midnight.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DrinkEvent {
    /// Quantity consumed in ml (1 ml is treated as 1 g)
    pub volume_ml: f64,
    /// Alcohol fraction, e.g. 0.12 for a 12% wine
    pub abv: f64,
    pub stomach: StomachState,
    #[serde(with = "crate::clock::hhmm")]
    pub start: NaiveTime,
    #[serde(with = "crate::clock::hhmm")]
    pub end: NaiveTime,
}

impl DrinkEvent {
    /// Build a validated drink event
    pub fn new(
        volume_ml: f64,
        abv: f64,
        stomach: StomachState,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Self> {
        let drink = Self {
            volume_ml,
            abv,
            stomach,
            start,
            end,
        };
        drink.validate()?;
        Ok(drink)
    }

    /// Reject negative volume and ABV fractions outside [0, 1)
    pub fn validate(&self) -> Result<()> {
        if !self.volume_ml.is_finite() || self.volume_ml < 0.0 {
            return Err(Error::invalid(format!(
                "volume must be a non-negative number of ml, got {}",
                self.volume_ml
            )));
        }
        if !(0.0..1.0).contains(&self.abv) {
            return Err(Error::invalid(format!(
                "ABV must be a fraction in [0, 1), got {}",
                self.abv
            )));
        }
        Ok(())
    }

    /// Same drink with a different stomach state
    pub fn with_stomach(&self, stomach: StomachState) -> Self {
        Self {
            stomach,
            ..self.clone()
        }
    }
}

/// Parse an ABV given either as a fraction ("0.12") or a percentage ("12%")
///
/// A bare number is always read as a fraction, so "12" is rejected rather
/// than silently divided by 100.
pub fn parse_abv(s: &str) -> Result<f64> {
    let trimmed = s.trim();
    let (number, divisor) = match trimmed.strip_suffix('%') {
        Some(pct) => (pct.trim(), 100.0),
        None => (trimmed, 1.0),
    };
    let value: f64 = number
        .parse()
        .map_err(|_| Error::invalid(format!("unparseable ABV: {:?}", s)))?;
    let abv = value / divisor;
    if !(0.0..1.0).contains(&abv) {
        return Err(Error::invalid(format!(
            "ABV must be a fraction in [0, 1) or a percentage below 100%, got {:?}",
            s
        )));
    }
    Ok(abv)
}

// ============================================================================
// Results
// ============================================================================

/// A BAC value in g/L: never negative, always rounded to 3 decimals
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct BacResult(f64);

impl BacResult {
    pub const ZERO: BacResult = BacResult(0.0);

    /// Floor at zero and round half away from zero to 3 decimals
    pub fn new(raw: f64) -> Self {
        let floored = raw.max(0.0);
        // +0.0 collapses a rounded -0.0
        BacResult(round_to(floored, BAC_DECIMALS) + 0.0)
    }

    /// Validate a caller-supplied BAC, then round it like [`BacResult::new`]
    ///
    /// Negative, NaN and infinite values are rejected instead of floored.
    pub fn try_new(value: f64) -> Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::invalid(format!(
                "BAC must be a finite, non-negative g/L value, got {}",
                value
            )));
        }
        Ok(BacResult::new(value))
    }

    pub fn grams_per_liter(self) -> f64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl From<f64> for BacResult {
    fn from(raw: f64) -> Self {
        BacResult::new(raw)
    }
}

impl From<BacResult> for f64 {
    fn from(bac: BacResult) -> Self {
        bac.0
    }
}

impl std::ops::Add for BacResult {
    type Output = BacResult;

    fn add(self, rhs: BacResult) -> BacResult {
        BacResult::new(self.0 + rhs.0)
    }
}

impl fmt::Display for BacResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} g/L", self.0)
    }
}

/// Legal interpretation of a BAC value
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Interpretation {
    pub level_label: String,
    pub legal_to_drive: bool,
}

/// Unit of an elapsed time
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ElapsedUnit {
    Minutes,
    Hours,
}

impl fmt::Display for ElapsedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElapsedUnit::Minutes => write!(f, "minutes"),
            ElapsedUnit::Hours => write!(f, "hours"),
        }
    }
}

/// Elapsed time, in whole minutes below one hour and hours (2 decimals) above
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Elapsed {
    pub value: f64,
    pub unit: ElapsedUnit,
}

impl Elapsed {
    /// Convert back to hours for metabolism arithmetic
    pub fn as_hours(&self) -> f64 {
        match self.unit {
            ElapsedUnit::Minutes => self.value / crate::constants::MINUTES_PER_HOUR,
            ElapsedUnit::Hours => self.value,
        }
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// One entry of the cumulative trace: the gap before a drink and the
/// running BAC after folding that gap in
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct MetabolismStep {
    pub elapsed: f64,
    pub elapsed_unit: ElapsedUnit,
    pub bac_after_metabolism: BacResult,
}

/// Result of a cumulative estimate over a drink sequence
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CumulativeBac {
    pub final_bac: BacResult,
    pub metabolism_trace: Vec<MetabolismStep>,
}
