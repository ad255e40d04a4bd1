//! Cumulative BAC over an ordered sequence of drinks.
//!
//! Two accumulation models are available:
//!
//! - [`AccumulationModel::Reference`] (default): for each drink after the
//!   first, the previous drink's own Widmark estimate is re-derived with its
//!   window read from end back to start and added to the running total,
//!   then the current drink's estimate is added. The reversed window spans
//!   most of a day, so the re-derived term is usually zero. This is an
//!   additive model kept for parity with established results; it does not
//!   decay the running total between drinks.
//! - [`AccumulationModel::Decay`]: the running total is decayed by the gap
//!   since the previous drink ended, then the current drink is added.
//!
//! Both are additive approximations, not a compartment simulation.

use crate::clock::elapsed_time;
use crate::widmark::{estimate_metabolized_bac, estimate_single_drink_bac};
use crate::{BacResult, CumulativeBac, DrinkEvent, MetabolismStep, Result, StomachState, Subject};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How the running total is carried from one drink to the next
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccumulationModel {
    #[default]
    Reference,
    Decay,
}

impl FromStr for AccumulationModel {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "reference" => Ok(AccumulationModel::Reference),
            "decay" => Ok(AccumulationModel::Decay),
            other => Err(crate::Error::invalid(format!(
                "unknown accumulation model: {:?}",
                other
            ))),
        }
    }
}

/// Cumulative BAC with the reference accumulation
///
/// `stomach` applies to every drink in the sequence.
pub fn cumulative_bac(
    subject: &Subject,
    drinks: &[DrinkEvent],
    stomach: StomachState,
) -> Result<CumulativeBac> {
    cumulative_bac_with(subject, drinks, Some(stomach), AccumulationModel::Reference)
}

/// Cumulative BAC with an explicit accumulation model
///
/// `Some(stomach)` overrides every drink's stomach state; `None` keeps each
/// drink's own. The trace holds one step per gap, so `n` drinks give `n - 1`
/// steps. Any invalid drink fails the whole computation.
pub fn cumulative_bac_with(
    subject: &Subject,
    drinks: &[DrinkEvent],
    stomach: Option<StomachState>,
    model: AccumulationModel,
) -> Result<CumulativeBac> {
    subject.validate()?;

    let mut total = BacResult::ZERO;
    let mut trace = Vec::with_capacity(drinks.len().saturating_sub(1));

    for (i, drink) in drinks.iter().enumerate() {
        let drink = stomach_for(drink, stomach);

        if i > 0 {
            let previous = stomach_for(&drinks[i - 1], stomach);
            let gap = elapsed_time(previous.end, drink.start);

            total = match model {
                AccumulationModel::Reference => {
                    let reversed = DrinkEvent {
                        start: previous.end,
                        end: previous.start,
                        ..previous
                    };
                    total + estimate_single_drink_bac(subject, &reversed)?
                }
                AccumulationModel::Decay => estimate_metabolized_bac(total, gap.as_hours()),
            };

            tracing::debug!(
                "Gap before drink {}: {} -> running BAC {}",
                i + 1,
                gap,
                total
            );

            trace.push(MetabolismStep {
                elapsed: gap.value,
                elapsed_unit: gap.unit,
                bac_after_metabolism: total,
            });
        }

        total = total + estimate_single_drink_bac(subject, &drink)?;
    }

    tracing::info!(
        "Cumulative BAC over {} drinks ({:?} model): {}",
        drinks.len(),
        model,
        total
    );

    Ok(CumulativeBac {
        final_bac: total,
        metabolism_trace: trace,
    })
}

fn stomach_for(drink: &DrinkEvent, stomach: Option<StomachState>) -> DrinkEvent {
    match stomach {
        Some(stomach) => drink.with_stomach(stomach),
        None => drink.clone(),
    }
}
