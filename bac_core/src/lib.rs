#![forbid(unsafe_code)]

//! Blood alcohol concentration estimation engine.
//!
//! This crate provides:
//! - Value types (subjects, drink events, BAC results, interpretations)
//! - Widmark single-drink estimation and elimination decay
//! - Cumulative estimation over a sequence of drinks
//! - Legal-threshold interpretation and time-to-sober estimates
//! - Caller-side helpers (profile config, CSV drink lists, logging)

pub mod types;
pub mod error;
pub mod constants;
pub mod clock;
pub mod widmark;
pub mod cumulative;
pub mod interpret;
pub mod config;
pub mod drinks;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use clock::{elapsed_time, parse_time_of_day};
pub use widmark::{estimate_metabolized_bac, estimate_single_drink_bac};
pub use cumulative::{cumulative_bac, cumulative_bac_with, AccumulationModel};
pub use interpret::{interpret, sober_time, time_to_sober, BacReport, SoberTime};
pub use config::Config;
pub use drinks::{load_drinks_csv, parse_drinks_csv};
