//! Drink list loading from CSV.
//!
//! Expected header: `volume_ml,abv,start,end[,stomach]`. ABV may be a
//! fraction (`0.12`) or a percentage (`12%`); times are `HH:MM`.

use crate::clock::parse_time_of_day;
use crate::types::parse_abv;
use crate::{DrinkEvent, Error, Result, StomachState};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// CSV row format
#[derive(Debug, Deserialize)]
struct DrinkRow {
    volume_ml: f64,
    abv: String,
    start: String,
    end: String,
    stomach: Option<String>,
}

impl DrinkRow {
    fn into_event(self, default_stomach: StomachState) -> Result<DrinkEvent> {
        let stomach = match self.stomach.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.parse()?,
            _ => default_stomach,
        };
        DrinkEvent::new(
            self.volume_ml,
            parse_abv(&self.abv)?,
            stomach,
            parse_time_of_day(&self.start)?,
            parse_time_of_day(&self.end)?,
        )
    }
}

/// Parse drinks from CSV, in file order
///
/// Rows without a stomach column take `default_stomach`. The first invalid
/// row fails the whole list, naming its line.
pub fn parse_drinks_csv<R: Read>(reader: R, default_stomach: StomachState) -> Result<Vec<DrinkEvent>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut drinks = Vec::new();
    for (i, row) in csv_reader.deserialize::<DrinkRow>().enumerate() {
        // Line 1 is the header
        let line = i + 2;
        let event = row?
            .into_event(default_stomach)
            .map_err(|e| match e {
                Error::InvalidInput(msg) => Error::InvalidInput(format!("line {}: {}", line, msg)),
                other => other,
            })?;
        drinks.push(event);
    }

    tracing::debug!("Parsed {} drinks", drinks.len());
    Ok(drinks)
}

/// Load drinks from a CSV file
pub fn load_drinks_csv(path: &Path, default_stomach: StomachState) -> Result<Vec<DrinkEvent>> {
    let file = std::fs::File::open(path)?;
    let drinks = parse_drinks_csv(file, default_stomach)?;
    tracing::info!("Loaded {} drinks from {:?}", drinks.len(), path);
    Ok(drinks)
}
