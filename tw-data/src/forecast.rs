//! Surf forecast horizons and spot x hour pivots.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use tw_core::{ForecastEntry, SurfRow, TidewatchError};

/// One scored (spot, hour) cell of a forecast horizon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastCell {
    pub spot_name: String,
    /// "HH:MM" of the forecast run.
    pub hour_of_day: String,
    pub score: f64,
}

/// The two most recent forecast-run dates and their cells.
///
/// With a single run date, `second_date` is `None` and `second` is empty.
/// Rows from any older date are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForecastHorizons {
    pub first_date: Option<NaiveDate>,
    pub second_date: Option<NaiveDate>,
    pub first: Vec<ForecastCell>,
    pub second: Vec<ForecastCell>,
}

/// Split ranked surf rows into the two latest forecast-run dates.
///
/// Rows are expected to be rank-filtered by the caller. They are ordered
/// newest run first before partitioning, which fixes the spot order of
/// each pivot.
pub fn forecast_horizons(rows: &[SurfRow]) -> Result<ForecastHorizons, TidewatchError> {
    let mut entries = rows
        .iter()
        .enumerate()
        .map(|(i, row)| ForecastEntry::from_row(i, row))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort_by(|a, b| b.run_timestamp.cmp(&a.run_timestamp));

    let mut dates: Vec<NaiveDate> = entries.iter().map(|e| e.run_timestamp.date()).collect();
    dates.dedup();
    let first_date = dates.first().copied();
    let second_date = dates.get(1).copied();

    let cells_on = |date: Option<NaiveDate>| -> Vec<ForecastCell> {
        let Some(date) = date else {
            return Vec::new();
        };
        entries
            .iter()
            .filter(|e| e.run_timestamp.date() == date)
            .map(|e| ForecastCell {
                spot_name: e.spot_name.clone(),
                hour_of_day: e.hour_of_day.clone(),
                score: e.score,
            })
            .collect()
    };

    let horizons = ForecastHorizons {
        first: cells_on(first_date),
        second: cells_on(second_date),
        first_date,
        second_date,
    };
    log::debug!(
        "forecast: {} rows -> {} on {:?}, {} on {:?}",
        rows.len(),
        horizons.first.len(),
        horizons.first_date,
        horizons.second.len(),
        horizons.second_date
    );
    Ok(horizons)
}

/// A dense spot x hour score matrix for the heatmap.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForecastPivot {
    /// Spot names in first-seen order.
    pub rows: Vec<String>,
    /// "HH:MM" labels, sorted.
    pub columns: Vec<String>,
    /// `matrix[i][j]` is the score for `(rows[i], columns[j])`, 0.0 if absent.
    pub matrix: Vec<Vec<f64>>,
}

impl ForecastPivot {
    /// Pivot a horizon's cells.
    ///
    /// When several cells share a (spot, hour) pair the first one wins.
    pub fn from_cells(cells: &[ForecastCell]) -> Self {
        let mut rows: Vec<String> = Vec::new();
        let mut columns: Vec<String> = Vec::new();
        let mut scores: HashMap<(&str, &str), f64> = HashMap::new();

        for cell in cells {
            if !rows.contains(&cell.spot_name) {
                rows.push(cell.spot_name.clone());
            }
            if !columns.contains(&cell.hour_of_day) {
                columns.push(cell.hour_of_day.clone());
            }
            scores
                .entry((cell.spot_name.as_str(), cell.hour_of_day.as_str()))
                .or_insert(cell.score);
        }
        // zero-padded "HH:MM" sorts chronologically as text
        columns.sort();

        let matrix = rows
            .iter()
            .map(|spot| {
                columns
                    .iter()
                    .map(|hour| scores.get(&(spot.as_str(), hour.as_str())).copied().unwrap_or(0.0))
                    .collect()
            })
            .collect();

        Self { rows, columns, matrix }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
