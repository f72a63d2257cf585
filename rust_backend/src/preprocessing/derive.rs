//! Column Deriver: typed timestamps, pickup date and trip duration.

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;

use crate::core::columns::*;
use crate::core::{PipelineError, PipelineResult};
use crate::parsing::timestamps::{duration_minutes, TimestampParser};
use crate::preprocessing::schema::{canonicalize_city_name, MERGED_TRIPS};

/// Derive the computed columns of `MergedTrip`.
///
/// * `pickup_time` / `dropoff_time` become Datetime columns
/// * `pickup_date` is the calendar date of the pickup
/// * `trip_duration_minutes` is dropoff minus pickup, in minutes
/// * the city-name column is resolved to the canonical `city`
///
/// Running it again on its own output yields the same derived values.
pub fn derive_columns(df: &DataFrame) -> PipelineResult<DataFrame> {
    let mut out = canonicalize_city_name(df, MERGED_TRIPS)?;

    let pickups = timestamps_of(&out, PICKUP_TIME)?;
    let dropoffs = timestamps_of(&out, DROPOFF_TIME)?;

    let pickup_dates: Vec<Option<NaiveDate>> =
        pickups.iter().map(|ts| ts.map(|ts| ts.date())).collect();
    let durations: Vec<Option<f64>> = pickups
        .iter()
        .zip(&dropoffs)
        .map(|(pickup, dropoff)| match (pickup, dropoff) {
            (Some(pickup), Some(dropoff)) => Some(duration_minutes(*pickup, *dropoff)),
            _ => None,
        })
        .collect();

    out.with_column(Series::new(PICKUP_TIME.into(), pickups))?;
    out.with_column(Series::new(DROPOFF_TIME.into(), dropoffs))?;
    out.with_column(Series::new(PICKUP_DATE.into(), pickup_dates))?;
    out.with_column(Series::new(TRIP_DURATION_MINUTES.into(), durations))?;

    Ok(out)
}

/// Read a timestamp column, parsing text cells when it is not yet typed.
fn timestamps_of(df: &DataFrame, name: &str) -> PipelineResult<Vec<Option<NaiveDateTime>>> {
    let column = df
        .column(name)
        .map_err(|_| PipelineError::missing_column(MERGED_TRIPS, name))?;

    if let DataType::Datetime(_, _) = column.dtype() {
        let typed = column.as_materialized_series().datetime()?;
        return Ok(typed.as_datetime_iter().collect());
    }

    let text = column.cast(&DataType::String)?;
    TimestampParser::parse_column(text.str()?.into_iter()).map_err(|(row, value)| {
        PipelineError::ParseError {
            column: name.to_string(),
            row,
            value,
        }
    })
}
