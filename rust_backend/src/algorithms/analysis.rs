use chrono::NaiveDate;
use log::warn;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::columns::*;
use crate::core::{PipelineError, PipelineResult};
use crate::preprocessing::schema::{require_columns, MERGED_TRIPS};

/// One point of a date-ordered series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatePoint<T> {
    pub date: NaiveDate,
    pub value: T,
}

/// One group of a keyed series. `key` is `None` for the group of rows whose
/// grouping column is null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupValue {
    pub key: Option<String>,
    pub value: f64,
}

/// All aggregate views rendered by the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub total_trips: usize,
    pub total_distance: f64,
    /// `None` when there is no model revenue to rank
    pub top_model_by_revenue: Option<String>,
    pub trips_over_time: Vec<DatePoint<u64>>,
    pub revenue_per_model: Vec<GroupValue>,
    pub cumulative_revenue_over_time: Vec<DatePoint<f64>>,
    pub avg_trip_duration_by_city: Vec<GroupValue>,
}

/// Compute every aggregate view of a (possibly filtered) `MergedTrip` relation
///
/// An empty relation is valid input. The only view without a value for it
/// is the top model, reported as `None`.
pub fn compute_metrics(df: &DataFrame) -> PipelineResult<DashboardMetrics> {
    let revenue_per_model = revenue_per_model(df)?;
    let top_model_by_revenue = pick_top_model(&revenue_per_model);
    if top_model_by_revenue.is_none() {
        warn!("No model revenue in {} rows, top model left empty", df.height());
    }

    Ok(DashboardMetrics {
        total_trips: total_trips(df),
        total_distance: total_distance(df)?,
        top_model_by_revenue,
        trips_over_time: trips_over_time(df)?,
        revenue_per_model,
        cumulative_revenue_over_time: cumulative_revenue_over_time(df)?,
        avg_trip_duration_by_city: avg_trip_duration_by_city(df)?,
    })
}

/// Number of trips
pub fn total_trips(df: &DataFrame) -> usize {
    df.height()
}

/// Sum of `distance`, nulls counted as zero
pub fn total_distance(df: &DataFrame) -> PipelineResult<f64> {
    require_columns(df, MERGED_TRIPS, &[DISTANCE])?;

    let distance = df.column(DISTANCE)?.cast(&DataType::Float64)?;
    Ok(distance.f64()?.sum().unwrap_or(0.0))
}

/// Summed `revenue` per `model`, ordered by model name (null model first)
pub fn revenue_per_model(df: &DataFrame) -> PipelineResult<Vec<GroupValue>> {
    require_columns(df, MERGED_TRIPS, &[MODEL, REVENUE])?;

    let grouped = df
        .clone()
        .lazy()
        .group_by([col(MODEL).cast(DataType::String)])
        .agg([col(REVENUE).cast(DataType::Float64).sum()])
        .sort([MODEL], SortMultipleOptions::default())
        .collect()?;

    grouped_values(&grouped, MODEL, REVENUE)
}

/// Model with the highest summed revenue
///
/// Ties go to the lexicographically smallest model name. Rows without a
/// model never win.
///
/// # Errors
///
/// [`PipelineError::EmptyInputError`] when no row carries a model.
pub fn top_model_by_revenue(df: &DataFrame) -> PipelineResult<String> {
    let per_model = revenue_per_model(df)?;
    pick_top_model(&per_model).ok_or_else(|| {
        PipelineError::EmptyInputError("no model revenue to rank".to_string())
    })
}

/// `groups` must be ordered by key so the first maximum is the smallest name.
fn pick_top_model(groups: &[GroupValue]) -> Option<String> {
    let mut best: Option<(&str, f64)> = None;
    for group in groups {
        let Some(model) = group.key.as_deref() else {
            continue;
        };
        if group.value.is_nan() {
            continue;
        }
        match best {
            Some((_, top)) if group.value <= top => {}
            _ => best = Some((model, group.value)),
        }
    }
    best.map(|(model, _)| model.to_string())
}

/// Trips per `pickup_date`, ascending. Rows without a pickup date are skipped.
pub fn trips_over_time(df: &DataFrame) -> PipelineResult<Vec<DatePoint<u64>>> {
    require_columns(df, MERGED_TRIPS, &[PICKUP_DATE])?;

    let grouped = df
        .clone()
        .lazy()
        .filter(col(PICKUP_DATE).is_not_null())
        .group_by([col(PICKUP_DATE)])
        .agg([len().cast(DataType::UInt64).alias(TRIP_COUNT)])
        .sort([PICKUP_DATE], SortMultipleOptions::default())
        .collect()?;

    let dates = grouped.column(PICKUP_DATE)?.as_materialized_series().date()?;
    let counts = grouped.column(TRIP_COUNT)?.u64()?;

    Ok(dates
        .as_date_iter()
        .zip(counts.into_iter())
        .filter_map(|(date, count)| {
            Some(DatePoint {
                date: date?,
                value: count?,
            })
        })
        .collect())
}

/// Revenue accumulated over the timeline: each date's value is the revenue
/// of every trip picked up on or before that date.
pub fn cumulative_revenue_over_time(df: &DataFrame) -> PipelineResult<Vec<DatePoint<f64>>> {
    require_columns(df, MERGED_TRIPS, &[PICKUP_DATE, REVENUE])?;

    let daily = df
        .clone()
        .lazy()
        .filter(col(PICKUP_DATE).is_not_null())
        .group_by([col(PICKUP_DATE)])
        .agg([col(REVENUE).cast(DataType::Float64).sum()])
        .sort([PICKUP_DATE], SortMultipleOptions::default())
        .collect()?;

    let dates = daily.column(PICKUP_DATE)?.as_materialized_series().date()?;
    let revenue = daily.column(REVENUE)?.f64()?;

    let mut running = 0.0;
    Ok(dates
        .as_date_iter()
        .zip(revenue.into_iter())
        .filter_map(|(date, revenue)| {
            let date = date?;
            running += revenue.unwrap_or(0.0);
            Some(DatePoint {
                date,
                value: running,
            })
        })
        .collect())
}

/// Add the row-level `cumulative_revenue` column.
///
/// Rows are accumulated in pickup-date order, keeping input order within a
/// date, so the last row of each date carries that date's value from
/// [`cumulative_revenue_over_time`]. Rows without a pickup date get null.
pub fn with_cumulative_revenue(df: &DataFrame) -> PipelineResult<DataFrame> {
    require_columns(df, MERGED_TRIPS, &[PICKUP_DATE, REVENUE])?;

    let dates: Vec<Option<NaiveDate>> = df
        .column(PICKUP_DATE)?
        .as_materialized_series()
        .date()?
        .as_date_iter()
        .collect();
    let revenue_column = df.column(REVENUE)?.cast(&DataType::Float64)?;
    let revenue: Vec<Option<f64>> = revenue_column.f64()?.into_iter().collect();

    let mut order: Vec<usize> = (0..dates.len()).filter(|&row| dates[row].is_some()).collect();
    order.sort_by_key(|&row| dates[row]);

    let mut cumulative: Vec<Option<f64>> = vec![None; dates.len()];
    let mut running = 0.0;
    for row in order {
        running += revenue[row].unwrap_or(0.0);
        cumulative[row] = Some(running);
    }

    let mut out = df.clone();
    out.with_column(Series::new(CUMULATIVE_REVENUE.into(), cumulative))?;
    Ok(out)
}

/// Mean `trip_duration_minutes` per `city`, ordered by city (null city first)
///
/// Null durations are excluded from both sum and count; a city with no
/// duration at all is omitted.
pub fn avg_trip_duration_by_city(df: &DataFrame) -> PipelineResult<Vec<GroupValue>> {
    require_columns(df, MERGED_TRIPS, &[CITY, TRIP_DURATION_MINUTES])?;

    let grouped = df
        .clone()
        .lazy()
        .group_by([col(CITY).cast(DataType::String)])
        .agg([col(TRIP_DURATION_MINUTES).cast(DataType::Float64).mean()])
        .sort([CITY], SortMultipleOptions::default())
        .collect()?;

    grouped_values(&grouped, CITY, TRIP_DURATION_MINUTES)
}

fn grouped_values(df: &DataFrame, key: &str, value: &str) -> PipelineResult<Vec<GroupValue>> {
    let keys = df.column(key)?.str()?;
    let values = df.column(value)?.f64()?;

    Ok(keys
        .into_iter()
        .zip(values.into_iter())
        .filter_map(|(key, value)| {
            value.map(|value| GroupValue {
                key: key.map(str::to_string),
                value,
            })
        })
        .collect())
}
