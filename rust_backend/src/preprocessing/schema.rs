//! Schema resolution for the source relations.
//!
//! Source CSVs are an implicit contract: column names can vary slightly
//! between data drops (the city name appears as `city_name` or `city`, the
//! city key as `city_id` or `id`) and numeric columns may be inferred as
//! integers. Resolution runs once after load and produces the canonical
//! shape every later stage relies on.

use log::{debug, info};
use polars::prelude::*;

use crate::core::columns::*;
use crate::core::{PipelineError, PipelineResult, SourceTables};

/// Relation label used in schema errors raised on `MergedTrip`.
pub const MERGED_TRIPS: &str = "merged trips";

/// Which spelling of the city-name column a relation carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CityNameColumn {
    /// `city_name`, preferred when present.
    CityName,
    /// `city`, the fallback and the canonical output name.
    City,
}

impl CityNameColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            CityNameColumn::CityName => CITY_NAME,
            CityNameColumn::City => CITY,
        }
    }

    /// Pick the city-name column of `df`: `city_name` first, then `city`.
    pub fn resolve(df: &DataFrame, relation: &str) -> PipelineResult<Self> {
        if has_column(df, CITY_NAME) {
            Ok(CityNameColumn::CityName)
        } else if has_column(df, CITY) {
            Ok(CityNameColumn::City)
        } else {
            Err(PipelineError::SchemaError(format!(
                "relation '{}' has neither '{}' nor '{}' column",
                relation, CITY_NAME, CITY
            )))
        }
    }
}

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

/// Fail with [`PipelineError::SchemaError`] on the first absent column.
pub fn require_columns(df: &DataFrame, relation: &str, columns: &[&str]) -> PipelineResult<()> {
    match columns.iter().find(|name| !has_column(df, name)) {
        Some(missing) => Err(PipelineError::missing_column(relation, missing)),
        None => Ok(()),
    }
}

/// Key column of the cities relation: `city_id` when present, else `id`.
pub fn resolve_city_key(cities: &DataFrame) -> PipelineResult<&'static str> {
    if has_column(cities, CITY_ID) {
        Ok(CITY_ID)
    } else if has_column(cities, ID) {
        Ok(ID)
    } else {
        Err(PipelineError::SchemaError(format!(
            "relation 'cities' has neither '{}' nor '{}' column",
            CITY_ID, ID
        )))
    }
}

/// Rename the resolved city-name column to the canonical `city`.
///
/// When both spellings exist, `city_name` wins and the stale `city` column
/// is dropped. A relation already in canonical shape is returned unchanged.
pub fn canonicalize_city_name(df: &DataFrame, relation: &str) -> PipelineResult<DataFrame> {
    let resolved = CityNameColumn::resolve(df, relation)?;
    debug!("Resolved city column of '{}' to '{}'", relation, resolved.as_str());

    match resolved {
        CityNameColumn::City => Ok(df.clone()),
        CityNameColumn::CityName => {
            let mut out = if has_column(df, CITY) {
                df.drop(CITY)?
            } else {
                df.clone()
            };
            out.rename(CITY_NAME, CITY.into())?;
            Ok(out)
        }
    }
}

/// Cast `name` in place. Cells that cannot be cast become null.
pub fn cast_column(df: &mut DataFrame, name: &str, dtype: &DataType) -> PipelineResult<()> {
    let casted = df.column(name)?.cast(dtype)?;
    df.with_column(casted)?;
    Ok(())
}

/// Validate and normalise freshly loaded source relations.
///
/// * trips keep their columns; `distance` and `revenue` become Float64
/// * cars get `brand` and `model` as String
/// * cities end up keyed by `city_id` with the name in `city`
pub fn resolve_sources(tables: &SourceTables) -> PipelineResult<SourceTables> {
    require_columns(
        &tables.trips,
        "trips",
        &[CAR_ID, PICKUP_TIME, DROPOFF_TIME, DISTANCE, REVENUE],
    )?;
    require_columns(&tables.cars, "cars", &[ID, BRAND, MODEL, CITY_ID])?;

    let mut trips = tables.trips.clone();
    cast_column(&mut trips, DISTANCE, &DataType::Float64)?;
    cast_column(&mut trips, REVENUE, &DataType::Float64)?;

    let mut cars = tables.cars.clone();
    cast_column(&mut cars, BRAND, &DataType::String)?;
    cast_column(&mut cars, MODEL, &DataType::String)?;

    let city_key = resolve_city_key(&tables.cities)?;
    let mut cities = tables.cities.clone();
    if city_key == ID {
        cities.rename(ID, CITY_ID.into())?;
    } else if has_column(&cities, ID) {
        // A surrogate id next to city_id would collide with the trip id after the join
        cities = cities.drop(ID)?;
    }
    let mut cities = canonicalize_city_name(&cities, "cities")?;
    cast_column(&mut cities, CITY, &DataType::String)?;

    for (relation, df) in [("trips", &trips), ("cars", &cars), ("cities", &cities)] {
        debug!("{} columns: {:?}", relation, df.get_column_names());
    }
    info!(
        "Resolved source schemas: {} trips, {} cars, {} cities",
        trips.height(),
        cars.height(),
        cities.height()
    );

    Ok(SourceTables::new(trips, cars, cities))
}
