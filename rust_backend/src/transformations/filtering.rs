use log::debug;
use polars::prelude::*;
use std::collections::{BTreeSet, HashSet};

use crate::core::columns::{BRAND, CAR_ID, ID};
use crate::core::{BrandSelection, PipelineResult, SourceTables};
use crate::preprocessing::schema::{require_columns, MERGED_TRIPS};

/// Keep the rows whose `brand` is in `selection`.
///
/// An empty selection returns the relation unchanged. Null brands never
/// match a non-empty selection, and a selection naming only unknown brands
/// yields an empty relation.
pub fn filter_by_brands(df: &DataFrame, selection: &BrandSelection) -> PipelineResult<DataFrame> {
    if selection.is_empty() {
        return Ok(df.clone());
    }
    require_columns(df, MERGED_TRIPS, &[BRAND])?;

    let brands = df.column(BRAND)?.cast(&DataType::String)?;
    let mask: BooleanChunked = brands
        .str()?
        .into_iter()
        .map(|brand| Some(brand.is_some_and(|b| selection.contains(b))))
        .collect();

    let filtered = df.filter(&mask)?;
    debug!(
        "Brand filter {:?} kept {} of {} rows",
        selection.iter().collect::<Vec<_>>(),
        filtered.height(),
        df.height()
    );

    Ok(filtered)
}

/// Distinct non-null brands present in `df`, sorted.
///
/// These are the options offered by the brand selector.
pub fn available_brands(df: &DataFrame) -> PipelineResult<Vec<String>> {
    require_columns(df, MERGED_TRIPS, &[BRAND])?;

    let brands = df.column(BRAND)?.cast(&DataType::String)?;
    let distinct: BTreeSet<String> = brands
        .str()?
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect();

    Ok(distinct.into_iter().collect())
}

/// Distinct brands of the cars referenced by at least one trip, sorted.
///
/// Gives the same options as [`available_brands`] on the merged relation
/// without running the joins.
pub fn available_brands_in_sources(tables: &SourceTables) -> PipelineResult<Vec<String>> {
    require_columns(&tables.trips, "trips", &[CAR_ID])?;
    require_columns(&tables.cars, "cars", &[ID, BRAND])?;

    // Ids are compared as strings, as in the joiner
    let trip_cars = tables.trips.column(CAR_ID)?.cast(&DataType::String)?;
    let used: HashSet<&str> = trip_cars.str()?.into_iter().flatten().collect();

    let car_ids = tables.cars.column(ID)?.cast(&DataType::String)?;
    let brands = tables.cars.column(BRAND)?.cast(&DataType::String)?;
    let distinct: BTreeSet<String> = car_ids
        .str()?
        .into_iter()
        .zip(brands.str()?.into_iter())
        .filter_map(|(id, brand)| match (id, brand) {
            (Some(id), Some(brand)) if used.contains(id) => Some(brand.to_string()),
            _ => None,
        })
        .collect();

    Ok(distinct.into_iter().collect())
}
