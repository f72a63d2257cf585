//! Joiner: denormalise trips with their car and the car's city.

use log::debug;
use polars::prelude::*;

use crate::core::columns::*;
use crate::core::{PipelineResult, SourceTables};
use crate::preprocessing::schema::{cast_column, require_columns};

/// Temporary column carrying the original trip order through the joins.
const TRIP_ROW: &str = "__trip_row";

/// Identifier columns that only exist to resolve the joins.
const JOIN_ONLY_COLUMNS: &[&str] = &[CAR_ID, CITY_ID, CUSTOMER_ID, TRIP_ROW];

/// Left-join trips with cars (`trips.car_id == cars.id`) and then with
/// cities (`cars.city_id == cities.city_id`).
///
/// Expects schema-resolved tables (see
/// [`resolve_sources`](crate::preprocessing::schema::resolve_sources)).
/// Every trip yields exactly one output row in the original order; car and
/// city fields are null when a key has no match. The join keys and
/// `customer_id` are dropped from the output.
pub fn join_sources(tables: &SourceTables) -> PipelineResult<DataFrame> {
    require_columns(&tables.trips, "trips", &[CAR_ID])?;
    require_columns(&tables.cars, "cars", &[ID, CITY_ID])?;
    require_columns(&tables.cities, "cities", &[CITY_ID])?;

    // Keys are compared as strings so integer and text ids can meet
    let mut trips = tables.trips.clone();
    cast_column(&mut trips, CAR_ID, &DataType::String)?;

    let mut cars = tables.cars.clone();
    cars.rename(ID, CAR_ID.into())?;
    cast_column(&mut cars, CAR_ID, &DataType::String)?;
    cast_column(&mut cars, CITY_ID, &DataType::String)?;

    let mut cities = tables.cities.clone();
    cast_column(&mut cities, CITY_ID, &DataType::String)?;

    let joined = trips
        .lazy()
        .with_row_index(TRIP_ROW, None)
        .left_join(cars.lazy(), col(CAR_ID), col(CAR_ID))
        .left_join(cities.lazy(), col(CITY_ID), col(CITY_ID))
        .sort([TRIP_ROW], SortMultipleOptions::default())
        .collect()?;

    let keep: Vec<PlSmallStr> = joined
        .get_column_names()
        .into_iter()
        .filter(|name| !JOIN_ONLY_COLUMNS.contains(&name.as_str()))
        .cloned()
        .collect();
    let merged = joined.select(keep)?;

    debug!(
        "Joined {} trips into {} rows with columns {:?}",
        tables.trips.height(),
        merged.height(),
        merged.get_column_names()
    );

    Ok(merged)
}
