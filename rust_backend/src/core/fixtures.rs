//! Small in-memory relations shared by unit tests.

use polars::prelude::*;

use crate::core::SourceTables;

/// Four trips: two Toyota Corolla trips in Berlin, one BMW X5 trip in Munich,
/// and one trip whose car id matches no car.
pub(crate) fn sample_tables() -> SourceTables {
    let trips = df!(
        "id" => [1i64, 2, 3, 4],
        "car_id" => [10i64, 10, 11, 99],
        "customer_id" => [100i64, 101, 102, 103],
        "pickup_time" => [
            "2024-01-01T08:00",
            "2024-01-02T09:00",
            "2024-01-02 10:00:00",
            "2024-01-03T12:00:00+02:00",
        ],
        "dropoff_time" => [
            "2024-01-01T08:30",
            "2024-01-02T09:15",
            "2024-01-02 10:45:00",
            "2024-01-03T12:20:00+02:00",
        ],
        "distance" => [10.0, 5.0, 20.0, 7.5],
        "revenue" => [100.0, 50.0, 80.0, 30.0],
    )
    .unwrap();

    let cars = df!(
        "id" => [10i64, 11, 12],
        "brand" => ["Toyota", "BMW", "Tesla"],
        "model" => ["Corolla", "X5", "Model 3"],
        "city_id" => [1i64, 2, 1],
    )
    .unwrap();

    let cities = df!(
        "city_id" => [1i64, 2],
        "city_name" => ["Berlin", "Munich"],
    )
    .unwrap();

    SourceTables::new(trips, cars, cities)
}

/// Source relations with the right columns and no rows.
pub(crate) fn empty_tables() -> SourceTables {
    let trips = df!(
        "id" => Vec::<i64>::new(),
        "car_id" => Vec::<i64>::new(),
        "customer_id" => Vec::<i64>::new(),
        "pickup_time" => Vec::<&str>::new(),
        "dropoff_time" => Vec::<&str>::new(),
        "distance" => Vec::<f64>::new(),
        "revenue" => Vec::<f64>::new(),
    )
    .unwrap();

    let mut tables = sample_tables();
    tables.trips = trips;
    tables
}
