//! Shared builders for the integration suites.
#![allow(dead_code)]

use carshare_metrics::core::SourceTables;
use polars::prelude::*;
use std::fs;
use std::path::Path;

/// One generated trip row
#[derive(Debug, Clone)]
pub struct TripRow {
    pub car_id: i64,
    pub day: u32,
    pub start_minute: u32,
    pub duration_minutes: u32,
    pub distance: f64,
    pub revenue: f64,
}

/// Fixed fleet: cars 1..=4 spread over three brands and two cities.
/// Car 4 references city 3, which does not exist.
pub fn fleet() -> (DataFrame, DataFrame) {
    let cars = df!(
        "id" => [1i64, 2, 3, 4],
        "brand" => ["Toyota", "Toyota", "BMW", "Renault"],
        "model" => ["Corolla", "Yaris", "X5", "Zoe"],
        "city_id" => [1i64, 2, 1, 3],
    )
    .unwrap();
    let cities = df!(
        "city_id" => [1i64, 2],
        "city_name" => ["Berlin", "Munich"],
    )
    .unwrap();
    (cars, cities)
}

fn timestamp(day: u32, minute: u32) -> String {
    let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        + chrono::Duration::days(i64::from(day));
    let time = date.and_hms_opt(0, 0, 0).unwrap() + chrono::Duration::minutes(i64::from(minute));
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn trips_frame(rows: &[TripRow]) -> DataFrame {
    let ids: Vec<i64> = (1..=rows.len() as i64).collect();
    let car_ids: Vec<i64> = rows.iter().map(|r| r.car_id).collect();
    let pickups: Vec<String> = rows
        .iter()
        .map(|r| timestamp(r.day, r.start_minute))
        .collect();
    let dropoffs: Vec<String> = rows
        .iter()
        .map(|r| timestamp(r.day, r.start_minute + r.duration_minutes))
        .collect();
    let distances: Vec<f64> = rows.iter().map(|r| r.distance).collect();
    let revenues: Vec<f64> = rows.iter().map(|r| r.revenue).collect();

    df!(
        "id" => ids,
        "car_id" => car_ids,
        "pickup_time" => pickups,
        "dropoff_time" => dropoffs,
        "distance" => distances,
        "revenue" => revenues,
    )
    .unwrap()
}

pub fn tables_from_rows(rows: &[TripRow]) -> SourceTables {
    let (cars, cities) = fleet();
    SourceTables::new(trips_frame(rows), cars, cities)
}

/// Write a small dataset as CSV files named the way the loader expects.
pub fn write_csv_dataset(dir: &Path) {
    fs::write(
        dir.join("trips.csv"),
        "id,car_id,customer_id,pickup_time,dropoff_time,distance,revenue\n\
         1,1,900,2024-03-01 08:00:00,2024-03-01 08:30:00,12.5,40.0\n\
         2,3,901,2024-03-01 09:00:00,2024-03-01 10:00:00,30.0,120.0\n\
         3,2,902,2024-03-02 07:15:00,2024-03-02 07:35:00,4.0,15.0\n\
         4,1,903,2024-03-03T18:00:00Z,2024-03-03T18:45:00Z,20.0,60.0\n\
         5,7,904,2024-03-03 19:00:00,2024-03-03 19:10:00,2.5,10.0\n",
    )
    .unwrap();
    fs::write(
        dir.join("cars.csv"),
        "id,brand,model,city_id\n1,Toyota,Corolla,1\n2,Toyota,Yaris,2\n3,BMW,X5,1\n",
    )
    .unwrap();
    fs::write(
        dir.join("cities.csv"),
        "city_id,city_name\n1,Berlin\n2,Munich\n",
    )
    .unwrap();
}
