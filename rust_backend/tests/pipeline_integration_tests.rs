//! End-to-end tests: CSV files on disk through to the dashboard metrics.

mod support;

use carshare_metrics::algorithms::{compute_metrics, GroupValue};
use carshare_metrics::api::format_thousands;
use carshare_metrics::config::{DashboardConfig, DatasetSettings};
use carshare_metrics::core::{BrandSelection, PipelineError};
use carshare_metrics::io::{CsvSourceLoader, SourceLoader};
use carshare_metrics::preprocessing::merge_trips;
use carshare_metrics::services::DashboardService;
use chrono::NaiveDate;
use tempfile::TempDir;

use support::write_csv_dataset;

// ==================== Helper Functions ====================

fn service_for(dir: &TempDir) -> DashboardService<CsvSourceLoader> {
    let config = DashboardConfig {
        datasets: DatasetSettings::in_dir(dir.path()),
        ..DashboardConfig::default()
    };
    DashboardService::from_config(&config)
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
}

fn group(key: Option<&str>, value: f64) -> GroupValue {
    GroupValue {
        key: key.map(str::to_string),
        value,
    }
}

// ==================== End-to-end ====================

#[test]
fn test_full_dashboard_from_csv() {
    let dir = TempDir::new().unwrap();
    write_csv_dataset(dir.path());

    let view = service_for(&dir).render(&BrandSelection::all()).unwrap();
    let metrics = &view.metrics;

    assert_eq!(metrics.total_trips, 5);
    assert_eq!(metrics.total_distance, 69.0);
    assert_eq!(metrics.top_model_by_revenue.as_deref(), Some("X5"));
    assert_eq!(view.available_brands, vec!["BMW", "Toyota"]);

    let trips: Vec<(NaiveDate, u64)> = metrics
        .trips_over_time
        .iter()
        .map(|p| (p.date, p.value))
        .collect();
    assert_eq!(trips, vec![(date(1), 2), (date(2), 1), (date(3), 2)]);

    let cumulative: Vec<f64> = metrics
        .cumulative_revenue_over_time
        .iter()
        .map(|p| p.value)
        .collect();
    assert_eq!(cumulative, vec![160.0, 175.0, 245.0]);

    assert_eq!(
        metrics.revenue_per_model,
        vec![
            group(None, 10.0),
            group(Some("Corolla"), 100.0),
            group(Some("X5"), 120.0),
            group(Some("Yaris"), 15.0),
        ]
    );
    assert_eq!(
        metrics.avg_trip_duration_by_city,
        vec![
            group(None, 10.0),
            group(Some("Berlin"), 45.0),
            group(Some("Munich"), 20.0),
        ]
    );
}

#[test]
fn test_brand_filter_from_csv() {
    let dir = TempDir::new().unwrap();
    write_csv_dataset(dir.path());

    let selection: BrandSelection = ["Toyota"].into_iter().collect();
    let view = service_for(&dir).render(&selection).unwrap();

    assert_eq!(view.metrics.total_trips, 3);
    assert_eq!(view.metrics.total_distance, 36.5);
    assert_eq!(view.metrics.top_model_by_revenue.as_deref(), Some("Corolla"));
    assert_eq!(view.trips.height(), 3);
}

#[test]
fn test_preview_and_formatting() {
    let dir = TempDir::new().unwrap();
    write_csv_dataset(dir.path());

    let view = service_for(&dir).render(&BrandSelection::all()).unwrap();

    assert_eq!(view.preview(2).height(), 2);
    assert_eq!(format_thousands(view.metrics.total_distance, 2), "69.00");
}

#[test]
fn test_list_brands_from_csv() {
    let dir = TempDir::new().unwrap();
    write_csv_dataset(dir.path());

    let brands = service_for(&dir).available_brands().unwrap();
    assert_eq!(brands, vec!["BMW", "Toyota"]);
}

// ==================== Failure modes ====================

#[test]
fn test_missing_city_column_is_schema_error() {
    let dir = TempDir::new().unwrap();
    write_csv_dataset(dir.path());
    std::fs::write(dir.path().join("cities.csv"), "city_id,population\n1,3600000\n").unwrap();

    let err = service_for(&dir).render(&BrandSelection::all()).unwrap_err();
    match err.downcast_ref::<PipelineError>() {
        Some(PipelineError::SchemaError(message)) => assert!(message.contains("cities")),
        other => panic!("expected SchemaError, got {:?}", other),
    }
}

#[test]
fn test_unparseable_timestamp_is_parse_error() {
    let dir = TempDir::new().unwrap();
    write_csv_dataset(dir.path());
    std::fs::write(
        dir.path().join("trips.csv"),
        "id,car_id,pickup_time,dropoff_time,distance,revenue\n\
         1,1,2024-03-01 08:00:00,2024-03-01 08:30:00,1.0,1.0\n\
         2,1,yesterday,2024-03-01 09:00:00,1.0,1.0\n",
    )
    .unwrap();

    let err = service_for(&dir).render(&BrandSelection::all()).unwrap_err();
    match err.downcast_ref::<PipelineError>() {
        Some(PipelineError::ParseError { column, row, value }) => {
            assert_eq!(column, "pickup_time");
            assert_eq!(*row, 1);
            assert_eq!(value, "yesterday");
        }
        other => panic!("expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_missing_dataset_file() {
    let dir = TempDir::new().unwrap();
    let err = service_for(&dir).render(&BrandSelection::all()).unwrap_err();
    assert!(format!("{:#}", err).contains("not found"));
}

// ==================== Library entry points ====================

#[test]
fn test_merge_then_aggregate_without_service() {
    let dir = TempDir::new().unwrap();
    write_csv_dataset(dir.path());

    let tables = CsvSourceLoader::from_dir(dir.path()).load().unwrap();
    let merged = merge_trips(&tables).unwrap();
    let metrics = compute_metrics(&merged).unwrap();

    assert_eq!(merged.height(), 5);
    assert!(merged.column("city").is_ok());
    assert!(merged.column("trip_duration_minutes").is_ok());
    assert_eq!(metrics.total_trips, 5);
}
