//! The Aggregator: metrics and grouped views over `MergedTrip`.
//!
//! - [`analysis`]: scalar metrics, date series and keyed series
//!
//! # Example
//!
//! ```no_run
//! use carshare_metrics::algorithms::compute_metrics;
//! use polars::prelude::*;
//!
//! # fn example(merged: DataFrame) -> carshare_metrics::core::PipelineResult<()> {
//! let metrics = compute_metrics(&merged)?;
//! println!("{} trips, {:.2} km", metrics.total_trips, metrics.total_distance);
//! # Ok(())
//! # }
//! ```

pub mod analysis;


pub use analysis::{
    avg_trip_duration_by_city, compute_metrics, cumulative_revenue_over_time, revenue_per_model,
    top_model_by_revenue, total_distance, total_trips, trips_over_time, with_cumulative_revenue,
    DashboardMetrics, DatePoint, GroupValue,
};
