//! Car-sharing metrics pipeline.
//!
//! Joins the trips, cars and cities relations into one `MergedTrip`
//! relation, filters it by brand and computes the dashboard's aggregate
//! views with Polars.
//!
//! ```no_run
//! use carshare_metrics::config::DashboardConfig;
//! use carshare_metrics::services::DashboardService;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = DashboardConfig::default();
//! let service = DashboardService::from_config(&config);
//! let view = service.render(&config.brand_selection())?;
//! println!("{:?}", view.metrics.top_model_by_revenue);
//! # Ok(())
//! # }
//! ```

pub mod algorithms;
pub mod api;
pub mod config;
pub mod core;
pub mod io;
pub mod parsing;
pub mod preprocessing;
pub mod services;
pub mod transformations;

pub use crate::algorithms::{compute_metrics, DashboardMetrics};
pub use crate::core::{BrandSelection, PipelineError, PipelineResult, SourceTables};
pub use crate::services::{run_pipeline, DashboardService};
