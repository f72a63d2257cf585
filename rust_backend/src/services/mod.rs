//! Service layer: per-invocation orchestration of load, merge, filter and
//! aggregate.

pub mod dashboard;

pub use dashboard::{run_pipeline, DashboardService};
