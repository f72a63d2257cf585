//! Turning the three source relations into `MergedTrip`.
//!
//! - [`schema`]: one-off schema resolution after load (column spellings, types)
//! - [`join`]: the Joiner, left joins trips → cars → cities
//! - [`derive`]: the Column Deriver, typed timestamps, pickup date, duration
//! - [`pipeline`]: the stages chained together

pub mod derive;
pub mod join;
pub mod pipeline;
pub mod schema;

pub use derive::derive_columns;
pub use join::join_sources;
pub use pipeline::{merge_trips, MergeConfig, MergePipeline, MergedTrips};
pub use schema::{canonicalize_city_name, require_columns, resolve_sources, CityNameColumn};
