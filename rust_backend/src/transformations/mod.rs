//! Row filtering over the `MergedTrip` relation.
//!
//! # Example
//!
//! ```no_run
//! use carshare_metrics::core::BrandSelection;
//! use carshare_metrics::transformations::filter_by_brands;
//! use polars::prelude::*;
//!
//! # fn example(merged: DataFrame) -> carshare_metrics::core::PipelineResult<()> {
//! let selection: BrandSelection = ["Toyota"].into_iter().collect();
//! let toyota_trips = filter_by_brands(&merged, &selection)?;
//! # Ok(())
//! # }
//! ```

pub mod filtering;

pub use filtering::{available_brands, available_brands_in_sources, filter_by_brands};
