//! Core domain types for the car-sharing metrics pipeline.
//!
//! This module defines the column vocabulary shared by every pipeline stage,
//! the container for the three source relations, the brand selection used by
//! the filter, and the pipeline error taxonomy.

pub mod domain;
pub mod error;

#[cfg(test)]
pub(crate) mod fixtures;

pub use domain::{columns, BrandSelection, SourceTables};
pub use error::{PipelineError, PipelineResult};
