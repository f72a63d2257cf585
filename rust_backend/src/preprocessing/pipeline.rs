use log::{info, warn};
use polars::prelude::*;

use crate::core::columns::*;
use crate::core::{PipelineResult, SourceTables};
use crate::preprocessing::derive::derive_columns;
use crate::preprocessing::join::join_sources;
use crate::preprocessing::schema::resolve_sources;

/// Result of building the `MergedTrip` relation
#[derive(Debug, Clone)]
pub struct MergedTrips {
    pub dataframe: DataFrame,
    pub total_trips: usize,
    /// Trips whose car could not be found (null brand)
    pub trips_without_brand: usize,
    /// Trips whose car has no known city
    pub trips_without_city: usize,
}

/// Configuration for the merge pipeline
#[derive(Debug, Clone, Copy)]
pub struct MergeConfig {
    /// Run schema resolution before joining. Disable when the tables come
    /// from a [`DatasetCache`](crate::io::DatasetCache), which resolves once on load.
    pub resolve_schema: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            resolve_schema: true,
        }
    }
}

/// Joiner followed by Column Deriver
pub struct MergePipeline {
    config: MergeConfig,
}

impl MergePipeline {
    /// Create a new pipeline with default configuration
    pub fn new() -> Self {
        Self {
            config: MergeConfig::default(),
        }
    }

    /// Create a pipeline with custom configuration
    pub fn with_config(config: MergeConfig) -> Self {
        Self { config }
    }

    /// Build `MergedTrip` from the three source relations.
    pub fn process(&self, tables: &SourceTables) -> PipelineResult<MergedTrips> {
        // Step 1: Canonical schema
        let resolved;
        let tables = if self.config.resolve_schema {
            resolved = resolve_sources(tables)?;
            &resolved
        } else {
            tables
        };

        // Step 2: Join
        let joined = join_sources(tables)?;

        // Step 3: Derived columns
        let dataframe = derive_columns(&joined)?;

        // Step 4: Statistics
        let total_trips = dataframe.height();
        let trips_without_brand = dataframe.column(BRAND)?.null_count();
        let trips_without_city = dataframe.column(CITY)?.null_count();

        if trips_without_brand > 0 || trips_without_city > 0 {
            warn!(
                "{} of {} trips have no matching car, {} have no matching city",
                trips_without_brand, total_trips, trips_without_city
            );
        }
        info!("Built merged trips relation with {} rows", total_trips);

        Ok(MergedTrips {
            dataframe,
            total_trips,
            trips_without_brand,
            trips_without_city,
        })
    }
}

impl Default for MergePipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to build `MergedTrip` from raw source relations
pub fn merge_trips(tables: &SourceTables) -> PipelineResult<DataFrame> {
    MergePipeline::new()
        .process(tables)
        .map(|merged| merged.dataframe)
}
