use anyhow::{Context, Result};
use log::{debug, info};
use polars::prelude::*;

use crate::algorithms::{compute_metrics, with_cumulative_revenue};
use crate::api::DashboardView;
use crate::config::DashboardConfig;
use crate::core::{BrandSelection, PipelineResult, SourceTables};
use crate::io::{CsvSourceLoader, DatasetCache, SourceLoader};
use crate::preprocessing::{MergeConfig, MergePipeline};
use crate::transformations::{available_brands, available_brands_in_sources, filter_by_brands};

/// Orchestrates one dashboard render over cached source relations
///
/// Each [`render`](Self::render) is an independent invocation: merge, filter,
/// aggregate. Only the source relations are shared between invocations.
pub struct DashboardService<L> {
    cache: DatasetCache<L>,
}

impl<L: SourceLoader> DashboardService<L> {
    pub fn new(loader: L) -> Self {
        Self {
            cache: DatasetCache::new(loader),
        }
    }

    pub fn cache(&self) -> &DatasetCache<L> {
        &self.cache
    }

    /// The unfiltered `MergedTrip` relation
    pub fn merged_trips(&self) -> Result<DataFrame> {
        let tables = self.cache.get()?;
        Ok(merge_resolved(&tables)?)
    }

    /// Brand options for the selector, read from the cached sources
    pub fn available_brands(&self) -> Result<Vec<String>> {
        let tables = self.cache.get()?;
        Ok(available_brands_in_sources(&tables)?)
    }

    /// Render the dashboard for one brand selection.
    ///
    /// Any core failure aborts the whole render.
    pub fn render(&self, selection: &BrandSelection) -> Result<DashboardView> {
        let tables = self.cache.get()?;
        run_pipeline(&tables, selection).context("Failed to render dashboard")
    }
}

impl DashboardService<CsvSourceLoader> {
    /// Service reading the CSV files named in `config`
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(CsvSourceLoader::new(config.datasets.clone()))
    }
}

/// Merge, filter and aggregate schema-resolved source relations
pub fn run_pipeline(
    tables: &SourceTables,
    selection: &BrandSelection,
) -> PipelineResult<DashboardView> {
    let merged = merge_resolved(tables)?;
    let brands = available_brands(&merged)?;

    let filtered = filter_by_brands(&merged, selection)?;
    let trips = with_cumulative_revenue(&filtered)?;
    info!(
        "Rendering {} of {} trips for {} selected brand(s)",
        trips.height(),
        merged.height(),
        selection.len()
    );

    let metrics = compute_metrics(&trips)?;
    debug!("Metrics: {:?}", metrics);

    Ok(DashboardView {
        available_brands: brands,
        selection: selection.clone(),
        metrics,
        trips,
    })
}

fn merge_resolved(tables: &SourceTables) -> PipelineResult<DataFrame> {
    let pipeline = MergePipeline::with_config(MergeConfig {
        resolve_schema: false,
    });
    Ok(pipeline.process(tables)?.dataframe)
}
