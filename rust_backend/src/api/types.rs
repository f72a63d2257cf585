//! Presentation-facing types.
//!
//! A [`DashboardView`] is everything one dashboard render needs: the brand
//! options, the active selection, the metric snapshot and the filtered
//! relation for the tabular preview.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::algorithms::DashboardMetrics;
use crate::core::BrandSelection;

/// Result of one dashboard invocation
#[derive(Debug, Clone)]
pub struct DashboardView {
    /// Brands offered by the selector, sorted
    pub available_brands: Vec<String>,
    pub selection: BrandSelection,
    pub metrics: DashboardMetrics,
    /// Filtered MergedTrip relation
    pub trips: DataFrame,
}

impl DashboardView {
    /// First `rows` rows of the filtered relation
    pub fn preview(&self, rows: usize) -> DataFrame {
        preview(&self.trips, rows)
    }

    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary {
            available_brands: self.available_brands.clone(),
            selected_brands: self.selection.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

/// Serializable part of a [`DashboardView`] (everything except the relation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub available_brands: Vec<String>,
    /// Serialized as a sorted list of brand names
    pub selected_brands: BrandSelection,
    pub metrics: DashboardMetrics,
}

/// First `rows` rows of `df`; the whole relation when it is shorter.
pub fn preview(df: &DataFrame, rows: usize) -> DataFrame {
    df.head(Some(rows))
}
