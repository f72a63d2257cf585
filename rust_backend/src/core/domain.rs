//! Relation containers and column vocabulary.
//!
//! The pipeline works on Polars DataFrames. Column names are the implicit
//! contract with the data source, so they live here in one place and every
//! stage refers to them through [`columns`].

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Column names used by the source relations and by `MergedTrip`.
pub mod columns {
    /// Own identifier of trips and cars (and of cities in some sources).
    pub const ID: &str = "id";
    pub const CAR_ID: &str = "car_id";
    pub const CUSTOMER_ID: &str = "customer_id";
    pub const PICKUP_TIME: &str = "pickup_time";
    pub const DROPOFF_TIME: &str = "dropoff_time";
    pub const DISTANCE: &str = "distance";
    pub const REVENUE: &str = "revenue";

    pub const BRAND: &str = "brand";
    pub const MODEL: &str = "model";
    pub const CITY_ID: &str = "city_id";

    /// Canonical city-name column after schema resolution.
    pub const CITY: &str = "city";
    /// Preferred spelling of the city-name column in raw sources.
    pub const CITY_NAME: &str = "city_name";

    pub const PICKUP_DATE: &str = "pickup_date";
    pub const TRIP_DURATION_MINUTES: &str = "trip_duration_minutes";
    pub const CUMULATIVE_REVENUE: &str = "cumulative_revenue";

    /// Output column of per-date trip counts.
    pub const TRIP_COUNT: &str = "trips";
}

/// The three source relations as supplied by a loader.
#[derive(Debug, Clone)]
pub struct SourceTables {
    pub trips: DataFrame,
    pub cars: DataFrame,
    pub cities: DataFrame,
}

impl SourceTables {
    pub fn new(trips: DataFrame, cars: DataFrame, cities: DataFrame) -> Self {
        Self {
            trips,
            cars,
            cities,
        }
    }

    /// Row counts as `(trips, cars, cities)`.
    pub fn row_counts(&self) -> (usize, usize, usize) {
        (self.trips.height(), self.cars.height(), self.cities.height())
    }
}

/// Set of car brands chosen by the user.
///
/// An empty selection means "no filter": every trip passes, including trips
/// whose brand is unknown.
///
/// # Examples
///
/// ```
/// use carshare_metrics::core::BrandSelection;
///
/// let selection: BrandSelection = ["Toyota", "BMW"].into_iter().collect();
/// assert!(selection.contains("BMW"));
/// assert!(!selection.contains("Tesla"));
/// assert!(BrandSelection::all().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandSelection(BTreeSet<String>);

impl BrandSelection {
    /// The empty selection, which disables filtering.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, brand: &str) -> bool {
        self.0.contains(brand)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for BrandSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
