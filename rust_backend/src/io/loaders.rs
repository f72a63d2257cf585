use anyhow::{Context, Result};
use log::{debug, info};
use polars::prelude::*;
use std::path::{Path, PathBuf};

use crate::config::DatasetSettings;
use crate::core::SourceTables;

/// Supplies the three raw source relations.
pub trait SourceLoader: Send + Sync {
    fn load(&self) -> Result<SourceTables>;
}

/// Reads trips, cars and cities from CSV files with a header row
#[derive(Debug, Clone)]
pub struct CsvSourceLoader {
    settings: DatasetSettings,
}

impl CsvSourceLoader {
    pub fn new(settings: DatasetSettings) -> Self {
        Self { settings }
    }

    /// Load `trips.csv`, `cars.csv` and `cities.csv` from one directory
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self::new(DatasetSettings::in_dir(dir))
    }

    pub fn settings(&self) -> &DatasetSettings {
        &self.settings
    }
}

impl SourceLoader for CsvSourceLoader {
    fn load(&self) -> Result<SourceTables> {
        let trips = read_csv(&self.settings.trips).context("Failed to load trips")?;
        let cars = read_csv(&self.settings.cars).context("Failed to load cars")?;
        let cities = read_csv(&self.settings.cities).context("Failed to load cities")?;

        info!(
            "Loaded {} trips, {} cars, {} cities",
            trips.height(),
            cars.height(),
            cities.height()
        );

        Ok(SourceTables::new(trips, cars, cities))
    }
}

/// Serves relations already held in memory
#[derive(Debug, Clone)]
pub struct StaticSourceLoader {
    tables: SourceTables,
}

impl StaticSourceLoader {
    pub fn new(tables: SourceTables) -> Self {
        Self { tables }
    }
}

impl SourceLoader for StaticSourceLoader {
    fn load(&self) -> Result<SourceTables> {
        Ok(self.tables.clone())
    }
}

/// Parse one CSV file into a Polars DataFrame
///
/// Timestamps are left as text; the Column Deriver parses them.
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    anyhow::ensure!(path.exists(), "Dataset file not found: {}", path.display());

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
        .with_context(|| format!("Failed to parse CSV {}", path.display()))?;

    debug!("{} columns: {:?}", path.display(), df.get_column_names());
    Ok(df)
}
