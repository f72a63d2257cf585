//! Dashboard configuration file support.
//!
//! This module reads the dataset locations, the default brand selection and
//! presentation settings from a TOML file:
//!
//! ```toml
//! [datasets]
//! trips = "datasets/trips.csv"
//! cars = "datasets/cars.csv"
//! cities = "datasets/cities.csv"
//!
//! [filter]
//! brands = ["Toyota"]
//!
//! [preview]
//! rows = 5
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{BrandSelection, PipelineError, PipelineResult};

/// Dashboard configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub datasets: DatasetSettings,
    #[serde(default)]
    pub filter: FilterSettings,
    #[serde(default)]
    pub preview: PreviewSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Locations of the three source CSV files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSettings {
    #[serde(default = "default_trips_path")]
    pub trips: PathBuf,
    #[serde(default = "default_cars_path")]
    pub cars: PathBuf,
    #[serde(default = "default_cities_path")]
    pub cities: PathBuf,
}

/// Default brand selection; empty means no filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSettings {
    #[serde(default)]
    pub brands: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewSettings {
    #[serde(default = "default_preview_rows")]
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_trips_path() -> PathBuf {
    PathBuf::from("datasets/trips.csv")
}

fn default_cars_path() -> PathBuf {
    PathBuf::from("datasets/cars.csv")
}

fn default_cities_path() -> PathBuf {
    PathBuf::from("datasets/cities.csv")
}

fn default_preview_rows() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            trips: default_trips_path(),
            cars: default_cars_path(),
            cities: default_cities_path(),
        }
    }
}

impl DatasetSettings {
    /// `trips.csv`, `cars.csv` and `cities.csv` inside `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            trips: dir.join("trips.csv"),
            cars: dir.join("cars.csv"),
            cities: dir.join("cities.csv"),
        }
    }
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            rows: default_preview_rows(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl DashboardConfig {
    /// Load dashboard configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(DashboardConfig)` if successful
    /// * `Err(PipelineError::ConfigurationError)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> PipelineResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            PipelineError::ConfigurationError(format!("Failed to read config file: {}", e))
        })?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> PipelineResult<Self> {
        toml::from_str(content).map_err(|e| {
            PipelineError::ConfigurationError(format!("Failed to parse config file: {}", e))
        })
    }

    /// Load dashboard configuration from the default location.
    ///
    /// Searches for `dashboard.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(Some(DashboardConfig))` if found and parsed successfully
    /// * `Ok(None)` if no config file exists in any of those places
    /// * `Err(PipelineError)` if a file was found but could not be parsed
    pub fn from_default_location() -> PipelineResult<Option<Self>> {
        let search_paths = [
            PathBuf::from("dashboard.toml"),
            PathBuf::from("rust_backend/dashboard.toml"),
            PathBuf::from("../dashboard.toml"),
        ];

        match search_paths.iter().find(|path| path.exists()) {
            Some(path) => Self::from_file(path).map(Some),
            None => Ok(None),
        }
    }

    /// The configured default brand selection.
    pub fn brand_selection(&self) -> BrandSelection {
        self.filter.brands.iter().cloned().collect()
    }
}
