//! Relation loading and caching.
//!
//! Loaders read the raw trips, cars and cities relations; the
//! [`DatasetCache`] memoizes them (schema-resolved) for the process lifetime.
//!
//! # Example
//!
//! ```no_run
//! use carshare_metrics::io::{CsvSourceLoader, SourceLoader};
//!
//! let tables = CsvSourceLoader::from_dir("datasets")
//!     .load()
//!     .expect("Failed to load");
//! println!("Loaded {} trips", tables.trips.height());
//! ```

pub mod cache;
pub mod loaders;


pub use cache::DatasetCache;
pub use loaders::{read_csv, CsvSourceLoader, SourceLoader, StaticSourceLoader};
