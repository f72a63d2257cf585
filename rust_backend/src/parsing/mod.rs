//! Parsers for raw cell values found in the source relations.
//!
//! # Parsers
//!
//! - [`timestamps`]: Parse pickup/dropoff timestamp strings into UTC wall time
//!
//! # Example
//!
//! ```
//! use carshare_metrics::parsing::timestamps::parse_timestamp;
//!
//! let ts = parse_timestamp("2024-01-01T08:00").unwrap();
//! assert_eq!(ts.to_string(), "2024-01-01 08:00:00");
//! ```

pub mod timestamps;


pub use timestamps::{duration_minutes, parse_timestamp, TimestampParser};
