//! Error types for pipeline operations.

use polars::prelude::PolarsError;

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error type for pipeline operations
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A required column is absent from a relation.
    #[error("Schema error: {0}")]
    SchemaError(String),

    /// A timestamp cell could not be recognised.
    #[error("Parse error: column '{column}' row {row}: unrecognised timestamp '{value}'")]
    ParseError {
        column: String,
        row: usize,
        value: String,
    },

    /// An aggregation that needs at least one row received none.
    #[error("Empty input: {0}")]
    EmptyInputError(String),

    #[error("Load error: {0}")]
    LoadError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

impl PipelineError {
    /// Build a [`PipelineError::SchemaError`] for a column missing from `relation`.
    pub fn missing_column(relation: &str, column: &str) -> Self {
        PipelineError::SchemaError(format!(
            "relation '{}' has no column '{}'",
            relation, column
        ))
    }
}
