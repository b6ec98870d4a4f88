//! Error types for utility functions.

/// Errors that can occur during utility operations.
#[derive(Debug, thiserror::Error)]
pub enum UtilsError {
    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Invalid parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A critical identifier column contains nulls.
    #[error("column `{column}` has {count} null identifiers")]
    NullIdentifiers {
        /// Identifier column.
        column: String,
        /// Number of null rows.
        count: usize,
    },
}
