//! Firm-month panel sources.

use polars::prelude::*;

/// Errors raised while reading a firm-month panel.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The source could not be opened or scanned.
    #[error("cannot read panel {origin}: {error}")]
    Unreadable {
        /// Description of the source.
        origin: String,
        /// Underlying polars error.
        error: PolarsError,
    },

    /// A required column is absent from the source.
    #[error("panel {origin} is missing required column {column:?}")]
    MissingColumn {
        /// Description of the source.
        origin: String,
        /// Name of the absent column.
        column: String,
    },
}

impl LoadError {
    /// Name of the missing column, if that is what went wrong.
    #[must_use]
    pub fn missing_column(&self) -> Option<&str> {
        match self {
            Self::MissingColumn { column, .. } => Some(column),
            Self::Unreadable { .. } => None,
        }
    }
}

/// A snapshot of the firm-month characteristic table.
///
/// Implementations only expose the raw table; column selection, renaming and
/// screening are done by the loader so every source is treated identically.
pub trait PanelSource: Send + Sync {
    /// Lazily scan the full table.
    ///
    /// # Errors
    /// Returns `LoadError::Unreadable` if the source cannot be opened.
    fn scan(&self) -> Result<LazyFrame, LoadError>;

    /// Short description used in logs and error messages.
    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_display() {
        let err = LoadError::MissingColumn {
            origin: "chars.parquet".to_string(),
            column: "be_me".to_string(),
        };
        assert_eq!(err.to_string(), "panel chars.parquet is missing required column \"be_me\"");
        assert_eq!(err.missing_column(), Some("be_me"));

        let err = LoadError::Unreadable {
            origin: "gone.parquet".to_string(),
            error: PolarsError::NoData("empty".into()),
        };
        assert!(err.to_string().starts_with("cannot read panel gone.parquet"));
        assert!(err.missing_column().is_none());
    }
}
