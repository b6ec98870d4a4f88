//! Error types for factor construction.

use tercile_math::MathError;
use tercile_primitives::ConfigurationError;
use tercile_styles::StyleError;
use tercile_traits::LoadError;
use tercile_utils::UtilsError;

/// Errors that can occur while constructing or validating a factor.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Panel could not be loaded.
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Math error.
    #[error("math error: {0}")]
    Math(#[from] MathError),

    /// Panel failed a critical data quality check.
    #[error("data quality: {0}")]
    DataQuality(#[from] UtilsError),

    /// Unknown factor.
    #[error("style error: {0}")]
    Style(#[from] StyleError),

    /// Polars error.
    #[error("data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Benchmark file could not be parsed.
    #[error("benchmark error: {0}")]
    Csv(#[from] csv::Error),

    /// Settings file could not be parsed.
    #[error("settings error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed benchmark value.
    #[error("invalid benchmark row {row}: {message}")]
    InvalidBenchmark {
        /// One-based data row.
        row: usize,
        /// What was wrong.
        message: String,
    },

    /// Missing required column.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// Replicated and benchmark series share no month.
    #[error("no overlapping months between {factor} and its benchmark")]
    NoOverlap {
        /// Benchmark factor name.
        factor: String,
    },
}

impl ModelError {
    /// Returns whether this error is recoverable.
    ///
    /// Recoverable errors describe the data rather than a broken input: the
    /// factor series itself was built and may still be used. A comparison
    /// over too few months or against a constant series has no correlation.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NoOverlap { .. }
                | Self::Math(
                    MathError::InsufficientData { .. } | MathError::NumericalInstability(_)
                )
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ModelError::MissingColumn("ret_exc_lead1m".to_string());
        assert!(err.to_string().contains("ret_exc_lead1m"));

        let err: ModelError = ConfigurationError::UnknownScheme("vwc".into()).into();
        assert!(err.to_string().starts_with("invalid configuration"));
    }

    #[test]
    fn error_is_recoverable() {
        let err = ModelError::NoOverlap { factor: "be_me".to_string() };
        assert!(err.is_recoverable());

        let err = ModelError::Math(MathError::InsufficientData { required: 2, actual: 1 });
        assert!(err.is_recoverable());

        let err = ModelError::Math(MathError::InvalidQuantile(1.5));
        assert!(!err.is_recoverable());

        let err = ModelError::MissingColumn("test".to_string());
        assert!(!err.is_recoverable());
    }
}
