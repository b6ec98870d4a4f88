//! Error types for mathematical operations.

/// Errors that can occur during mathematical operations.
#[derive(Debug, thiserror::Error)]
pub enum MathError {
    /// Quantile level outside (0, 1) or bounds in the wrong order.
    #[error("invalid quantile: {0} (must be in (0, 1))")]
    InvalidQuantile(f64),

    /// Dimension mismatch.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },

    /// Too few observations for the statistic.
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations.
        required: usize,
        /// Actual number of observations.
        actual: usize,
    },

    /// Numerical instability (NaN, Inf or zero variance).
    #[error("numerical instability: {0}")]
    NumericalInstability(String),

    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MathError::InvalidQuantile(1.2);
        assert!(err.to_string().contains("1.2"));

        let err = MathError::DimensionMismatch { expected: 10, actual: 5 };
        assert!(err.to_string().contains("10") && err.to_string().contains("5"));

        let err = MathError::InsufficientData { required: 2, actual: 1 };
        assert_eq!(err.to_string(), "insufficient data: need at least 2 observations, got 1");
    }
}
