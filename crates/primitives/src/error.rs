//! Configuration error type.

/// Invalid construction configuration, detected before any data is read.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    /// Weighting scheme identifier not recognized.
    #[error("unknown weighting scheme: {0:?} (expected ew, vw or vw_cap)")]
    UnknownScheme(String),

    /// Long-short direction identifier not recognized.
    #[error("unknown long-short direction: {0:?} (expected long-high or long-low)")]
    UnknownDirection(String),

    /// Quantile level outside (0, 1).
    #[error("invalid quantile for {name}: {value} (must be in (0, 1))")]
    InvalidQuantile {
        /// Parameter name.
        name: String,
        /// Offending value.
        value: f64,
    },

    /// Any other invalid parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ConfigurationError::UnknownScheme("vw_capped".to_string());
        assert!(err.to_string().contains("vw_capped"));

        let err = ConfigurationError::InvalidQuantile { name: "size_upper".to_string(), value: 1.5 };
        assert!(err.to_string().contains("size_upper") && err.to_string().contains("1.5"));
    }
}
