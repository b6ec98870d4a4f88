//! Error types for style factors.

/// Errors that can occur when resolving style factors.
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    /// No factor with this name in the catalog.
    #[error("unknown factor: {0}")]
    UnknownFactor(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StyleError::UnknownFactor("hml".to_string());
        assert_eq!(err.to_string(), "unknown factor: hml");
    }
}
