//! Value factor definition.

use tercile_primitives::Direction;
use tercile_traits::{SortCharacteristic, Style};

/// Configuration for the value factor.
#[derive(Debug, Clone)]
pub struct ValueConfig {
    /// Book-to-market column.
    pub characteristic: String,
    /// Exclude firms with non-positive book-to-market.
    pub positive_only: bool,
}

impl Default for ValueConfig {
    fn default() -> Self {
        Self { characteristic: "be_me".to_string(), positive_only: true }
    }
}

/// Value style factor.
///
/// Sorts on book-to-market and holds cheap (high book-to-market) firms long.
/// A book-to-market ratio at or below zero means negative book equity and is
/// excluded rather than sorted into the Low tercile.
#[derive(Debug, Clone)]
pub struct ValueFactor {
    config: ValueConfig,
}

impl ValueFactor {
    /// Create a new value factor with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ValueConfig::default())
    }

    /// Create a value factor with custom configuration.
    #[must_use]
    pub const fn with_config(config: ValueConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &ValueConfig {
        &self.config
    }
}

impl Default for ValueFactor {
    fn default() -> Self {
        Self::new()
    }
}

impl SortCharacteristic for ValueFactor {
    fn name(&self) -> &str {
        "be_me"
    }

    fn characteristic(&self) -> &str {
        &self.config.characteristic
    }

    fn direction(&self) -> Direction {
        Direction::LongHigh
    }

    fn style(&self) -> Style {
        Style::Value
    }

    fn positive_only(&self) -> bool {
        self.config.positive_only
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_config_defaults() {
        let config = ValueConfig::default();
        assert_eq!(config.characteristic, "be_me");
        assert!(config.positive_only);
    }

    #[test]
    fn value_spec() {
        let spec = ValueFactor::new().spec();
        assert_eq!(spec.characteristic, "be_me");
        assert_eq!(spec.name.as_str(), "be_me");
        assert_eq!(spec.direction, Direction::LongHigh);
        assert!(spec.positive_only);
    }

    #[test]
    fn value_without_screen() {
        let config = ValueConfig { positive_only: false, ..ValueConfig::default() };
        let factor = ValueFactor::with_config(config);
        assert!(!factor.spec().positive_only);
        assert_eq!(factor.style(), Style::Value);
    }
}
