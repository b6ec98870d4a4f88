//! Investment factor definition.

use tercile_primitives::Direction;
use tercile_traits::{SortCharacteristic, Style};

/// Configuration for the investment factor.
#[derive(Debug, Clone)]
pub struct InvestmentConfig {
    /// One-year asset growth column.
    pub characteristic: String,
}

impl Default for InvestmentConfig {
    fn default() -> Self {
        Self { characteristic: "at_gr1".to_string() }
    }
}

/// Investment style factor.
///
/// Conservative minus aggressive: firms with low asset growth are held long.
#[derive(Debug, Clone)]
pub struct InvestmentFactor {
    config: InvestmentConfig,
}

impl InvestmentFactor {
    /// Create a new investment factor with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(InvestmentConfig::default())
    }

    /// Create an investment factor with custom configuration.
    #[must_use]
    pub const fn with_config(config: InvestmentConfig) -> Self {
        Self { config }
    }
}

impl Default for InvestmentFactor {
    fn default() -> Self {
        Self::new()
    }
}

impl SortCharacteristic for InvestmentFactor {
    fn name(&self) -> &str {
        "at_gr1"
    }

    fn characteristic(&self) -> &str {
        &self.config.characteristic
    }

    fn direction(&self) -> Direction {
        Direction::LongLow
    }

    fn style(&self) -> Style {
        Style::Investment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn investment_is_long_low() {
        let factor = InvestmentFactor::new();
        assert_eq!(factor.spec().direction, Direction::LongLow);
        assert_eq!(factor.characteristic(), "at_gr1");
    }

    #[test]
    fn investment_custom_column() {
        let factor =
            InvestmentFactor::with_config(InvestmentConfig { characteristic: "at_gr3".into() });
        assert_eq!(factor.spec().characteristic, "at_gr3");
        // The benchmark name does not follow the column override.
        assert_eq!(factor.spec().name.as_str(), "at_gr1");
    }
}
