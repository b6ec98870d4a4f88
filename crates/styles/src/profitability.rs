//! Profitability factor definition.

use tercile_primitives::Direction;
use tercile_traits::{SortCharacteristic, Style};

/// Configuration for the profitability factor.
#[derive(Debug, Clone)]
pub struct ProfitabilityConfig {
    /// Operating profits to book equity column.
    pub characteristic: String,
}

impl Default for ProfitabilityConfig {
    fn default() -> Self {
        Self { characteristic: "ope_be".to_string() }
    }
}

/// Profitability style factor: robust minus weak operating profitability.
#[derive(Debug, Clone)]
pub struct ProfitabilityFactor {
    config: ProfitabilityConfig,
}

impl ProfitabilityFactor {
    /// Create a new profitability factor with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ProfitabilityConfig::default())
    }

    /// Create a profitability factor with custom configuration.
    #[must_use]
    pub const fn with_config(config: ProfitabilityConfig) -> Self {
        Self { config }
    }
}

impl Default for ProfitabilityFactor {
    fn default() -> Self {
        Self::new()
    }
}

impl SortCharacteristic for ProfitabilityFactor {
    fn name(&self) -> &str {
        "ope_be"
    }

    fn characteristic(&self) -> &str {
        &self.config.characteristic
    }

    fn direction(&self) -> Direction {
        Direction::LongHigh
    }

    fn style(&self) -> Style {
        Style::Profitability
    }
}
