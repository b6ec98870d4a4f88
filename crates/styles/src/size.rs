//! Size factor definition.

use tercile_primitives::Direction;
use tercile_traits::{SortCharacteristic, Style};

/// Configuration for the size factor.
#[derive(Debug, Clone)]
pub struct SizeConfig {
    /// Market equity column.
    pub characteristic: String,
}

impl Default for SizeConfig {
    fn default() -> Self {
        Self { characteristic: "me".to_string() }
    }
}

/// Size style factor.
///
/// Sorts on market equity itself, Small Minus Big: the Low tercile is held
/// long because small firms are expected to outperform.
#[derive(Debug, Clone)]
pub struct SizeFactor {
    config: SizeConfig,
}

impl SizeFactor {
    /// Create a new size factor with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SizeConfig::default())
    }

    /// Create a size factor with custom configuration.
    #[must_use]
    pub const fn with_config(config: SizeConfig) -> Self {
        Self { config }
    }
}

impl Default for SizeFactor {
    fn default() -> Self {
        Self::new()
    }
}

impl SortCharacteristic for SizeFactor {
    fn name(&self) -> &str {
        "market_equity"
    }

    fn characteristic(&self) -> &str {
        &self.config.characteristic
    }

    fn direction(&self) -> Direction {
        Direction::LongLow
    }

    fn style(&self) -> Style {
        Style::Size
    }
}
