//! Momentum and short-term reversal factor definitions.

use tercile_primitives::Direction;
use tercile_traits::{SortCharacteristic, Style};

/// Configuration for the momentum factor.
#[derive(Debug, Clone)]
pub struct MomentumConfig {
    /// Trailing return from month t-12 to t-1 column.
    pub characteristic: String,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self { characteristic: "ret_12_1".to_string() }
    }
}

/// Momentum style factor.
///
/// Sorts on the twelve-month return that skips the most recent month (to stay
/// clear of short-term reversal) and holds past winners long.
#[derive(Debug, Clone)]
pub struct MomentumFactor {
    config: MomentumConfig,
}

impl MomentumFactor {
    /// Create a new momentum factor with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MomentumConfig::default())
    }

    /// Create a momentum factor with custom configuration.
    #[must_use]
    pub const fn with_config(config: MomentumConfig) -> Self {
        Self { config }
    }
}

impl Default for MomentumFactor {
    fn default() -> Self {
        Self::new()
    }
}

impl SortCharacteristic for MomentumFactor {
    fn name(&self) -> &str {
        "ret_12_1"
    }

    fn characteristic(&self) -> &str {
        &self.config.characteristic
    }

    fn direction(&self) -> Direction {
        Direction::LongHigh
    }

    fn style(&self) -> Style {
        Style::Momentum
    }
}

/// Configuration for the short-term reversal factor.
#[derive(Debug, Clone)]
pub struct ReversalConfig {
    /// Most recent one-month return column.
    pub characteristic: String,
}

impl Default for ReversalConfig {
    fn default() -> Self {
        Self { characteristic: "ret_1_0".to_string() }
    }
}

/// Short-term reversal factor: last month's losers are held long.
#[derive(Debug, Clone)]
pub struct ReversalFactor {
    config: ReversalConfig,
}

impl ReversalFactor {
    /// Create a new reversal factor with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ReversalConfig::default())
    }

    /// Create a reversal factor with custom configuration.
    #[must_use]
    pub const fn with_config(config: ReversalConfig) -> Self {
        Self { config }
    }
}

impl Default for ReversalFactor {
    fn default() -> Self {
        Self::new()
    }
}

impl SortCharacteristic for ReversalFactor {
    fn name(&self) -> &str {
        "ret_1_0"
    }

    fn characteristic(&self) -> &str {
        &self.config.characteristic
    }

    fn direction(&self) -> Direction {
        Direction::LongLow
    }

    fn style(&self) -> Style {
        Style::ShortTermReversal
    }
}
