//! Sortable characteristic definitions.

use tercile_primitives::{Direction, FactorSpec};

/// Academic style a characteristic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// Market equity.
    Size,
    /// Price multiples.
    Value,
    /// Operating profitability.
    Profitability,
    /// Asset growth.
    Investment,
    /// Trailing twelve-month return skipping the latest month.
    Momentum,
    /// Latest one-month return.
    ShortTermReversal,
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Size => write!(f, "size"),
            Self::Value => write!(f, "value"),
            Self::Profitability => write!(f, "profitability"),
            Self::Investment => write!(f, "investment"),
            Self::Momentum => write!(f, "momentum"),
            Self::ShortTermReversal => write!(f, "short-term reversal"),
        }
    }
}

/// A firm characteristic that factor portfolios are sorted on.
pub trait SortCharacteristic: Send + Sync + std::fmt::Debug {
    /// Name of the factor return series (matches the benchmark name).
    fn name(&self) -> &str;

    /// Panel column holding the characteristic.
    fn characteristic(&self) -> &str;

    /// Which tercile is held long.
    fn direction(&self) -> Direction;

    /// Style the characteristic belongs to.
    fn style(&self) -> Style;

    /// Whether non-positive characteristic values must be excluded.
    fn positive_only(&self) -> bool {
        false
    }

    /// Specification handed to the constructor.
    fn spec(&self) -> FactorSpec {
        FactorSpec::new(self.characteristic(), self.name(), self.direction())
            .with_positive_only(self.positive_only())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Accruals;

    impl SortCharacteristic for Accruals {
        fn name(&self) -> &str {
            "oaccruals_at"
        }

        fn characteristic(&self) -> &str {
            "oaccruals_at"
        }

        fn direction(&self) -> Direction {
            Direction::LongLow
        }

        fn style(&self) -> Style {
            Style::Profitability
        }
    }

    #[test]
    fn style_display() {
        assert_eq!(Style::Size.to_string(), "size");
        assert_eq!(Style::ShortTermReversal.to_string(), "short-term reversal");
    }

    #[test]
    fn default_spec_uses_trait_methods() {
        let spec = Accruals.spec();
        assert_eq!(spec.characteristic, "oaccruals_at");
        assert_eq!(spec.name.as_str(), "oaccruals_at");
        assert_eq!(spec.direction, Direction::LongLow);
        assert!(!spec.positive_only);
    }
}
