//! Catalog of the standard factors.

use tercile_traits::SortCharacteristic;

use crate::{
    InvestmentFactor, MomentumFactor, ProfitabilityFactor, ReversalFactor, SizeFactor,
    StyleError, ValueFactor,
};

/// All standard factors with default configuration, in reporting order.
#[must_use]
pub fn catalog() -> Vec<Box<dyn SortCharacteristic>> {
    vec![
        Box::new(SizeFactor::new()),
        Box::new(ValueFactor::new()),
        Box::new(ProfitabilityFactor::new()),
        Box::new(InvestmentFactor::new()),
        Box::new(MomentumFactor::new()),
        Box::new(ReversalFactor::new()),
    ]
}

/// Look up a standard factor by its benchmark name.
///
/// # Errors
/// Returns `StyleError::UnknownFactor` if no factor has this name.
pub fn find(name: &str) -> Result<Box<dyn SortCharacteristic>, StyleError> {
    catalog()
        .into_iter()
        .find(|factor| factor.name() == name)
        .ok_or_else(|| StyleError::UnknownFactor(name.to_string()))
}

#[cfg(test)]
mod tests {
    use tercile_primitives::Direction;

    use super::*;

    #[test]
    fn catalog_has_six_unique_factors() {
        let factors = catalog();
        assert_eq!(factors.len(), 6);

        let mut names: Vec<&str> = factors.iter().map(|f| f.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn catalog_directions() {
        let long_low: Vec<String> = catalog()
            .iter()
            .filter(|f| f.direction() == Direction::LongLow)
            .map(|f| f.name().to_string())
            .collect();
        assert_eq!(long_low, ["market_equity", "at_gr1", "ret_1_0"]);
    }

    #[test]
    fn find_by_name() {
        let value = find("be_me").unwrap();
        assert!(value.positive_only());

        assert!(matches!(find("hml"), Err(StyleError::UnknownFactor(_))));
    }
}
