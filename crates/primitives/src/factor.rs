//! Factor naming and sort specification.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{Direction, WeightingScheme};

/// Characteristics for which non-positive values carry no economic meaning.
const POSITIVE_ONLY_CHARACTERISTICS: &[&str] = &["be_me"];

/// Name of a factor return series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactorName(pub String);

impl FactorName {
    /// Create a new factor name.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the factor name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FactorName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FactorName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Everything needed to sort on one characteristic.
///
/// When deserialized without `positive_only`, the screen is inferred from the
/// characteristic exactly as [`FactorSpec::new`] does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawFactorSpec")]
pub struct FactorSpec {
    /// Source column holding the sort characteristic.
    pub characteristic: String,
    /// Name of the output factor column.
    pub name: FactorName,
    /// Which tercile is held long.
    pub direction: Direction,
    /// Drop observations whose characteristic is not strictly positive.
    pub positive_only: bool,
}

#[derive(Deserialize)]
struct RawFactorSpec {
    characteristic: String,
    name: FactorName,
    direction: Direction,
    #[serde(default)]
    positive_only: Option<bool>,
}

impl From<RawFactorSpec> for FactorSpec {
    fn from(raw: RawFactorSpec) -> Self {
        let spec = Self::new(raw.characteristic, raw.name, raw.direction);
        match raw.positive_only {
            Some(positive_only) => spec.with_positive_only(positive_only),
            None => spec,
        }
    }
}

impl FactorSpec {
    /// Create a spec; `positive_only` is inferred from the characteristic.
    #[must_use]
    pub fn new(
        characteristic: impl Into<String>,
        name: impl Into<FactorName>,
        direction: Direction,
    ) -> Self {
        let characteristic = characteristic.into();
        let positive_only = POSITIVE_ONLY_CHARACTERISTICS.contains(&characteristic.as_str());
        Self { characteristic, name: name.into(), direction, positive_only }
    }

    /// Override the positive-only screen.
    #[must_use]
    pub fn with_positive_only(mut self, positive_only: bool) -> Self {
        self.positive_only = positive_only;
        self
    }

    /// Column name used for a replication under `scheme`, e.g. `be_me_VW_CAP`.
    #[must_use]
    pub fn replicated_name(&self, scheme: WeightingScheme) -> FactorName {
        FactorName(format!("{}_{}", self.name, scheme.as_str().to_ascii_uppercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_to_market_is_positive_only() {
        let spec = FactorSpec::new("be_me", "be_me", Direction::LongHigh);
        assert!(spec.positive_only);

        let spec = FactorSpec::new("at_gr1", "at_gr1", Direction::LongLow);
        assert!(!spec.positive_only);
        assert!(spec.with_positive_only(true).positive_only);
    }

    #[test]
    fn replicated_name_appends_scheme() {
        let spec = FactorSpec::new("me", "market_equity", Direction::LongLow);
        assert_eq!(
            spec.replicated_name(WeightingScheme::CappedValueWeight).as_str(),
            "market_equity_VW_CAP"
        );
        assert_eq!(spec.replicated_name(WeightingScheme::EqualWeight).to_string(), "market_equity_EW");
    }

    #[test]
    fn spec_deserializes_with_default_screen() {
        let spec: FactorSpec = serde_json::from_str(
            r#"{"characteristic":"ret_1_0","name":"ret_1_0","direction":"short"}"#,
        )
        .unwrap();
        assert_eq!(spec.direction, Direction::LongLow);
        assert!(!spec.positive_only);
    }

    #[test]
    fn deserialized_book_to_market_infers_screen() {
        let spec: FactorSpec = serde_json::from_str(
            r#"{"characteristic":"be_me","name":"be_me","direction":"long"}"#,
        )
        .unwrap();
        assert!(spec.positive_only);

        let spec: FactorSpec = serde_json::from_str(
            r#"{"characteristic":"be_me","name":"be_me","direction":"long","positive_only":false}"#,
        )
        .unwrap();
        assert!(!spec.positive_only);
    }
}
