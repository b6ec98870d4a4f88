//! Portfolio labels, weighting schemes and long-short directions.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ConfigurationError;

/// Characteristic tercile a firm-month is sorted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bucket {
    /// Characteristic at or below the lower breakpoint.
    Low,
    /// Characteristic between the breakpoints.
    Mid,
    /// Characteristic above the upper breakpoint.
    High,
}

impl Bucket {
    /// All buckets in ascending characteristic order.
    pub const ALL: [Self; 3] = [Self::Low, Self::Mid, Self::High];

    /// Label stored in the `portfolio` column.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Mid => "Mid",
            Self::High => "High",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How constituent returns are combined into a bucket return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WeightingScheme {
    /// Arithmetic mean.
    EqualWeight,
    /// Market-equity weighted mean.
    ValueWeight,
    /// Market-equity weighted mean with market equity capped at the upper
    /// size breakpoint.
    CappedValueWeight,
}

impl WeightingScheme {
    /// All schemes in reporting order.
    pub const ALL: [Self; 3] = [Self::EqualWeight, Self::ValueWeight, Self::CappedValueWeight];

    /// Short identifier (`ew`, `vw`, `vw_cap`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EqualWeight => "ew",
            Self::ValueWeight => "vw",
            Self::CappedValueWeight => "vw_cap",
        }
    }
}

impl fmt::Display for WeightingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightingScheme {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ew" | "equal-weight" | "equal_weight" => Ok(Self::EqualWeight),
            "vw" | "value-weight" | "value_weight" => Ok(Self::ValueWeight),
            "vw_cap" | "capped-value-weight" | "capped_value_weight" => Ok(Self::CappedValueWeight),
            _ => Err(ConfigurationError::UnknownScheme(s.to_string())),
        }
    }
}

impl TryFrom<String> for WeightingScheme {
    type Error = ConfigurationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<WeightingScheme> for String {
    fn from(scheme: WeightingScheme) -> Self {
        scheme.as_str().to_string()
    }
}

/// Which tercile is held long in the factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Direction {
    /// High minus Low.
    LongHigh,
    /// Low minus High.
    LongLow,
}

impl Direction {
    /// Canonical identifier (`long-high`, `long-low`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LongHigh => "long-high",
            Self::LongLow => "long-low",
        }
    }

    /// Bucket held long.
    #[must_use]
    pub const fn long_leg(&self) -> Bucket {
        match self {
            Self::LongHigh => Bucket::High,
            Self::LongLow => Bucket::Low,
        }
    }

    /// Bucket held short.
    #[must_use]
    pub const fn short_leg(&self) -> Bucket {
        match self {
            Self::LongHigh => Bucket::Low,
            Self::LongLow => Bucket::High,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ConfigurationError;

    /// Accepts `long`/`short` as aliases for `long-high`/`long-low`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "long-high" | "long_high" | "long" => Ok(Self::LongHigh),
            "long-low" | "long_low" | "short" => Ok(Self::LongLow),
            _ => Err(ConfigurationError::UnknownDirection(s.to_string())),
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = ConfigurationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Direction> for String {
    fn from(direction: Direction) -> Self {
        direction.as_str().to_string()
    }
}
