//! Factor construction trait.

use polars::prelude::*;
use tercile_primitives::{FactorSpec, WeightingScheme};

use crate::PanelSource;

/// Turns a firm-month panel into a long-short factor return series.
///
/// Implementations must be pure functions of their inputs: constructing the
/// same spec twice from the same source yields identical frames, and distinct
/// (spec, scheme) pairs may be constructed independently in any order.
pub trait FactorConstructor: Send + Sync {
    /// Error type of a failed construction.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the factor described by `spec` under `scheme`.
    ///
    /// # Returns
    /// DataFrame with | eom | <factor name> |, one row per surviving month,
    /// sorted by `eom`.
    ///
    /// # Errors
    /// Returns `Self::Error` if the panel cannot be loaded or processed.
    fn construct<S>(
        &self,
        source: &S,
        spec: &FactorSpec,
        scheme: WeightingScheme,
    ) -> Result<DataFrame, Self::Error>
    where
        S: PanelSource + ?Sized;
}
