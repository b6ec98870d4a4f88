//! Per-group quantiles.

use polars::prelude::*;

use crate::MathError;

/// A quantile level and the output column it is written to.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupQuantile {
    level: f64,
    alias: String,
}

impl GroupQuantile {
    /// Create a quantile request.
    ///
    /// # Errors
    /// Returns `MathError::InvalidQuantile` if `level` is not in (0, 1).
    pub fn new(level: f64, alias: impl Into<String>) -> Result<Self, MathError> {
        if !(level > 0.0 && level < 1.0) {
            return Err(MathError::InvalidQuantile(level));
        }
        Ok(Self { level, alias: alias.into() })
    }

    /// Quantile level.
    #[must_use]
    pub const fn level(&self) -> f64 {
        self.level
    }

    /// Output column name.
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    fn expr(&self, value_col: &str) -> Expr {
        col(value_col).quantile(lit(self.level), QuantileMethod::Linear).alias(self.alias.as_str())
    }
}

/// Compute quantiles of `value_col` within each group of `group_col`.
///
/// Quantiles interpolate linearly between order statistics, so the p-th
/// quantile of n sorted values sits at position p * (n - 1). Nulls are ignored.
/// Groups absent from `df` produce no row, and the result is sorted by group.
///
/// # Arguments
/// * `df` - Input LazyFrame
/// * `value_col` - Column to take quantiles of
/// * `group_col` - Column to group by (typically "eom")
/// * `levels` - Requested quantiles
///
/// # Returns
/// LazyFrame with | group_col | one column per requested quantile |.
pub fn group_quantiles(
    df: LazyFrame,
    value_col: &str,
    group_col: &str,
    levels: &[GroupQuantile],
) -> LazyFrame {
    let aggs: Vec<Expr> = levels.iter().map(|q| q.expr(value_col)).collect();

    df.group_by_stable([col(group_col)])
        .agg(aggs)
        .sort([group_col], SortMultipleOptions::default())
}
