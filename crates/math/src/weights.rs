//! Portfolio weighting expressions.

use polars::prelude::*;

/// Weight equal to `weight`, capped from above at `cap`.
///
/// A null cap leaves the weight uncapped.
pub fn capped_weight(weight: Expr, cap: Expr) -> Expr {
    when(weight.clone().gt(cap.clone())).then(cap).otherwise(weight)
}

/// Weighted mean of `value` as an aggregation expression.
///
/// Computes sum(w * x) / sum(w) within the current group. Rows with a null
/// value or weight contribute to neither sum.
pub fn weighted_mean(value: Expr, weight: Expr) -> Expr {
    let valid = value.clone().is_not_null().and(weight.clone().is_not_null());
    let weight = when(valid).then(weight).otherwise(lit(NULL).cast(DataType::Float64));
    (weight.clone() * value).sum() / weight.sum()
}
