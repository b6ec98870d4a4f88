//! Tercile assignment.

use polars::prelude::*;
use tercile_primitives::{Bucket, columns};

/// Bucket label of the characteristic relative to the month's breakpoints.
///
/// `char <= p33` is Low, `char > p67` is High, everything else Mid.
pub fn bucket_label() -> Expr {
    let value = col(columns::CHAR);
    when(value.clone().lt_eq(col(columns::CHAR_LOWER)))
        .then(lit(Bucket::Low.as_str()))
        .when(value.gt(col(columns::CHAR_UPPER)))
        .then(lit(Bucket::High.as_str()))
        .otherwise(lit(Bucket::Mid.as_str()))
}

/// Label every firm-month with its bucket.
///
/// `panel` must carry the characteristic breakpoints; rows without them have
/// already been dropped by [`crate::with_breakpoints`].
pub fn assign_portfolios(panel: LazyFrame) -> LazyFrame {
    panel.with_column(bucket_label().alias(columns::PORTFOLIO))
}
