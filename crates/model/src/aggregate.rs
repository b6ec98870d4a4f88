//! Bucket return aggregation.

use polars::prelude::*;
use tercile_math::{capped_weight, weighted_mean};
use tercile_primitives::{WeightingScheme, columns};

/// Aggregation expression of the bucket return under `scheme`.
///
/// Capped value weighting replaces market equity above the month's
/// [`columns::ME_UPPER`] breakpoint by the breakpoint before renormalizing.
pub fn bucket_return(scheme: WeightingScheme) -> Expr {
    let ret = col(columns::RET);
    match scheme {
        WeightingScheme::EqualWeight => ret.mean(),
        WeightingScheme::ValueWeight => weighted_mean(ret, col(columns::ME)),
        WeightingScheme::CappedValueWeight => {
            weighted_mean(ret, capped_weight(col(columns::ME), col(columns::ME_UPPER)))
        }
    }
}

/// One return and constituent count per (month, bucket).
///
/// # Returns
/// LazyFrame with | eom | portfolio | port_ret | n_stocks |, sorted by month
/// and bucket label.
pub fn aggregate_returns(assigned: LazyFrame, scheme: WeightingScheme) -> LazyFrame {
    assigned
        .group_by_stable([col(columns::EOM), col(columns::PORTFOLIO)])
        .agg([
            bucket_return(scheme).alias(columns::PORT_RET),
            len().cast(DataType::UInt32).alias(columns::N_STOCKS),
        ])
        .sort([columns::EOM, columns::PORTFOLIO], SortMultipleOptions::default())
}
