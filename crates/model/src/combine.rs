//! Long-short combination of the extreme buckets.

use polars::prelude::*;
use tercile_primitives::{Bucket, Direction, FactorName, columns};

const LOW_RET: &str = "Low";
const HIGH_RET: &str = "High";
const LOW_COUNT: &str = "__n_low";
const HIGH_COUNT: &str = "__n_high";

fn leg_columns(bucket: Bucket) -> (&'static str, &'static str) {
    match bucket {
        Bucket::Low => (LOW_RET, LOW_COUNT),
        Bucket::High => (HIGH_RET, HIGH_COUNT),
        Bucket::Mid => ("Mid", "__n_mid"),
    }
}

fn leg(bucket_returns: LazyFrame, bucket: Bucket) -> LazyFrame {
    let (ret, count) = leg_columns(bucket);
    bucket_returns.filter(col(columns::PORTFOLIO).eq(lit(bucket.as_str()))).select([
        col(columns::EOM),
        col(columns::PORT_RET).alias(ret),
        col(columns::N_STOCKS).alias(count),
    ])
}

/// Reshape bucket returns wide, keeping months with both extreme legs.
///
/// # Returns
/// LazyFrame with | eom | Low | High | plus the constituent count of each leg,
/// restricted to months where both legs hold at least `min_constituents`
/// firms. The Mid bucket is not checked.
pub fn extreme_legs(bucket_returns: LazyFrame, min_constituents: u32) -> LazyFrame {
    let low = leg(bucket_returns.clone(), Bucket::Low);
    let high = leg(bucket_returns, Bucket::High);

    low.join(high, [col(columns::EOM)], [col(columns::EOM)], JoinArgs::new(JoinType::Inner))
        .filter(
            col(LOW_COUNT)
                .gt_eq(lit(min_constituents))
                .and(col(HIGH_COUNT).gt_eq(lit(min_constituents))),
        )
}

/// Long-short spread of the legs under `direction`.
pub fn spread(direction: Direction) -> Expr {
    let (long, _) = leg_columns(direction.long_leg());
    let (short, _) = leg_columns(direction.short_leg());
    col(long) - col(short)
}

/// Combine bucket returns into the factor return series.
///
/// # Returns
/// LazyFrame with exactly | eom | `name` |, sorted by month.
pub fn combine_legs(
    bucket_returns: LazyFrame,
    direction: Direction,
    name: &FactorName,
    min_constituents: u32,
) -> LazyFrame {
    extreme_legs(bucket_returns, min_constituents)
        .select([col(columns::EOM), spread(direction).alias(name.as_str())])
        .sort([columns::EOM], SortMultipleOptions::default())
}
