//! Bucket composition over time.

use polars::prelude::*;
use tercile_primitives::columns;

/// Mean market equity of a bucket.
pub const AVG_ME: &str = "avg_me";

/// Mean characteristic of a bucket.
pub const AVG_CHAR: &str = "avg_char";

/// Count, mean market equity and mean characteristic per (month, bucket).
///
/// # Returns
/// LazyFrame with | eom | portfolio | n_stocks | avg_me | avg_char |, sorted
/// by month and bucket label.
pub fn bucket_composition(assigned: LazyFrame) -> LazyFrame {
    assigned
        .group_by_stable([col(columns::EOM), col(columns::PORTFOLIO)])
        .agg([
            len().cast(DataType::UInt32).alias(columns::N_STOCKS),
            col(columns::ME).mean().alias(AVG_ME),
            col(columns::CHAR).mean().alias(AVG_CHAR),
        ])
        .sort([columns::EOM, columns::PORTFOLIO], SortMultipleOptions::default())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn composition_per_bucket() {
        let df = df! {
            "eom" => &[1i32, 1, 1],
            "portfolio" => &["Low", "High", "Low"],
            "me" => &[10.0, 30.0, 20.0],
            "char" => &[0.1, 0.9, 0.3],
        }
        .unwrap()
        .lazy();

        let result = bucket_composition(df).collect().unwrap();
        assert_eq!(result.height(), 2);

        // Sorted labels: High before Low.
        let n: Vec<Option<u32>> = result.column("n_stocks").unwrap().u32().unwrap().into_iter().collect();
        assert_eq!(n, [Some(1), Some(2)]);
        let avg_me = result.column(AVG_ME).unwrap().f64().unwrap();
        assert_relative_eq!(avg_me.get(1).unwrap(), 15.0);
        let avg_char = result.column(AVG_CHAR).unwrap().f64().unwrap();
        assert_relative_eq!(avg_char.get(1).unwrap(), 0.2, epsilon = 1e-12);
    }
}
