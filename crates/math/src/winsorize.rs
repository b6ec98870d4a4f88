//! Winsorization against a reference subsample.

use polars::prelude::*;

use crate::{GroupQuantile, MathError, group_quantiles};

const LOWER_CUTOFF: &str = "__winsor_lower";
const UPPER_CUTOFF: &str = "__winsor_upper";

/// Clip `value` into `[lower, upper]`.
///
/// Null values stay null; a null bound leaves that side unclipped.
pub fn clip_between(value: Expr, lower: Expr, upper: Expr) -> Expr {
    when(value.clone().lt(lower.clone()))
        .then(lower)
        .when(value.clone().gt(upper.clone()))
        .then(upper)
        .otherwise(value)
}

/// Clips values to per-group cutoffs estimated on a reference subsample.
///
/// For every group the lower and upper quantiles of the value column are taken
/// over reference rows only. Non-reference rows are clipped to those cutoffs;
/// reference rows pass through unchanged. Groups without any reference row
/// have no cutoffs, and all of their rows are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Winsorizer {
    lower: f64,
    upper: f64,
}

impl Winsorizer {
    /// Create a new winsorizer.
    ///
    /// # Arguments
    /// * `lower` - Lower quantile, in (0, 1)
    /// * `upper` - Upper quantile, in (lower, 1)
    ///
    /// # Errors
    /// Returns `MathError::InvalidQuantile` if a level is out of range or the
    /// levels are not increasing.
    pub fn new(lower: f64, upper: f64) -> Result<Self, MathError> {
        for level in [lower, upper] {
            if !(level > 0.0 && level < 1.0) {
                return Err(MathError::InvalidQuantile(level));
            }
        }
        if lower >= upper {
            return Err(MathError::InvalidQuantile(upper));
        }
        Ok(Self { lower, upper })
    }

    /// Lower quantile.
    #[must_use]
    pub const fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper quantile.
    #[must_use]
    pub const fn upper(&self) -> f64 {
        self.upper
    }

    /// Per-group cutoffs estimated on rows where `reference_col` is true.
    ///
    /// # Returns
    /// LazyFrame with | group_col | lower_alias | upper_alias |.
    ///
    /// # Errors
    /// Returns `MathError::InvalidQuantile` if the stored levels are invalid.
    pub fn cutoffs(
        &self,
        df: LazyFrame,
        value_col: &str,
        group_col: &str,
        reference_col: &str,
        lower_alias: &str,
        upper_alias: &str,
    ) -> Result<LazyFrame, MathError> {
        let levels = [
            GroupQuantile::new(self.lower, lower_alias)?,
            GroupQuantile::new(self.upper, upper_alias)?,
        ];
        Ok(group_quantiles(df.filter(col(reference_col)), value_col, group_col, &levels))
    }

    /// Winsorize `value_col` of non-reference rows.
    ///
    /// # Arguments
    /// * `df` - Input LazyFrame
    /// * `value_col` - Column to clip
    /// * `group_col` - Column to group by (typically "eom")
    /// * `reference_col` - Boolean column marking reference rows
    ///
    /// # Returns
    /// LazyFrame with the same columns, the value column clipped.
    ///
    /// # Errors
    /// Returns `MathError::InvalidQuantile` if the stored levels are invalid.
    pub fn apply(
        &self,
        df: LazyFrame,
        value_col: &str,
        group_col: &str,
        reference_col: &str,
    ) -> Result<LazyFrame, MathError> {
        let cutoffs = self.cutoffs(
            df.clone(),
            value_col,
            group_col,
            reference_col,
            LOWER_CUTOFF,
            UPPER_CUTOFF,
        )?;

        Ok(df
            .join(cutoffs, [col(group_col)], [col(group_col)], JoinArgs::new(JoinType::Left))
            .filter(col(LOWER_CUTOFF).is_not_null().and(col(UPPER_CUTOFF).is_not_null()))
            .with_column(
                when(col(reference_col))
                    .then(col(value_col))
                    .otherwise(clip_between(col(value_col), col(LOWER_CUTOFF), col(UPPER_CUTOFF)))
                    .alias(value_col),
            )
            .drop([LOWER_CUTOFF, UPPER_CUTOFF]))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rstest::rstest;

    use super::*;

    fn sorted_rets(df: DataFrame) -> Vec<Option<f64>> {
        df.lazy()
            .sort(["id"], SortMultipleOptions::default())
            .collect()
            .unwrap()
            .column("ret")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn clip_between_bounds() {
        let clipped = df! {
            "ret" => &[1.2, -0.9, 0.3],
        }
        .unwrap()
        .lazy()
        .select([clip_between(col("ret"), lit(-0.5), lit(0.8)).alias("ret")])
        .collect()
        .unwrap();

        let values: Vec<Option<f64>> =
            clipped.column("ret").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(0.8), Some(-0.5), Some(0.3)]);
    }

    #[test]
    fn clips_only_non_reference_rows() {
        let df = df! {
            "id" => &[1, 2, 3, 4, 5],
            "eom" => &[1, 1, 1, 1, 1],
            "ret" => &[-0.5, 0.8, 0.1, 1.2, 1.2],
            "primary" => &[true, true, true, true, false],
        }
        .unwrap()
        .lazy();

        // Sorted reference values are [-0.5, 0.1, 0.8, 1.2]; the 99.9th
        // percentile sits at position 2.997, i.e. 0.8 + 0.997 * 0.4.
        let w = Winsorizer::new(0.001, 0.999).unwrap();
        let result = w.apply(df, "ret", "eom", "primary").unwrap().collect().unwrap();
        assert!(result.column(LOWER_CUTOFF).is_err());

        let rets = sorted_rets(result);
        assert_relative_eq!(rets[3].unwrap(), 1.2);
        assert_relative_eq!(rets[4].unwrap(), 0.8 + 0.997 * 0.4, epsilon = 1e-12);
    }

    #[test]
    fn cutoffs_come_from_reference_rows_only() {
        let df = df! {
            "eom" => &[1, 1, 1, 1],
            "ret" => &[-0.5, 0.8, 10.0, -10.0],
            "primary" => &[true, true, false, false],
        }
        .unwrap()
        .lazy();

        let w = Winsorizer::new(0.25, 0.75).unwrap();
        let cutoffs = w.cutoffs(df, "ret", "eom", "primary", "lo", "hi").unwrap().collect().unwrap();

        let lo = cutoffs.column("lo").unwrap().f64().unwrap().get(0).unwrap();
        let hi = cutoffs.column("hi").unwrap().f64().unwrap().get(0).unwrap();
        assert_relative_eq!(lo, -0.5 + 0.25 * 1.3, epsilon = 1e-12);
        assert_relative_eq!(hi, -0.5 + 0.75 * 1.3, epsilon = 1e-12);
    }

    #[test]
    fn months_without_reference_rows_are_dropped() {
        let df = df! {
            "id" => &[1, 2, 3, 4],
            "eom" => &[1, 1, 2, 2],
            "ret" => &[0.1, 0.2, 0.3, 5.0],
            "primary" => &[true, false, false, false],
        }
        .unwrap()
        .lazy();

        let w = Winsorizer::new(0.001, 0.999).unwrap();
        let result = w.apply(df, "ret", "eom", "primary").unwrap().collect().unwrap();
        assert_eq!(result.height(), 2);

        // The only primary return is 0.1, so both cutoffs equal it.
        assert_eq!(sorted_rets(result), vec![Some(0.1), Some(0.1)]);
    }

    #[test]
    fn null_values_stay_null() {
        let df = df! {
            "eom" => &[1, 1, 1],
            "ret" => &[Some(0.1), Some(0.2), None],
            "primary" => &[true, true, false],
        }
        .unwrap()
        .lazy();

        let w = Winsorizer::new(0.001, 0.999).unwrap();
        let result = w.apply(df, "ret", "eom", "primary").unwrap().collect().unwrap();
        assert_eq!(result.column("ret").unwrap().null_count(), 1);
    }

    #[rstest]
    #[case(0.0, 0.999)]
    #[case(0.001, 1.0)]
    #[case(0.6, 0.4)]
    #[case(0.5, 0.5)]
    fn invalid_levels_error(#[case] lower: f64, #[case] upper: f64) {
        assert!(Winsorizer::new(lower, upper).is_err());
    }

    #[test]
    fn winsorizer_accessors() {
        let w = Winsorizer::new(0.001, 0.999).unwrap();
        assert_relative_eq!(w.lower(), 0.001);
        assert_relative_eq!(w.upper(), 0.999);
    }
}
