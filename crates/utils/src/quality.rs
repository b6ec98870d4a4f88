//! Sanity checks on a raw firm-month panel.

use polars::prelude::*;
use tercile_primitives::columns;
use tracing::{debug, warn};

use crate::UtilsError;

const ROWS: &str = "__rows";
const RET_MAX: &str = "__ret_max";
const RET_MIN: &str = "__ret_min";

/// Columns and thresholds inspected by [`validate_panel`].
#[derive(Debug, Clone)]
pub struct QualityChecks {
    /// Columns that must never be null (fatal).
    pub identifiers: Vec<String>,
    /// Columns whose nulls are reported as warnings.
    pub measures: Vec<String>,
    /// Monthly return column checked for implausible magnitudes.
    pub return_column: String,
    /// Largest plausible absolute monthly return (10.0 = 1000%).
    pub max_abs_return: f64,
}

impl Default for QualityChecks {
    fn default() -> Self {
        Self {
            identifiers: vec![columns::EOM.to_string(), columns::ID.to_string()],
            measures: vec![columns::ME.to_string(), columns::RET.to_string()],
            return_column: columns::RET.to_string(),
            max_abs_return: 10.0,
        }
    }
}

/// Non-fatal finding of [`validate_panel`].
#[derive(Debug, Clone, PartialEq)]
pub enum DataQualityWarning {
    /// A non-critical column contains nulls.
    NullValues {
        /// Column name.
        column: String,
        /// Number of null rows.
        count: usize,
    },
    /// The largest absolute return exceeds the plausibility threshold.
    ExtremeReturn {
        /// Return column.
        column: String,
        /// Largest absolute value observed.
        max_abs: f64,
        /// Threshold that was exceeded.
        threshold: f64,
    },
}

impl std::fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NullValues { column, count } => write!(f, "{count} null values in `{column}`"),
            Self::ExtremeReturn { column, max_abs, threshold } => {
                write!(f, "max |{column}| = {max_abs:.4} exceeds {threshold}")
            }
        }
    }
}

/// Outcome of a successful panel check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataQualityReport {
    /// Number of rows inspected.
    pub rows: usize,
    /// Largest absolute return, if any return is present.
    pub max_abs_return: Option<f64>,
    /// Warnings raised, already logged.
    pub warnings: Vec<DataQualityWarning>,
}

impl DataQualityReport {
    /// Whether no warning was raised.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Check a panel for null identifiers, missing measures and implausible returns.
///
/// All statistics are computed in a single pass over `panel`. Warnings are
/// logged with `tracing::warn!` and returned in the report.
///
/// # Arguments
/// * `panel` - Panel to inspect (the caller keeps its own copy)
/// * `checks` - Columns and thresholds
///
/// # Errors
/// Returns `UtilsError::NullIdentifiers` if an identifier column contains
/// nulls, `UtilsError::InvalidParameter` for a non-positive threshold, or a
/// polars error if a column is missing.
pub fn validate_panel(
    panel: LazyFrame,
    checks: &QualityChecks,
) -> Result<DataQualityReport, UtilsError> {
    if checks.max_abs_return.is_nan() || checks.max_abs_return <= 0.0 {
        return Err(UtilsError::InvalidParameter(format!(
            "max_abs_return must be positive, got {}",
            checks.max_abs_return
        )));
    }

    let mut exprs = vec![len().cast(DataType::UInt64).alias(ROWS)];
    for name in checks.identifiers.iter().chain(&checks.measures) {
        exprs.push(
            col(name.as_str()).null_count().cast(DataType::UInt64).alias(null_alias(name)),
        );
    }
    let ret = col(checks.return_column.as_str()).cast(DataType::Float64);
    exprs.push(ret.clone().max().alias(RET_MAX));
    exprs.push(ret.min().alias(RET_MIN));

    let summary = panel.select(exprs).collect()?;
    let rows = count_at(&summary, ROWS)?;
    debug!(rows, "checking panel quality");

    for name in &checks.identifiers {
        let count = count_at(&summary, &null_alias(name))?;
        if count > 0 {
            return Err(UtilsError::NullIdentifiers { column: name.clone(), count });
        }
    }

    let mut warnings = Vec::new();
    for name in &checks.measures {
        let count = count_at(&summary, &null_alias(name))?;
        if count > 0 {
            warnings.push(DataQualityWarning::NullValues { column: name.clone(), count });
        }
    }

    let max = summary.column(RET_MAX)?.f64()?.get(0);
    let min = summary.column(RET_MIN)?.f64()?.get(0);
    let max_abs_return = match (max, min) {
        (Some(max), Some(min)) => Some(max.abs().max(min.abs())),
        _ => None,
    };
    if let Some(max_abs) = max_abs_return.filter(|value| *value > checks.max_abs_return) {
        warnings.push(DataQualityWarning::ExtremeReturn {
            column: checks.return_column.clone(),
            max_abs,
            threshold: checks.max_abs_return,
        });
    }

    for warning in &warnings {
        warn!(%warning, "data quality");
    }

    Ok(DataQualityReport { rows, max_abs_return, warnings })
}

fn null_alias(column: &str) -> String {
    format!("__nulls_{column}")
}

fn count_at(summary: &DataFrame, name: &str) -> Result<usize, UtilsError> {
    let count = summary.column(name)?.u64()?.get(0).unwrap_or(0);
    usize::try_from(count)
        .map_err(|_| UtilsError::InvalidParameter(format!("count overflow in `{name}`")))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn panel(ids: &[Option<i64>], me: &[Option<f64>], ret: &[Option<f64>]) -> LazyFrame {
        df! {
            "eom" => vec![1i32; ids.len()],
            "id" => ids,
            "me" => me,
            "ret" => ret,
        }
        .unwrap()
        .lazy()
    }

    #[test]
    fn clean_panel_has_no_warnings() {
        let lf = panel(&[Some(1), Some(2)], &[Some(10.0), Some(20.0)], &[Some(0.01), Some(-0.3)]);
        let report = validate_panel(lf, &QualityChecks::default()).unwrap();
        assert_eq!(report.rows, 2);
        assert!(report.is_clean());
        assert_eq!(report.max_abs_return, Some(0.3));
    }

    #[test]
    fn null_identifier_is_fatal() {
        let lf = panel(&[Some(1), None], &[Some(10.0), Some(20.0)], &[Some(0.01), Some(0.02)]);
        let err = validate_panel(lf, &QualityChecks::default()).unwrap_err();
        assert!(matches!(err, UtilsError::NullIdentifiers { ref column, count: 1 } if column == "id"));
    }

    #[test]
    fn null_measures_and_extreme_returns_warn() {
        let lf = panel(
            &[Some(1), Some(2), Some(3)],
            &[None, Some(20.0), None],
            &[Some(0.01), None, Some(-12.5)],
        );
        let report = validate_panel(lf, &QualityChecks::default()).unwrap();
        assert_eq!(
            report.warnings,
            vec![
                DataQualityWarning::NullValues { column: "me".into(), count: 2 },
                DataQualityWarning::NullValues { column: "ret".into(), count: 1 },
                DataQualityWarning::ExtremeReturn {
                    column: "ret".into(),
                    max_abs: 12.5,
                    threshold: 10.0,
                },
            ]
        );
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.0)]
    #[case(f64::NAN)]
    fn rejects_bad_threshold(#[case] threshold: f64) {
        let lf = panel(&[Some(1)], &[Some(1.0)], &[Some(0.0)]);
        let checks = QualityChecks { max_abs_return: threshold, ..Default::default() };
        assert!(matches!(validate_panel(lf, &checks), Err(UtilsError::InvalidParameter(_))));
    }
}
