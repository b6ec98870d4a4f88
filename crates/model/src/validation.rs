//! Comparison of a replicated factor with its benchmark series.

use std::{collections::BTreeMap, io::Read, path::Path};

use ndarray::Array1;
use polars::prelude::*;
use serde::Deserialize;
use tercile_math::{annualized_volatility, mean, pearson_correlation};
use tercile_primitives::{Date, columns, month_end, shift_month_end};
use tercile_utils::{date_values, float_values};
use tracing::{info, warn};

use crate::ModelError;

/// Monthly observations per year.
const PERIODS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Deserialize)]
struct BenchmarkRow {
    name: String,
    date: String,
    ret: Option<f64>,
}

/// Monthly benchmark returns of one factor, keyed by month end.
pub type BenchmarkSeries = BTreeMap<Date, f64>;

/// Read the `factor` rows of a benchmark CSV.
///
/// The file needs `name`, `date` (`YYYY-MM-DD`) and `ret` columns; other
/// columns are ignored, as are rows with an empty return. Dates are normalized
/// to month end.
///
/// # Errors
/// Returns `ModelError::Csv` for unreadable input and
/// `ModelError::InvalidBenchmark` for a malformed date.
pub fn read_benchmark<R: Read>(reader: R, factor: &str) -> Result<BenchmarkSeries, ModelError> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut series = BenchmarkSeries::new();

    for (index, row) in reader.deserialize::<BenchmarkRow>().enumerate() {
        let row = row?;
        if row.name != factor {
            continue;
        }
        let Some(ret) = row.ret else { continue };
        let date = Date::parse_from_str(row.date.trim(), "%Y-%m-%d").map_err(|err| {
            ModelError::InvalidBenchmark { row: index + 1, message: format!("{:?}: {err}", row.date) }
        })?;
        series.insert(month_end(date), ret);
    }
    Ok(series)
}

/// Read the `factor` rows of the benchmark CSV at `path`.
///
/// # Errors
/// See [`read_benchmark`]; also `ModelError::Io` if the file cannot be opened.
pub fn load_benchmark(path: &Path, factor: &str) -> Result<BenchmarkSeries, ModelError> {
    let file = std::fs::File::open(path)?;
    read_benchmark(file, factor)
}

/// Mean and annualized volatility of a monthly series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSummary {
    /// Mean monthly return.
    pub mean: f64,
    /// Sample standard deviation times the square root of twelve.
    pub annualized_volatility: f64,
}

impl SeriesSummary {
    fn of(values: &Array1<f64>) -> Result<Self, ModelError> {
        Ok(Self {
            mean: mean(values)?,
            annualized_volatility: annualized_volatility(values, PERIODS_PER_YEAR)?,
        })
    }
}

/// Outcome of validating one replicated factor.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// Benchmark factor name.
    pub factor: String,
    /// Number of overlapping months.
    pub months: usize,
    /// Time-series Pearson correlation.
    pub correlation: f64,
    /// Statistics of the replicated series over the overlap.
    pub replicated: SeriesSummary,
    /// Statistics of the benchmark series over the overlap.
    pub benchmark: SeriesSummary,
    /// Correlation the replication must exceed.
    pub threshold: f64,
}

impl ValidationReport {
    /// Whether the correlation exceeds the threshold.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.correlation > self.threshold
    }
}

/// Compare a replicated series with its benchmark.
///
/// The replicated month `t` holds the return realized over `[t, t+1]`, which
/// the benchmark reports at `t+1`. Replicated dates are therefore shifted one
/// month forward and normalized to month end before the inner join.
///
/// # Arguments
/// * `replicated` - Frame with | eom | factor return |
/// * `benchmark` - Benchmark returns keyed by month end
/// * `factor` - Benchmark factor name, for reporting
/// * `threshold` - Correlation above which the replication passes
///
/// # Errors
/// Returns `ModelError::NoOverlap` if no month matches, and
/// `ModelError::Math` if the overlap is too short or constant.
pub fn validate_series(
    replicated: &DataFrame,
    benchmark: &BenchmarkSeries,
    factor: &str,
    threshold: f64,
) -> Result<ValidationReport, ModelError> {
    let names = replicated.get_column_names();
    let value_col = names
        .iter()
        .find(|name| name.as_str() != columns::EOM)
        .map(|name| name.to_string())
        .ok_or_else(|| ModelError::MissingColumn(format!("return column of {factor}")))?;

    let dates = date_values(replicated, columns::EOM)?;
    let values = float_values(replicated, &value_col)?;

    let mut ours = Vec::new();
    let mut theirs = Vec::new();
    for (date, value) in dates.into_iter().zip(values) {
        let (Some(date), Some(value)) = (date, value) else { continue };
        let Some(realized) = shift_month_end(date, 1) else { continue };
        if let Some(reference) = benchmark.get(&realized) {
            ours.push(value);
            theirs.push(*reference);
        }
    }

    if ours.is_empty() {
        return Err(ModelError::NoOverlap { factor: factor.to_string() });
    }

    let ours = Array1::from(ours);
    let theirs = Array1::from(theirs);
    let report = ValidationReport {
        factor: factor.to_string(),
        months: ours.len(),
        correlation: pearson_correlation(&ours, &theirs)?,
        replicated: SeriesSummary::of(&ours)?,
        benchmark: SeriesSummary::of(&theirs)?,
        threshold,
    };

    if report.passed() {
        info!(factor, months = report.months, correlation = report.correlation, "replication passed");
    } else {
        warn!(factor, months = report.months, correlation = report.correlation, threshold, "replication below threshold");
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use tercile_utils::date_column;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    const CSV: &str = "\
name,date,ret,n_stocks
be_me,2020-02-29,0.010,100
be_me,2020-03-31,-0.020,100
be_me,2020-04-30,0.030,100
be_me,2020-05-31,,100
ret_12_1,2020-02-29,0.500,100
";

    fn replicated(dates: &[Date], values: &[f64]) -> DataFrame {
        DataFrame::new(vec![
            date_column("eom", dates).unwrap(),
            Column::new("be_me_EW".into(), values),
        ])
        .unwrap()
    }

    #[test]
    fn benchmark_filters_factor_and_skips_missing_returns() {
        let series = read_benchmark(CSV.as_bytes(), "be_me").unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.get(&ymd(2020, 3, 31)), Some(&-0.020));
        assert!(!series.contains_key(&ymd(2020, 5, 31)));
    }

    #[test]
    fn malformed_date_reports_row() {
        let csv = "name,date,ret\nbe_me,31/01/2020,0.1\n";
        let err = read_benchmark(csv.as_bytes(), "be_me").unwrap_err();
        assert!(matches!(err, ModelError::InvalidBenchmark { row: 1, .. }));
    }

    #[test]
    fn replicated_dates_shift_one_month_forward() {
        let benchmark = read_benchmark(CSV.as_bytes(), "be_me").unwrap();
        // January 2020 replicates the February benchmark, and so on.
        let df = replicated(
            &[ymd(2020, 1, 31), ymd(2020, 2, 29), ymd(2020, 3, 31), ymd(2020, 6, 30)],
            &[0.011, -0.019, 0.031, 0.5],
        );

        let report = validate_series(&df, &benchmark, "be_me", 0.95).unwrap();
        assert_eq!(report.months, 3);
        assert!(report.correlation > 0.99);
        assert!(report.passed());
        assert_relative_eq!(report.benchmark.mean, 0.02 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(report.replicated.mean, 0.023 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn no_overlap_is_an_error() {
        let benchmark = read_benchmark(CSV.as_bytes(), "be_me").unwrap();
        let df = replicated(&[ymd(1999, 1, 31), ymd(1999, 2, 28)], &[0.1, 0.2]);
        let err = validate_series(&df, &benchmark, "be_me", 0.95).unwrap_err();
        assert!(matches!(err, ModelError::NoOverlap { .. }));
    }
}
