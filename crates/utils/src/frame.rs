//! Conversions between polars columns and plain Rust values.

use polars::prelude::*;
use tercile_primitives::{Date, date_to_days, days_to_date};

use crate::UtilsError;

/// Build a polars `Date` column from calendar dates.
///
/// # Errors
/// Returns an error if the physical cast to `Date` fails.
pub fn date_column(name: &str, dates: &[Date]) -> PolarsResult<Column> {
    let days: Vec<i32> = dates.iter().map(|date| date_to_days(*date)).collect();
    Column::new(name.into(), days).cast(&DataType::Date)
}

/// Read a `Date` column back into calendar dates, preserving nulls.
///
/// # Errors
/// Returns an error if the column is missing or not date-like.
pub fn date_values(df: &DataFrame, name: &str) -> Result<Vec<Option<Date>>, UtilsError> {
    let days = df.column(name)?.cast(&DataType::Int32)?;
    Ok(days.i32()?.into_iter().map(|day| day.and_then(days_to_date)).collect())
}

/// Read a numeric column as `f64`, preserving nulls.
///
/// # Errors
/// Returns an error if the column is missing or cannot be cast to `Float64`.
pub fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, UtilsError> {
    let values = df.column(name)?.cast(&DataType::Float64)?;
    Ok(values.f64()?.into_iter().collect())
}
