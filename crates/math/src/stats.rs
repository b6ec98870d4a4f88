//! Time-series statistics for comparing return series.

use ndarray::Array1;

use crate::MathError;

/// Arithmetic mean.
///
/// # Errors
/// Returns `MathError::InsufficientData` for an empty array.
pub fn mean(data: &Array1<f64>) -> Result<f64, MathError> {
    data.mean().ok_or(MathError::InsufficientData { required: 1, actual: 0 })
}

/// Sample standard deviation (n - 1 denominator).
///
/// # Errors
/// Returns `MathError::InsufficientData` with fewer than two observations.
pub fn sample_std(data: &Array1<f64>) -> Result<f64, MathError> {
    if data.len() < 2 {
        return Err(MathError::InsufficientData { required: 2, actual: data.len() });
    }
    Ok(data.std(1.0))
}

/// Sample standard deviation scaled by the square root of `periods_per_year`.
///
/// # Errors
/// Returns `MathError::InsufficientData` with fewer than two observations.
pub fn annualized_volatility(data: &Array1<f64>, periods_per_year: f64) -> Result<f64, MathError> {
    Ok(sample_std(data)? * periods_per_year.sqrt())
}

/// Pearson correlation of two equally long series.
///
/// # Errors
/// Returns `MathError::DimensionMismatch` if the lengths differ,
/// `MathError::InsufficientData` with fewer than two observations, and
/// `MathError::NumericalInstability` if either series is constant.
pub fn pearson_correlation(x: &Array1<f64>, y: &Array1<f64>) -> Result<f64, MathError> {
    if x.len() != y.len() {
        return Err(MathError::DimensionMismatch { expected: x.len(), actual: y.len() });
    }
    if x.len() < 2 {
        return Err(MathError::InsufficientData { required: 2, actual: x.len() });
    }

    let dx = x - mean(x)?;
    let dy = y - mean(y)?;
    let sxx = dx.dot(&dx);
    let syy = dy.dot(&dy);
    if sxx <= 0.0 || syy <= 0.0 {
        return Err(MathError::NumericalInstability("constant series has no correlation".into()));
    }

    let r = dx.dot(&dy) / (sxx * syy).sqrt();
    if !r.is_finite() {
        return Err(MathError::NumericalInstability(format!("correlation is {r}")));
    }
    Ok(r.clamp(-1.0, 1.0))
}
