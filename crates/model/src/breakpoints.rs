//! Monthly size and characteristic breakpoints.

use polars::prelude::*;
use tercile_math::{GroupQuantile, group_quantiles};
use tercile_primitives::{ConfigurationError, columns};

use crate::ModelError;

/// Quantile levels and reference universe of the breakpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointConfig {
    /// Micro-cap threshold quantile of market equity.
    pub size_lower: f64,
    /// Weight cap quantile of market equity.
    pub size_upper: f64,
    /// Low tercile boundary of the characteristic.
    pub char_lower: f64,
    /// High tercile boundary of the characteristic.
    pub char_upper: f64,
    /// Exchange code of the reference exchange (1 = NYSE).
    pub reference_exchange: i64,
}

impl Default for BreakpointConfig {
    fn default() -> Self {
        Self {
            size_lower: 0.2,
            size_upper: 0.8,
            char_lower: 1.0 / 3.0,
            char_upper: 2.0 / 3.0,
            reference_exchange: 1,
        }
    }
}

impl BreakpointConfig {
    /// Check that both quantile pairs lie in (0, 1) and are increasing.
    ///
    /// # Errors
    /// Returns `ConfigurationError::InvalidQuantile` for an offending level.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_pair("size", self.size_lower, self.size_upper)?;
        check_pair("characteristic", self.char_lower, self.char_upper)
    }
}

/// Check a lower/upper quantile pair.
pub(crate) fn check_pair(name: &str, lower: f64, upper: f64) -> Result<(), ConfigurationError> {
    for (side, value) in [("lower", lower), ("upper", upper)] {
        if !(value > 0.0 && value < 1.0) {
            return Err(ConfigurationError::InvalidQuantile {
                name: format!("{name}_{side}"),
                value,
            });
        }
    }
    if lower >= upper {
        return Err(ConfigurationError::InvalidQuantile { name: format!("{name}_upper"), value: upper });
    }
    Ok(())
}

/// Per-month market equity breakpoints over reference-exchange firms.
///
/// # Returns
/// LazyFrame with | eom | me_p20 | me_p80 |. Months without a reference firm
/// have no row.
///
/// # Errors
/// Returns `ModelError::Math` if a quantile level is invalid.
pub fn size_breakpoints(panel: LazyFrame, config: &BreakpointConfig) -> Result<LazyFrame, ModelError> {
    let levels = [
        GroupQuantile::new(config.size_lower, columns::ME_LOWER)?,
        GroupQuantile::new(config.size_upper, columns::ME_UPPER)?,
    ];
    let reference = panel.filter(col(columns::EXCHANGE).eq(lit(config.reference_exchange)));
    Ok(group_quantiles(reference, columns::ME, columns::EOM, &levels))
}

/// Per-month characteristic breakpoints over non-micro-cap firms.
///
/// `panel` must already carry the size breakpoints. Firms with market equity
/// strictly above the month's micro-cap threshold are included.
///
/// # Returns
/// LazyFrame with | eom | char_p33 | char_p67 |.
///
/// # Errors
/// Returns `ModelError::Math` if a quantile level is invalid.
pub fn characteristic_breakpoints(
    panel: LazyFrame,
    config: &BreakpointConfig,
) -> Result<LazyFrame, ModelError> {
    let levels = [
        GroupQuantile::new(config.char_lower, columns::CHAR_LOWER)?,
        GroupQuantile::new(config.char_upper, columns::CHAR_UPPER)?,
    ];
    let non_micro = panel.filter(col(columns::ME).gt(col(columns::ME_LOWER)));
    Ok(group_quantiles(non_micro, columns::CHAR, columns::EOM, &levels))
}

/// Left-join monthly breakpoints and drop firm-months whose month has none.
pub fn attach_breakpoints(panel: LazyFrame, breakpoints: LazyFrame, lower: &str, upper: &str) -> LazyFrame {
    panel
        .join(
            breakpoints,
            [col(columns::EOM)],
            [col(columns::EOM)],
            JoinArgs::new(JoinType::Left),
        )
        .filter(col(lower).is_not_null().and(col(upper).is_not_null()))
}

/// Attach size then characteristic breakpoints to a screened panel.
///
/// # Errors
/// Returns `ModelError::Math` if a quantile level is invalid.
pub fn with_breakpoints(panel: LazyFrame, config: &BreakpointConfig) -> Result<LazyFrame, ModelError> {
    let size = size_breakpoints(panel.clone(), config)?;
    let panel = attach_breakpoints(panel, size, columns::ME_LOWER, columns::ME_UPPER);

    let characteristic = characteristic_breakpoints(panel.clone(), config)?;
    Ok(attach_breakpoints(panel, characteristic, columns::CHAR_LOWER, columns::CHAR_UPPER))
}
