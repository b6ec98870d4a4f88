//! End-to-end factor construction.

use polars::prelude::*;
use tercile_math::Winsorizer;
use tercile_primitives::{ConfigurationError, FactorSpec, WeightingScheme, columns};
use tercile_traits::{FactorConstructor, PanelSource};
use tercile_utils::{QualityChecks, validate_panel};
use tracing::{debug, info};

use crate::{
    BreakpointConfig, ModelError, PanelSchema, aggregate_returns, assign_portfolios,
    breakpoints::check_pair, combine_legs, load_panel, screen_panel, with_breakpoints,
};

/// Winsorization quantiles of secondary-source returns.
#[derive(Debug, Clone, PartialEq)]
pub struct WinsorConfig {
    /// Lower cutoff quantile.
    pub lower: f64,
    /// Upper cutoff quantile.
    pub upper: f64,
}

impl Default for WinsorConfig {
    fn default() -> Self {
        Self { lower: 0.001, upper: 0.999 }
    }
}

impl WinsorConfig {
    /// Check that the quantiles lie in (0, 1) and are increasing.
    ///
    /// # Errors
    /// Returns `ConfigurationError::InvalidQuantile` for an offending level.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_pair("winsor", self.lower, self.upper)
    }
}

/// Configuration for factor construction.
#[derive(Debug, Clone)]
pub struct ConstructionConfig {
    /// Source column names.
    pub schema: PanelSchema,
    /// Breakpoint levels and reference exchange.
    pub breakpoints: BreakpointConfig,
    /// Return winsorization.
    pub winsor: WinsorConfig,
    /// Minimum constituents of each extreme leg for a month to be reported.
    pub min_constituents: u32,
    /// Raw panel checks run before screening (`None` skips them).
    pub quality: Option<QualityChecks>,
}

impl Default for ConstructionConfig {
    fn default() -> Self {
        Self {
            schema: PanelSchema::default(),
            breakpoints: BreakpointConfig::default(),
            winsor: WinsorConfig::default(),
            min_constituents: 5,
            quality: Some(QualityChecks::default()),
        }
    }
}

impl ConstructionConfig {
    /// Validate every parameter.
    ///
    /// # Errors
    /// Returns `ConfigurationError` for invalid quantiles or a zero minimum
    /// constituent count.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.breakpoints.validate()?;
        self.winsor.validate()?;
        if self.min_constituents == 0 {
            return Err(ConfigurationError::InvalidParameter(
                "min_constituents must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builds single-sort tercile factors from a firm-month panel.
///
/// Every construction runs the same deterministic pipeline:
/// load, screen, winsorize, size and characteristic breakpoints, tercile
/// assignment, bucket aggregation and long-short combination.
#[derive(Debug, Clone)]
pub struct PortfolioConstructor {
    config: ConstructionConfig,
}

impl PortfolioConstructor {
    /// Create a new constructor with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ConstructionConfig::default())
    }

    /// Create a new constructor with custom configuration.
    #[must_use]
    pub const fn with_config(config: ConstructionConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &ConstructionConfig {
        &self.config
    }

    /// Run every stage up to and including tercile assignment.
    ///
    /// # Returns
    /// LazyFrame of eligible firm-months with canonical columns, both sets of
    /// breakpoints and the `portfolio` label.
    ///
    /// # Errors
    /// Returns `ModelError::Configuration` before touching the source if the
    /// configuration is invalid, `ModelError::Load` if the panel cannot be read
    /// and `ModelError::DataQuality` for null identifiers.
    pub fn assigned_panel<S>(&self, source: &S, spec: &FactorSpec) -> Result<LazyFrame, ModelError>
    where
        S: PanelSource + ?Sized,
    {
        self.config.validate()?;

        let raw = load_panel(source, &self.config.schema, spec)?;
        if let Some(checks) = &self.config.quality {
            let report = validate_panel(raw.clone(), checks)?;
            debug!(rows = report.rows, warnings = report.warnings.len(), "raw panel checked");
        }

        let winsorizer = Winsorizer::new(self.config.winsor.lower, self.config.winsor.upper)?;
        let panel = winsorizer.apply(
            screen_panel(raw, spec.positive_only),
            columns::RET,
            columns::EOM,
            columns::IS_PRIMARY,
        )?;

        let panel = with_breakpoints(panel, &self.config.breakpoints)?;
        Ok(assign_portfolios(panel))
    }

    /// Per-month, per-bucket return and constituent count.
    ///
    /// # Errors
    /// See [`Self::assigned_panel`].
    pub fn bucket_returns<S>(
        &self,
        source: &S,
        spec: &FactorSpec,
        scheme: WeightingScheme,
    ) -> Result<DataFrame, ModelError>
    where
        S: PanelSource + ?Sized,
    {
        let assigned = self.assigned_panel(source, spec)?;
        Ok(aggregate_returns(assigned, scheme).collect()?)
    }

    /// Composition of each bucket over time.
    ///
    /// # Returns
    /// DataFrame with | eom | portfolio | n_stocks | avg_me | avg_char |.
    ///
    /// # Errors
    /// See [`Self::assigned_panel`].
    pub fn diagnose<S>(&self, source: &S, spec: &FactorSpec) -> Result<DataFrame, ModelError>
    where
        S: PanelSource + ?Sized,
    {
        let assigned = self.assigned_panel(source, spec)?;
        Ok(crate::bucket_composition(assigned).collect()?)
    }
}

impl Default for PortfolioConstructor {
    fn default() -> Self {
        Self::new()
    }
}

impl FactorConstructor for PortfolioConstructor {
    type Error = ModelError;

    fn construct<S>(
        &self,
        source: &S,
        spec: &FactorSpec,
        scheme: WeightingScheme,
    ) -> Result<DataFrame, Self::Error>
    where
        S: PanelSource + ?Sized,
    {
        let assigned = self.assigned_panel(source, spec)?;
        let buckets = aggregate_returns(assigned, scheme);
        let series = combine_legs(buckets, spec.direction, &spec.name, self.config.min_constituents)
            .collect()?;

        info!(
            factor = %spec.name,
            scheme = %scheme,
            direction = %spec.direction,
            months = series.height(),
            "factor constructed"
        );
        Ok(series)
    }
}
