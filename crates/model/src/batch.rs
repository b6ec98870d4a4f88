//! Batch replication of many (factor, scheme) combinations.

use std::{
    collections::BTreeMap,
    fs::File,
    path::{Path, PathBuf},
};

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tercile_primitives::{ConfigurationError, FactorName, FactorSpec, WeightingScheme};
use tercile_traits::{FactorConstructor, PanelSource};
use tracing::{error, info, warn};

use crate::{ModelError, PortfolioConstructor, ValidationReport, load_benchmark, validate_series};

/// What to replicate and where to compare it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplicationSettings {
    /// Factors to construct.
    pub factors: Vec<FactorSpec>,
    /// Weighting schemes applied to every factor.
    pub schemes: Vec<WeightingScheme>,
    /// Benchmark CSV per scheme identifier; schemes without one are not validated.
    pub benchmarks: BTreeMap<String, PathBuf>,
    /// Correlation a replication must exceed to pass.
    pub correlation_threshold: f64,
    /// Directory receiving one parquet file per series (`None` skips writing).
    pub output_dir: Option<PathBuf>,
}

impl Default for ReplicationSettings {
    fn default() -> Self {
        Self {
            factors: tercile_styles::catalog().iter().map(|factor| factor.spec()).collect(),
            schemes: WeightingScheme::ALL.to_vec(),
            benchmarks: BTreeMap::new(),
            correlation_threshold: 0.95,
            output_dir: Some(PathBuf::from("data/processed")),
        }
    }
}

impl ReplicationSettings {
    /// Read settings from a JSON file; absent fields take their defaults.
    ///
    /// # Errors
    /// Returns `ModelError::Io` or `ModelError::Json` if the file cannot be read
    /// or parsed.
    pub fn from_json_file(path: &Path) -> Result<Self, ModelError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Check the settings before any data is read.
    ///
    /// # Errors
    /// Returns `ConfigurationError` for an empty factor or scheme list, an
    /// unknown benchmark scheme key or a threshold outside [-1, 1].
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.factors.is_empty() || self.schemes.is_empty() {
            return Err(ConfigurationError::InvalidParameter(
                "at least one factor and one scheme are required".to_string(),
            ));
        }
        for key in self.benchmarks.keys() {
            key.parse::<WeightingScheme>()?;
        }
        if !(-1.0..=1.0).contains(&self.correlation_threshold) {
            return Err(ConfigurationError::InvalidParameter(format!(
                "correlation_threshold must be in [-1, 1], got {}",
                self.correlation_threshold
            )));
        }
        Ok(())
    }

    /// Benchmark file configured for `scheme`.
    #[must_use]
    pub fn benchmark_for(&self, scheme: WeightingScheme) -> Option<&Path> {
        self.benchmarks
            .iter()
            .find(|(key, _)| key.parse::<WeightingScheme>().is_ok_and(|parsed| parsed == scheme))
            .map(|(_, path)| path.as_path())
    }

    /// Every (factor, scheme) unit, scheme by scheme.
    pub fn units(&self) -> impl Iterator<Item = (&FactorSpec, WeightingScheme)> + '_ {
        self.schemes
            .iter()
            .flat_map(move |scheme| self.factors.iter().map(move |factor| (factor, *scheme)))
    }

    /// Number of units in the batch.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.factors.len() * self.schemes.len()
    }
}

/// A successfully constructed unit.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Benchmark factor name.
    pub factor: FactorName,
    /// Weighting scheme.
    pub scheme: WeightingScheme,
    /// Replicated series, | eom | `<factor>_<SCHEME>` |.
    pub series: DataFrame,
    /// Where the series was written.
    pub output: Option<PathBuf>,
    /// Comparison with the benchmark, when one was configured and overlaps.
    pub validation: Option<ValidationReport>,
}

/// A unit that failed; its siblings are unaffected.
#[derive(Debug)]
pub struct BatchFailure {
    /// Benchmark factor name.
    pub factor: FactorName,
    /// Weighting scheme.
    pub scheme: WeightingScheme,
    /// What went wrong.
    pub error: ModelError,
}

impl std::fmt::Display for BatchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.factor, self.scheme, self.error)
    }
}

/// Results of a batch, in unit order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Units that produced a series.
    pub outcomes: Vec<BatchOutcome>,
    /// Units that failed.
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Correlation table with one row per factor and one column per scheme.
    ///
    /// Scheme columns follow the order `ew`, `vw`, `vw_cap`; cells without a
    /// validation are null.
    ///
    /// # Errors
    /// Returns a polars error if the frame cannot be assembled.
    pub fn summary_table(&self) -> PolarsResult<DataFrame> {
        let mut factors: Vec<&FactorName> = Vec::new();
        for outcome in &self.outcomes {
            if !factors.contains(&&outcome.factor) {
                factors.push(&outcome.factor);
            }
        }

        let correlation = |factor: &FactorName, scheme: WeightingScheme| {
            self.outcomes
                .iter()
                .find(|outcome| &outcome.factor == factor && outcome.scheme == scheme)
                .and_then(|outcome| outcome.validation.as_ref())
                .map(|report| report.correlation)
        };

        let mut table = vec![Column::new(
            "factor".into(),
            factors.iter().map(|factor| factor.as_str()).collect::<Vec<_>>(),
        )];
        for scheme in WeightingScheme::ALL {
            if self.outcomes.iter().any(|outcome| outcome.scheme == scheme) {
                let values: Vec<Option<f64>> =
                    factors.iter().map(|factor| correlation(factor, scheme)).collect();
                table.push(Column::new(scheme.as_str().into(), values));
            }
        }
        DataFrame::new(table)
    }
}

/// File name of a replicated series, e.g. `be_me_vw_cap_replicated.parquet`.
#[must_use]
pub fn output_file_name(name: &FactorName) -> String {
    format!("{}_replicated.parquet", name.as_str().to_ascii_lowercase())
}

/// Write a series to parquet, creating parent directories.
///
/// # Errors
/// Returns `ModelError::Io` or `ModelError::Polars` if writing fails.
pub fn write_series(series: &mut DataFrame, path: &Path) -> Result<(), ModelError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    ParquetWriter::new(file).finish(series)?;
    Ok(())
}

fn run_unit<S>(
    constructor: &PortfolioConstructor,
    source: &S,
    settings: &ReplicationSettings,
    spec: &FactorSpec,
    scheme: WeightingScheme,
) -> Result<BatchOutcome, ModelError>
where
    S: PanelSource + ?Sized,
{
    let unit = FactorSpec { name: spec.replicated_name(scheme), ..spec.clone() };
    let mut series = constructor.construct(source, &unit, scheme)?;

    let output = match &settings.output_dir {
        Some(dir) => {
            let path = dir.join(output_file_name(&unit.name));
            write_series(&mut series, &path)?;
            info!(path = %path.display(), "series written");
            Some(path)
        }
        None => None,
    };

    let validation = match settings.benchmark_for(scheme) {
        Some(path) => {
            let benchmark = load_benchmark(path, spec.name.as_str())?;
            match validate_series(
                &series,
                &benchmark,
                spec.name.as_str(),
                settings.correlation_threshold,
            ) {
                Ok(report) => Some(report),
                Err(err) if err.is_recoverable() => {
                    warn!(factor = %spec.name, %scheme, %err, "validation skipped");
                    None
                }
                Err(err) => return Err(err),
            }
        }
        None => None,
    };

    Ok(BatchOutcome { factor: spec.name.clone(), scheme, series, output, validation })
}

/// Construct, persist and validate every unit of `settings`.
///
/// Units run independently: a failing unit is recorded in
/// [`BatchReport::failures`] and the batch moves on. `on_unit` is called
/// after each unit, whatever its outcome.
///
/// # Errors
/// Returns `ModelError::Configuration` if the settings or the constructor
/// configuration are invalid; no unit runs in that case.
pub fn run_batch<S, F>(
    constructor: &PortfolioConstructor,
    source: &S,
    settings: &ReplicationSettings,
    mut on_unit: F,
) -> Result<BatchReport, ModelError>
where
    S: PanelSource + ?Sized,
    F: FnMut(&FactorSpec, WeightingScheme),
{
    settings.validate()?;
    constructor.config().validate()?;

    let mut report = BatchReport::default();
    for (spec, scheme) in settings.units() {
        match run_unit(constructor, source, settings, spec, scheme) {
            Ok(outcome) => report.outcomes.push(outcome),
            Err(err) => {
                error!(factor = %spec.name, %scheme, %err, "unit failed");
                report.failures.push(BatchFailure { factor: spec.name.clone(), scheme, error: err });
            }
        }
        on_unit(spec, scheme);
    }

    info!(
        succeeded = report.outcomes.len(),
        failed = report.failures.len(),
        "batch complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use tercile_primitives::Direction;

    use super::*;

    #[test]
    fn default_settings_cover_catalog() {
        let settings = ReplicationSettings::default();
        assert_eq!(settings.factors.len(), 6);
        assert_eq!(settings.unit_count(), 18);
        assert_eq!(settings.units().count(), 18);
        assert!(settings.validate().is_ok());
        assert!(settings.factors.iter().any(|spec| spec.positive_only));
    }

    #[test]
    fn settings_from_partial_json() {
        let json = r#"{
            "factors": [{"characteristic": "at_gr1", "name": "at_gr1", "direction": "short"}],
            "schemes": ["vw_cap"],
            "benchmarks": {"vw_cap": "bench/vw_cap.csv"}
        }"#;
        let settings: ReplicationSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.factors[0].direction, Direction::LongLow);
        assert_eq!(settings.correlation_threshold, 0.95);
        assert_eq!(
            settings.benchmark_for(WeightingScheme::CappedValueWeight),
            Some(Path::new("bench/vw_cap.csv"))
        );
        assert!(settings.benchmark_for(WeightingScheme::EqualWeight).is_none());
    }

    #[test]
    fn settings_infer_book_to_market_screen() {
        let json = r#"{"factors": [{"characteristic": "be_me", "name": "be_me", "direction": "long"}]}"#;
        let settings: ReplicationSettings = serde_json::from_str(json).unwrap();
        assert!(settings.factors[0].positive_only);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let mut settings = ReplicationSettings::default();
        settings.benchmarks.insert("vw_capped".into(), PathBuf::from("x.csv"));
        assert!(matches!(settings.validate(), Err(ConfigurationError::UnknownScheme(_))));

        let settings = ReplicationSettings { correlation_threshold: 1.5, ..Default::default() };
        assert!(settings.validate().is_err());

        let settings = ReplicationSettings { factors: Vec::new(), ..Default::default() };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn output_file_is_lowercase() {
        let name = FactorName::from("be_me_VW_CAP");
        assert_eq!(output_file_name(&name), "be_me_vw_cap_replicated.parquet");
    }
}
