//! Loading the firm-month panel.

use std::path::{Path, PathBuf};

use polars::prelude::*;
use tercile_primitives::{FactorSpec, columns};
use tercile_traits::{LoadError, PanelSource};
use tracing::debug;

use crate::ModelError;

/// Parquet file on disk.
#[derive(Debug, Clone)]
pub struct ParquetPanel {
    path: PathBuf,
}

impl ParquetPanel {
    /// Create a source reading `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PanelSource for ParquetPanel {
    fn scan(&self) -> Result<LazyFrame, LoadError> {
        LazyFrame::scan_parquet(&self.path, ScanArgsParquet::default())
            .map_err(|error| LoadError::Unreadable { origin: self.describe(), error })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory frame, mostly for tests and callers that already hold the data.
#[derive(Debug, Clone)]
pub struct FramePanel {
    frame: DataFrame,
}

impl FramePanel {
    /// Wrap an existing frame.
    #[must_use]
    pub const fn new(frame: DataFrame) -> Self {
        Self { frame }
    }
}

impl PanelSource for FramePanel {
    fn scan(&self) -> Result<LazyFrame, LoadError> {
        Ok(self.frame.clone().lazy())
    }

    fn describe(&self) -> String {
        format!("in-memory frame ({} rows)", self.frame.height())
    }
}

/// Source column names of the firm-month panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSchema {
    /// Month-end date.
    pub eom: String,
    /// Firm identifier.
    pub id: String,
    /// Exchange code.
    pub exchange: String,
    /// Return source flag.
    pub source: String,
    /// Value of `source` marking the primary return source.
    pub primary_source: i64,
    /// Size group.
    pub size_group: String,
    /// Market equity.
    pub me: String,
    /// Forward one-month excess return.
    pub ret: String,
}

impl Default for PanelSchema {
    fn default() -> Self {
        Self {
            eom: "eom".to_string(),
            id: "permno".to_string(),
            exchange: "crsp_exchcd".to_string(),
            source: "source_crsp".to_string(),
            primary_source: 1,
            size_group: "size_grp".to_string(),
            me: "me".to_string(),
            ret: "ret_exc_lead1m".to_string(),
        }
    }
}

impl PanelSchema {
    /// Source columns needed to sort on `characteristic`, without duplicates.
    #[must_use]
    pub fn required_columns<'a>(&'a self, characteristic: &'a str) -> Vec<&'a str> {
        let mut required = vec![
            self.eom.as_str(),
            self.id.as_str(),
            self.exchange.as_str(),
            self.source.as_str(),
            self.size_group.as_str(),
            self.me.as_str(),
            self.ret.as_str(),
        ];
        if !required.contains(&characteristic) {
            required.push(characteristic);
        }
        required
    }

    fn canonical_exprs(&self, characteristic: &str) -> Vec<Expr> {
        vec![
            col(self.eom.as_str()).cast(DataType::Date).dt().month_end().alias(columns::EOM),
            col(self.id.as_str()).alias(columns::ID),
            col(self.exchange.as_str()).cast(DataType::Int64).alias(columns::EXCHANGE),
            col(self.source.as_str())
                .cast(DataType::Int64)
                .eq(lit(self.primary_source))
                .fill_null(lit(false))
                .alias(columns::IS_PRIMARY),
            col(self.size_group.as_str()).alias(columns::SIZE_GROUP),
            col(self.me.as_str()).cast(DataType::Float64).alias(columns::ME),
            col(self.ret.as_str()).cast(DataType::Float64).alias(columns::RET),
            col(characteristic).cast(DataType::Float64).alias(columns::CHAR),
        ]
    }
}

/// Select the columns needed for `spec` and rename them to canonical names.
///
/// The characteristic lands in [`columns::CHAR`]. When it is the market equity
/// column itself, the source column is read once and appears under both names.
/// No row is removed here; see [`screen_panel`].
///
/// # Errors
/// Returns `LoadError::Unreadable` if the source cannot be scanned and
/// `LoadError::MissingColumn` if a required column is absent.
pub fn load_panel<S>(
    source: &S,
    schema: &PanelSchema,
    spec: &FactorSpec,
) -> Result<LazyFrame, ModelError>
where
    S: PanelSource + ?Sized,
{
    let mut lf = source.scan()?;
    let available = lf
        .collect_schema()
        .map_err(|error| LoadError::Unreadable { origin: source.describe(), error })?;

    let required = schema.required_columns(&spec.characteristic);
    if let Some(missing) = required.iter().find(|name| !available.contains(name)) {
        return Err(LoadError::MissingColumn {
            origin: source.describe(),
            column: (*missing).to_string(),
        }
        .into());
    }
    debug!(source = %source.describe(), columns = required.len(), "panel columns resolved");

    Ok(lf.select(schema.canonical_exprs(&spec.characteristic)))
}

/// Drop rows that cannot take part in a sort.
///
/// Removes rows with a null characteristic, market equity, size group or
/// forward return, and with `positive_only` also rows whose characteristic
/// is not strictly positive.
pub fn screen_panel(panel: LazyFrame, positive_only: bool) -> LazyFrame {
    let complete = col(columns::CHAR)
        .is_not_null()
        .and(col(columns::ME).is_not_null())
        .and(col(columns::SIZE_GROUP).is_not_null())
        .and(col(columns::RET).is_not_null());

    let panel = panel.filter(complete);
    if positive_only { panel.filter(col(columns::CHAR).gt(lit(0.0))) } else { panel }
}

#[cfg(test)]
mod tests {
    use tercile_primitives::{Date, Direction};
    use tercile_utils::date_values;

    use super::*;

    fn raw_panel() -> DataFrame {
        df! {
            "eom" => &[18_262i32, 18_262, 18_262, 18_262],
            "permno" => &[1i64, 2, 3, 4],
            "crsp_exchcd" => &[Some(1i64), Some(3), None, Some(1)],
            "source_crsp" => &[Some(1i64), Some(0), Some(1), None],
            "size_grp" => &[Some("large"), Some("micro"), None, Some("small")],
            "me" => &[Some(100.0), Some(5.0), Some(20.0), Some(40.0)],
            "ret_exc_lead1m" => &[Some(0.01), Some(0.02), Some(0.03), None],
            "be_me" => &[Some(0.5), Some(-0.2), Some(1.0), Some(0.7)],
        }
        .unwrap()
    }

    fn spec(characteristic: &str) -> FactorSpec {
        FactorSpec::new(characteristic, characteristic, Direction::LongHigh)
    }

    #[test]
    fn load_renames_and_flags() {
        let source = FramePanel::new(raw_panel());
        let loaded = load_panel(&source, &PanelSchema::default(), &spec("be_me"))
            .unwrap()
            .collect()
            .unwrap();

        let names: Vec<&str> = loaded.get_column_names().iter().map(|s| s.as_str()).collect();
        assert_eq!(
            names,
            ["eom", "id", "exchcd", "is_primary", "size_grp", "me", "ret", "char"]
        );
        assert_eq!(loaded.column("eom").unwrap().dtype(), &DataType::Date);

        let primary: Vec<Option<bool>> =
            loaded.column("is_primary").unwrap().bool().unwrap().into_iter().collect();
        assert_eq!(primary, [Some(true), Some(false), Some(true), Some(false)]);
    }

    #[test]
    fn load_normalizes_dates_to_month_end() {
        // 2020-01-01 and 2020-02-29.
        let mut raw = raw_panel();
        raw.with_column(Column::new("eom".into(), [18_262i32, 18_262, 18_321, 18_321]))
            .unwrap();
        let loaded = load_panel(&FramePanel::new(raw), &PanelSchema::default(), &spec("be_me"))
            .unwrap()
            .collect()
            .unwrap();

        let jan = Date::from_ymd_opt(2020, 1, 31);
        let feb = Date::from_ymd_opt(2020, 2, 29);
        assert_eq!(date_values(&loaded, "eom").unwrap(), [jan, jan, feb, feb]);
    }

    #[test]
    fn screen_drops_incomplete_and_non_positive() {
        let source = FramePanel::new(raw_panel());
        let loaded = load_panel(&source, &PanelSchema::default(), &spec("be_me")).unwrap();

        let screened = screen_panel(loaded.clone(), false).collect().unwrap();
        assert_eq!(screened.height(), 2);

        let screened = screen_panel(loaded, true).collect().unwrap();
        let ids: Vec<Option<i64>> =
            screened.column("id").unwrap().i64().unwrap().into_iter().collect();
        assert_eq!(ids, [Some(1)]);
    }

    #[test]
    fn size_sort_reads_market_equity_once() {
        let schema = PanelSchema::default();
        assert_eq!(schema.required_columns("me").len(), 7);

        let source = FramePanel::new(raw_panel());
        let loaded = load_panel(&source, &schema, &spec("me")).unwrap().collect().unwrap();
        let values = |name: &str| -> Vec<Option<f64>> {
            loaded.column(name).unwrap().f64().unwrap().into_iter().collect()
        };
        assert_eq!(values("me"), values("char"));
    }

    #[test]
    fn missing_column_is_a_load_error() {
        let source = FramePanel::new(raw_panel());
        let err = load_panel(&source, &PanelSchema::default(), &spec("ope_be")).err().expect("expected a load error");
        match err {
            ModelError::Load(load) => assert_eq!(load.missing_column(), Some("ope_be")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unreadable_parquet_is_a_load_error() {
        let source = ParquetPanel::new("/nonexistent/panel.parquet");
        let err = load_panel(&source, &PanelSchema::default(), &spec("be_me")).err().expect("expected a load error");
        assert!(matches!(err, ModelError::Load(LoadError::Unreadable { .. })));
    }
}
