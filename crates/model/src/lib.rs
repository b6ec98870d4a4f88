#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tercile/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod panel;
pub use panel::{FramePanel, PanelSchema, ParquetPanel, load_panel, screen_panel};

mod breakpoints;
pub use breakpoints::{
    BreakpointConfig, attach_breakpoints, characteristic_breakpoints, size_breakpoints,
    with_breakpoints,
};

mod assign;
pub use assign::{assign_portfolios, bucket_label};

mod aggregate;
pub use aggregate::{aggregate_returns, bucket_return};

mod combine;
pub use combine::{combine_legs, extreme_legs, spread};

mod construction;
pub use construction::{ConstructionConfig, PortfolioConstructor, WinsorConfig};

mod diagnostics;
pub use diagnostics::{AVG_CHAR, AVG_ME, bucket_composition};

mod validation;
pub use validation::{
    BenchmarkSeries, SeriesSummary, ValidationReport, load_benchmark, read_benchmark,
    validate_series,
};

mod batch;
pub use batch::{
    BatchFailure, BatchOutcome, BatchReport, ReplicationSettings, output_file_name, run_batch,
    write_series,
};

mod error;
pub use error::ModelError;

/// Re-export commonly used types.
pub mod prelude {
    pub use tercile_traits::{FactorConstructor, PanelSource};

    pub use super::{
        ConstructionConfig, FramePanel, ModelError, ParquetPanel, PortfolioConstructor,
        ReplicationSettings,
    };
}
