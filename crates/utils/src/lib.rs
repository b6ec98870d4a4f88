#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tercile/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod quality;
pub use quality::{DataQualityReport, DataQualityWarning, QualityChecks, validate_panel};

mod frame;
pub use frame::{date_column, date_values, float_values};

mod error;
pub use error::UtilsError;
