#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tercile/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod columns;

mod dates;
pub use dates::{days_to_date, date_to_days, month_end, shift_month_end};

mod factor;
pub use factor::{FactorName, FactorSpec};

mod portfolio;
pub use portfolio::{Bucket, Direction, WeightingScheme};

mod error;
pub use error::ConfigurationError;

/// Re-export common date type.
pub type Date = chrono::NaiveDate;
