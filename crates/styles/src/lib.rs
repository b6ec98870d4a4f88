#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tercile/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod investment;
pub use investment::{InvestmentConfig, InvestmentFactor};

mod momentum;
pub use momentum::{MomentumConfig, MomentumFactor, ReversalConfig, ReversalFactor};

mod profitability;
pub use profitability::{ProfitabilityConfig, ProfitabilityFactor};

mod size;
pub use size::{SizeConfig, SizeFactor};

mod value;
pub use value::{ValueConfig, ValueFactor};

mod catalog;
pub use catalog::{catalog, find};

mod error;
pub use error::StyleError;
