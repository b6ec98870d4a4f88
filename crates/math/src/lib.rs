#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tercile/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod quantile;
pub use quantile::{GroupQuantile, group_quantiles};

mod winsorize;
pub use winsorize::{Winsorizer, clip_between};

mod weights;
pub use weights::{capped_weight, weighted_mean};

mod stats;
pub use stats::{annualized_volatility, mean, pearson_correlation, sample_std};

mod error;
pub use error::MathError;
