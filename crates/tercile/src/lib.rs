//! # tercile
//!
//! Replication of academic single-sort equity factors.
//!
//! This crate provides a unified interface to the tercile workspace.
//! Individual components can be enabled via feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Buckets, schemes, directions and factor specs
//! - `traits`: Panel source, characteristic and constructor traits
//! - `math`: Group quantiles, winsorization, weighting and statistics
//! - `styles`: The standard factor catalog
//! - `model`: Portfolio construction, validation and batch runs
//! - `utils`: Data quality checks and frame helpers
//! - `cli`: The `tercile` binary
//!
//! ## Example
//!
//! ```rust,ignore
//! use tercile::{model::prelude::*, primitives::WeightingScheme, styles::find};
//!
//! let source = ParquetPanel::new("data/raw/char/jkp_char_usa.parquet");
//! let spec = find("be_me")?.spec();
//! let series = PortfolioConstructor::new().construct(&source, &spec, WeightingScheme::CappedValueWeight)?;
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "cli")]
use {clap as _, indicatif as _, polars as _, serde_json as _, tracing as _, tracing_subscriber as _};

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use tercile_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use tercile_traits as traits;
#[cfg(feature = "math")]
#[doc(inline)]
pub use tercile_math as math;
#[cfg(feature = "styles")]
#[doc(inline)]
pub use tercile_styles as styles;
#[cfg(feature = "model")]
#[doc(inline)]
pub use tercile_model as model;
#[cfg(feature = "utils")]
#[doc(inline)]
pub use tercile_utils as utils;
