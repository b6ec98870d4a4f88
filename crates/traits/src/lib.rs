#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tercile/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod characteristic;
pub use characteristic::{SortCharacteristic, Style};

mod source;
pub use source::{LoadError, PanelSource};

mod constructor;
pub use constructor::FactorConstructor;
