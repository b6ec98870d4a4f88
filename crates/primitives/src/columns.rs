//! Canonical column names of the normalized firm-month panel.
//!
//! The loader renames whatever the source table calls these fields to the
//! names below, so every later stage can address them without configuration.

/// Month-end date of the observation.
pub const EOM: &str = "eom";

/// Firm identifier.
pub const ID: &str = "id";

/// Exchange code of the listing.
pub const EXCHANGE: &str = "exchcd";

/// Whether the observation comes from the primary return source.
pub const IS_PRIMARY: &str = "is_primary";

/// Size group label.
pub const SIZE_GROUP: &str = "size_grp";

/// Market equity.
pub const ME: &str = "me";

/// Forward one-month excess return.
pub const RET: &str = "ret";

/// Sorting characteristic.
pub const CHAR: &str = "char";

/// Lower size breakpoint (micro-cap threshold).
pub const ME_LOWER: &str = "me_p20";

/// Upper size breakpoint (weight cap).
pub const ME_UPPER: &str = "me_p80";

/// Lower characteristic breakpoint.
pub const CHAR_LOWER: &str = "char_p33";

/// Upper characteristic breakpoint.
pub const CHAR_UPPER: &str = "char_p67";

/// Assigned bucket label.
pub const PORTFOLIO: &str = "portfolio";

/// Aggregated bucket return.
pub const PORT_RET: &str = "port_ret";

/// Number of constituents in a bucket.
pub const N_STOCKS: &str = "n_stocks";
