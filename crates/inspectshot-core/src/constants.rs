//! Limits and defaults shared across crates.

/// Upper bound on the number of screenshots accepted in one batch request.
pub const MAX_BATCH_SIZE: usize = 100;

/// Extension used when a screenshot does not carry one.
pub const DEFAULT_EXTENSION: &str = "jpg";

/// Token substituted for a missing or fully-stripped mobile number.
pub const UNKNOWN_MOBILE_TOKEN: &str = "unknown";
