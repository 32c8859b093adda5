//! Validation modules

pub mod identifiers;

pub use identifiers::{sanitize_mobile_number, sanitize_uuid, SanitizedIdentity};
