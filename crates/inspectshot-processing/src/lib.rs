//! Inspectshot Processing Library
//!
//! Per-item checks that run before anything touches storage: shape validation of a
//! screenshot entry and decoding of its base64 payload. Both report failures as
//! [`ItemError`], whose message is what ends up in the item's outcome.

pub mod decode;
pub mod validator;

pub use decode::decode_image;
pub use validator::{raw_filename, validate_item, ItemError, ScreenshotItem};
