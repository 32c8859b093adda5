//! Inspectshot Core Library
//!
//! This crate provides the domain models, error types, configuration, and identifier
//! sanitization shared by every Inspectshot component.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, UploadServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
pub use validation::{sanitize_mobile_number, sanitize_uuid, SanitizedIdentity};
