//! Inspectshot Storage Library
//!
//! Storage abstraction and backends (S3 via `object_store`, local filesystem), plus the
//! pieces of the upload path that sit directly on top of a backend: key layout,
//! content-type resolution and the single-put uploader.
//!
//! # Storage key format
//!
//! Every object lives under a three-segment folder derived from sanitized identifiers:
//!
//! - `{mobile}/{inspection}/{inspection}/{filename}.{ext}` for pre-inspection journeys
//! - `{mobile}/{inspection}/{prdp}/{filename}.{ext}` for PRDP journeys with a PRDP id
//!
//! Key generation is centralized in the `keys` module.

pub mod content_type;
pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;
pub mod uploader;

// Re-export commonly used types
pub use content_type::content_type_for_extension;
pub use factory::create_storage;
pub use inspectshot_core::StorageBackend;
pub use keys::{build_folder_path, build_item_key, resolve_extension, FolderPath, KeyError};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use uploader::{ImageUploader, UploadError, UploadReceipt};
