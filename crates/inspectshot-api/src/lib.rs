//! Inspectshot API Library
//!
//! HTTP surface of the inspection photo upload service: handlers, the batch
//! orchestration service, and application setup.

// Module declarations
mod api_doc;
pub mod constants;
mod handlers;
mod utils;

// Public modules
pub mod error;
pub mod services;
pub mod setup;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::batch_upload::{BatchUploadService, PreparedBatch};
pub use state::{AppState, StorageInfo};
