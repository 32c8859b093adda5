//! Batch upload orchestration
//!
//! A batch is processed in two phases. [`BatchUploadService::prepare`] checks the
//! envelope (item count, identifiers) and derives the shared folder; any failure there
//! rejects the whole request before storage is touched. [`BatchUploadService::run`]
//! then turns every screenshot into exactly one outcome, in input order, without ever
//! failing as a whole.

mod service;

pub use service::{BatchUploadService, PreparedBatch};
