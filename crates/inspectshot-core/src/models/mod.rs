//! Domain models for the upload pipeline

pub mod batch;
pub mod single;

pub use batch::{
    format_kib, BatchReport, BatchUploadRequest, BatchUploadResponse, JourneyType, OutcomeStatus,
    ReportIdentity, UploadOutcome,
};
pub use single::{SingleUploadRequest, SingleUploadResponse};
