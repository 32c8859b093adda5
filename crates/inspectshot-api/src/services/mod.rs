pub mod batch_upload;
pub mod single_upload;
