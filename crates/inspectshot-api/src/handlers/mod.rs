pub mod batch_upload;
pub mod image_upload;
