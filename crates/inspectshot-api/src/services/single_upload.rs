//! Single-image upload
//!
//! Shared by the JSON, multipart and raw-binary endpoints. Uses the same sanitizer,
//! key layout and uploader as the batch pipeline, but any failure fails the request.

use inspectshot_core::models::{JourneyType, SingleUploadResponse};
use inspectshot_core::{AppError, SanitizedIdentity};
use inspectshot_storage::{
    build_folder_path, build_item_key, content_type_for_extension, resolve_extension,
};

use crate::state::AppState;

/// Raw identifiers accompanying a single upload.
#[derive(Debug, Default, Clone)]
pub struct UploadIdentity {
    pub mobile_number: Option<String>,
    pub inspection_uuid: Option<String>,
    pub prdp_uuid: Option<String>,
    pub journey_type: Option<String>,
}

/// One decoded image ready for storage.
#[derive(Debug)]
pub struct SingleUpload {
    pub identity: UploadIdentity,
    pub filename: Option<String>,
    pub extension: Option<String>,
    pub data: Vec<u8>,
    /// Content type announced by the client; used when it is an `image/*` type
    pub declared_content_type: Option<String>,
}

/// Split `"front.PNG"` into `("front", Some("PNG"))`. Names without a dot (or with a
/// leading dot only) have no extension.
pub fn split_file_name(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    }
}

fn image_content_type(declared: Option<&str>) -> Option<String> {
    let mime = declared?.split(';').next()?.trim().to_ascii_lowercase();
    mime.starts_with("image/").then_some(mime)
}

pub async fn store_single_image(
    state: &AppState,
    upload: SingleUpload,
) -> Result<SingleUploadResponse, AppError> {
    let identity = SanitizedIdentity::from_raw(
        upload.identity.mobile_number.as_deref(),
        upload.identity.inspection_uuid.as_deref(),
        upload.identity.prdp_uuid.as_deref(),
    );
    let journey_type = upload
        .identity
        .journey_type
        .as_deref()
        .and_then(JourneyType::parse);
    let folder = build_folder_path(&identity, journey_type)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let filename = upload
        .filename
        .as_deref()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::BadRequest("Filename is required".to_string()))?;

    if upload.data.is_empty() {
        return Err(AppError::BadRequest("Empty image data".to_string()));
    }

    let extension = resolve_extension(upload.extension.as_deref());
    let key = build_item_key(&folder, filename, Some(extension));
    let content_type = image_content_type(upload.declared_content_type.as_deref())
        .unwrap_or_else(|| content_type_for_extension(extension));

    let receipt = state
        .uploader
        .upload(&key, upload.data, &content_type)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    tracing::info!(
        key = %receipt.key,
        size_bytes = receipt.size,
        content_type = %content_type,
        "Image uploaded"
    );

    Ok(SingleUploadResponse::new(
        state.storage_info.bucket.clone(),
        receipt.key,
        receipt.url,
        content_type,
        receipt.size,
    ))
}
