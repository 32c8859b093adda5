//! Single-image upload handlers: JSON base64, multipart form, raw binary body.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Multipart, Query, State},
    http::{header, HeaderMap},
    Json,
};
use inspectshot_core::models::{SingleUploadRequest, SingleUploadResponse};
use inspectshot_core::AppError;
use inspectshot_processing::decode_image;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::services::single_upload::{
    split_file_name, store_single_image, SingleUpload, UploadIdentity,
};
use crate::state::AppState;
use crate::utils::upload::extract_upload_form;

/// Upload one base64-encoded image
#[utoipa::path(
    post,
    path = "/upload",
    tag = "uploads",
    request_body = SingleUploadRequest,
    responses(
        (status = 200, description = "Image uploaded successfully", body = SingleUploadResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "upload_image"))]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<SingleUploadRequest>,
) -> Result<Json<SingleUploadResponse>, HttpAppError> {
    let encoded = request
        .image
        .as_deref()
        .filter(|image| !image.is_empty())
        .ok_or_else(|| AppError::BadRequest("Image data is required".to_string()))?;
    let data = decode_image(encoded)?;

    let upload = SingleUpload {
        identity: UploadIdentity {
            mobile_number: request.mobile_number,
            inspection_uuid: request.inspection_uuid,
            prdp_uuid: request.prdp_uuid,
            journey_type: request.journey_type,
        },
        filename: request.filename,
        extension: request.extension,
        data,
        declared_content_type: None,
    };

    Ok(Json(store_single_image(&state, upload).await?))
}

/// Upload one image as a multipart form
///
/// Text fields `mobileNumber`, `inspectionUuid`, `prdpUuid`, `journeyType`, `filename`,
/// `extension`, plus exactly one `file` part. Filename and extension default to the
/// uploaded file's name.
#[utoipa::path(
    post,
    path = "/upload-multipart",
    tag = "uploads",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image uploaded successfully", body = SingleUploadResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_multipart"))]
pub async fn upload_multipart(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<SingleUploadResponse>, HttpAppError> {
    let form = extract_upload_form(multipart).await?;

    let (stem, file_ext) = form
        .file_name
        .as_deref()
        .map(split_file_name)
        .unwrap_or(("", None));

    let upload = SingleUpload {
        identity: UploadIdentity {
            mobile_number: form.field("mobileNumber"),
            inspection_uuid: form.field("inspectionUuid"),
            prdp_uuid: form.field("prdpUuid"),
            journey_type: form.field("journeyType"),
        },
        filename: form.field("filename").or_else(|| Some(stem.to_string())),
        extension: form.field("extension").or_else(|| file_ext.map(String::from)),
        declared_content_type: form.content_type.clone(),
        data: form.file_data,
    };

    Ok(Json(store_single_image(&state, upload).await?))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BinaryUploadQuery {
    pub mobile_number: Option<String>,
    pub inspection_uuid: Option<String>,
    pub prdp_uuid: Option<String>,
    pub journey_type: Option<String>,
    pub filename: Option<String>,
    pub extension: Option<String>,
}

/// Upload one image as the raw request body
///
/// Identifiers come from the query string. An `image/*` `Content-Type` header is stored
/// as-is; otherwise the content type follows the extension.
#[utoipa::path(
    post,
    path = "/upload-binary",
    tag = "uploads",
    params(BinaryUploadQuery),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Image uploaded successfully", body = SingleUploadResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 413, description = "Body too large", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, headers, body), fields(operation = "upload_binary", size_bytes = body.len()))]
pub async fn upload_binary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BinaryUploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SingleUploadResponse>, HttpAppError> {
    let declared_content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(String::from);

    let upload = SingleUpload {
        identity: UploadIdentity {
            mobile_number: query.mobile_number,
            inspection_uuid: query.inspection_uuid,
            prdp_uuid: query.prdp_uuid,
            journey_type: query.journey_type,
        },
        filename: query.filename,
        extension: query.extension,
        data: body.to_vec(),
        declared_content_type,
    };

    Ok(Json(store_single_image(&state, upload).await?))
}
