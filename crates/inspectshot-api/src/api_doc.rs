//! OpenAPI documentation, served at `/api-docs/openapi.json`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use crate::setup::routes;
use inspectshot_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inspectshot API",
        version = "0.1.0",
        description = "Inspection photo upload service. Batches of base64 screenshots are stored under a per-inspection folder in object storage, with a per-item outcome report."
    ),
    paths(
        handlers::batch_upload::upload_batch,
        handlers::image_upload::upload_image,
        handlers::image_upload::upload_multipart,
        handlers::image_upload::upload_binary,
        routes::health::health_check,
    ),
    components(schemas(
        models::BatchUploadRequest,
        models::BatchUploadResponse,
        models::BatchReport,
        models::UploadOutcome,
        models::OutcomeStatus,
        models::SingleUploadRequest,
        models::SingleUploadResponse,
        routes::health::HealthResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "uploads", description = "Screenshot and image uploads"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
