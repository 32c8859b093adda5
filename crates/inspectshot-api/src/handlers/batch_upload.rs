use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use inspectshot_core::models::{BatchReport, BatchUploadRequest, BatchUploadResponse};
use inspectshot_core::AppError;
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::services::batch_upload::{BatchUploadService, PreparedBatch};
use crate::state::AppState;

/// Run the batch on its own task, inside the caller's span.
fn spawn_batch(service: BatchUploadService, batch: PreparedBatch) -> JoinHandle<BatchReport> {
    tokio::spawn(async move { service.run(batch).await }.instrument(tracing::Span::current()))
}

/// Upload a batch of base64 screenshots
///
/// The envelope (item count, inspection UUID) is checked first and rejected with 400
/// before anything is stored. After that every screenshot yields one outcome in input
/// order. The response is 200 when at least one screenshot was stored and 500 when none
/// were; both carry the full report.
///
/// The batch runs in its own task, so it completes even if the client disconnects.
#[utoipa::path(
    post,
    path = "/upload-batch",
    tag = "uploads",
    request_body = BatchUploadRequest,
    responses(
        (status = 200, description = "At least one screenshot stored", body = BatchUploadResponse),
        (status = 400, description = "Invalid batch envelope", body = ErrorResponse),
        (status = 500, description = "No screenshot stored, or the batch crashed", body = BatchUploadResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "upload_batch"))]
pub async fn upload_batch(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<BatchUploadRequest>,
) -> Result<Response, HttpAppError> {
    let batch = state.batch_service.prepare(request)?;

    let report = spawn_batch(state.batch_service.clone(), batch)
        .await
        .map_err(|e| AppError::BatchFailed(e.to_string()))?;

    let status = if report.any_succeeded() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let body = BatchUploadResponse::new(report, state.storage_info.bucket.clone());
    Ok((status, Json(body)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use inspectshot_core::StorageBackend;
    use inspectshot_storage::{ImageUploader, Storage, StorageResult};
    use serde_json::json;
    use std::sync::Mutex;

    /// Records the name of the span each put runs in.
    #[derive(Default)]
    struct SpanRecordingStorage {
        spans: Mutex<Vec<Option<&'static str>>>,
    }

    #[async_trait]
    impl Storage for SpanRecordingStorage {
        async fn upload_with_key(
            &self,
            storage_key: &str,
            _data: Bytes,
            _content_type: &str,
        ) -> StorageResult<String> {
            let name = tracing::Span::current().metadata().map(|m| m.name());
            self.spans.lock().unwrap().push(name);
            Ok(format!("memory://{}", storage_key))
        }

        fn backend_type(&self) -> StorageBackend {
            StorageBackend::Local
        }
    }

    #[tokio::test]
    async fn test_spawned_batch_stays_in_request_span() {
        let _subscriber = tracing::subscriber::set_default(tracing_subscriber::registry());

        let storage = Arc::new(SpanRecordingStorage::default());
        let service = BatchUploadService::new(ImageUploader::new(storage.clone()), 2);
        let request: BatchUploadRequest = serde_json::from_value(json!({
            "inspectionUuid": "insp-1",
            "screenshots": [
                {"filename": "a", "image": "aGVsbG8="},
                {"filename": "b", "image": "aGVsbG8="},
            ],
        }))
        .unwrap();
        let batch = service.prepare(request).unwrap();

        let span = tracing::info_span!("request", request_id = "req-1");
        let report = span
            .in_scope(|| spawn_batch(service, batch))
            .await
            .unwrap();

        assert_eq!(report.successful, 2);
        assert_eq!(
            *storage.spans.lock().unwrap(),
            vec![Some("request"), Some("request")]
        );
    }
}
