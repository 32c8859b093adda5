use std::time::Instant;

use futures::stream::{self, StreamExt};
use inspectshot_core::constants::MAX_BATCH_SIZE;
use inspectshot_core::models::{
    BatchReport, BatchUploadRequest, JourneyType, ReportIdentity, UploadOutcome,
};
use inspectshot_core::{AppError, SanitizedIdentity};
use inspectshot_processing::{decode_image, raw_filename, validate_item};
use inspectshot_storage::{
    build_folder_path, build_item_key, content_type_for_extension, resolve_extension, FolderPath,
    ImageUploader,
};
use serde_json::Value;

/// A batch whose envelope passed validation. Running it cannot fail as a whole.
#[derive(Debug)]
pub struct PreparedBatch {
    identity: ReportIdentity,
    folder: FolderPath,
    items: Vec<Value>,
}

#[derive(Clone)]
pub struct BatchUploadService {
    uploader: ImageUploader,
    concurrency: usize,
}

impl BatchUploadService {
    /// `concurrency` is the number of in-flight uploads per batch; 1 is strictly sequential.
    pub fn new(uploader: ImageUploader, concurrency: usize) -> Self {
        Self {
            uploader,
            concurrency: concurrency.max(1),
        }
    }

    /// Validate the envelope and derive the shared folder path.
    pub fn prepare(&self, request: BatchUploadRequest) -> Result<PreparedBatch, AppError> {
        let items = match request.screenshots {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => {
                return Err(AppError::BadRequest(
                    "Screenshots array is required and must not be empty".to_string(),
                ))
            }
        };

        if items.len() > MAX_BATCH_SIZE {
            return Err(AppError::BadRequest(format!(
                "Maximum {} screenshots allowed per batch, got {}",
                MAX_BATCH_SIZE,
                items.len()
            )));
        }

        let identity = SanitizedIdentity::from_raw(
            request.mobile_number.as_deref(),
            request.inspection_uuid.as_deref(),
            request.prdp_uuid.as_deref(),
        );
        let journey_type = request.journey_type.as_deref().and_then(JourneyType::parse);

        let folder = build_folder_path(&identity, journey_type)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let report_identity = ReportIdentity {
            folder_path: folder.to_string(),
            inspection_uuid: identity.inspection().unwrap_or_default().to_string(),
            prdp_uuid: identity.prdp().map(String::from),
            mobile_number: identity.mobile_token,
            journey_type: request.journey_type,
        };

        Ok(PreparedBatch {
            identity: report_identity,
            folder,
            items,
        })
    }

    /// Upload every item and fold the outcomes into a report.
    ///
    /// Outcomes come back in input order whatever the concurrency, and one item's
    /// failure never affects another.
    pub async fn run(&self, batch: PreparedBatch) -> BatchReport {
        let start = Instant::now();
        let PreparedBatch {
            identity,
            folder,
            items,
        } = batch;

        tracing::info!(
            folder_path = %folder,
            total = items.len(),
            concurrency = self.concurrency,
            "Batch upload started"
        );

        let results: Vec<UploadOutcome> = stream::iter(items.into_iter().enumerate())
            .map(|(index, item)| self.process_item(&folder, index, item))
            .buffered(self.concurrency)
            .collect()
            .await;

        for outcome in &results {
            match (&outcome.key, &outcome.error) {
                (Some(key), _) => tracing::info!(
                    index = outcome.index,
                    key = %key,
                    size_bytes = outcome.size.unwrap_or_default(),
                    "Screenshot uploaded"
                ),
                (None, error) => tracing::warn!(
                    index = outcome.index,
                    filename = %outcome.filename,
                    error = error.as_deref().unwrap_or_default(),
                    "Screenshot failed"
                ),
            }
        }

        let report = BatchReport::from_outcomes(identity, results, start.elapsed());

        tracing::info!(
            folder_path = %report.folder_path,
            successful = report.successful,
            failed = report.failed,
            duration = %report.duration,
            avg_time_per_file = %report.avg_time_per_file,
            "Batch upload finished"
        );

        report
    }

    /// `prepare` followed by `run`.
    pub async fn process_batch(&self, request: BatchUploadRequest) -> Result<BatchReport, AppError> {
        let batch = self.prepare(request)?;
        Ok(self.run(batch).await)
    }

    async fn process_item(&self, folder: &FolderPath, index: usize, item: Value) -> UploadOutcome {
        let item = &item;
        let screenshot = match validate_item(item, index) {
            Ok(screenshot) => screenshot,
            Err(e) => return UploadOutcome::failed(index, raw_filename(item), e.to_string()),
        };

        let data = match decode_image(screenshot.image) {
            Ok(data) => data,
            Err(e) => {
                return UploadOutcome::failed(index, screenshot.filename.to_string(), e.to_string())
            }
        };

        let extension = resolve_extension(screenshot.extension);
        let key = build_item_key(folder, screenshot.filename, Some(extension));
        let content_type = content_type_for_extension(extension);

        match self.uploader.upload(&key, data, &content_type).await {
            Ok(receipt) => UploadOutcome::success(
                index,
                format!("{}.{}", screenshot.filename, extension),
                receipt.key,
                receipt.size,
            ),
            Err(e) => UploadOutcome::failed(index, screenshot.filename.to_string(), e.to_string()),
        }
    }
}
