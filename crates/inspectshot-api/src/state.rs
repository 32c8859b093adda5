use std::sync::Arc;
use std::time::Duration;

use inspectshot_core::{Config, StorageBackend};
use inspectshot_storage::{ImageUploader, Storage};

use crate::services::batch_upload::BatchUploadService;

/// Storage metadata echoed in responses and the health check.
#[derive(Clone, Debug)]
pub struct StorageInfo {
    /// Bucket name for S3, base directory for the local backend
    pub bucket: String,
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub backend: StorageBackend,
}

impl StorageInfo {
    pub fn from_config(config: &Config, backend: StorageBackend) -> Self {
        let bucket = match backend {
            StorageBackend::S3 => config.s3_bucket(),
            StorageBackend::Local => config.local_storage_path(),
        };
        Self {
            bucket: bucket.unwrap_or_default().to_string(),
            region: config.s3_region().map(String::from),
            endpoint: config.s3_endpoint().map(String::from),
            backend,
        }
    }
}

/// Shared application state. Built once at startup and read-only afterwards.
pub struct AppState {
    pub uploader: ImageUploader,
    pub storage_info: StorageInfo,
    pub batch_service: BatchUploadService,
}

impl AppState {
    pub fn new(config: &Config, storage: Arc<dyn Storage>) -> Self {
        let storage_info = StorageInfo::from_config(config, storage.backend_type());
        let uploader = ImageUploader::new(storage)
            .with_timeout(config.upload_timeout_secs().map(Duration::from_secs));
        let batch_service =
            BatchUploadService::new(uploader.clone(), config.batch_upload_concurrency());

        Self {
            uploader,
            storage_info,
            batch_service,
        }
    }
}
