//! Single-object upload on top of a [`Storage`] backend.
//!
//! One put per call, no retries. An optional timeout bounds each put; on expiry the
//! put future is dropped and the call fails with [`UploadError::TimedOut`].

use crate::traits::{Storage, StorageError};
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Upload timed out after {}s", .0.as_secs())]
    TimedOut(Duration),
}

/// Result of a successful put.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub key: String,
    pub url: String,
    pub size: usize,
}

#[derive(Clone)]
pub struct ImageUploader {
    storage: Arc<dyn Storage>,
    timeout: Option<Duration>,
}

impl ImageUploader {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Store `data` under `key` with the given content type.
    pub async fn upload(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<UploadReceipt, UploadError> {
        let size = data.len();
        let put = self
            .storage
            .upload_with_key(key, Bytes::from(data), content_type);

        let url = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, put)
                .await
                .map_err(|_| UploadError::TimedOut(limit))??,
            None => put.await?,
        };

        tracing::debug!(key = %key, size_bytes = size, "Image stored");

        Ok(UploadReceipt {
            key: key.to_string(),
            url,
            size,
        })
    }
}
