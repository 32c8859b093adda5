//! In-memory storage that records every put.

use async_trait::async_trait;
use bytes::Bytes;
use inspectshot_core::StorageBackend;
use inspectshot_storage::{Storage, StorageError, StorageResult};
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct RecordedPut {
    pub key: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Default)]
pub struct RecordingStorage {
    puts: Mutex<Vec<RecordedPut>>,
    /// Puts whose key contains this fragment fail with a backend error
    fail_on: Option<String>,
    /// Puts whose key contains this fragment panic mid-upload
    panic_on: Option<String>,
}

impl RecordingStorage {
    pub fn failing_on(fragment: &str) -> Self {
        Self {
            fail_on: Some(fragment.to_string()),
            ..Default::default()
        }
    }

    pub fn panicking_on(fragment: &str) -> Self {
        Self {
            panic_on: Some(fragment.to_string()),
            ..Default::default()
        }
    }

    pub fn puts(&self) -> Vec<RecordedPut> {
        self.puts.lock().unwrap().clone()
    }

    pub fn put_count(&self) -> usize {
        self.puts.lock().unwrap().len()
    }
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<String> {
        if let Some(fragment) = &self.panic_on {
            if storage_key.contains(fragment.as_str()) {
                panic!("storage client crashed on {}", storage_key);
            }
        }
        if let Some(fragment) = &self.fail_on {
            if storage_key.contains(fragment.as_str()) {
                return Err(StorageError::UploadFailed(
                    "AccessDenied: Access Denied".to_string(),
                ));
            }
        }
        self.puts.lock().unwrap().push(RecordedPut {
            key: storage_key.to_string(),
            content_type: content_type.to_string(),
            data: data.to_vec(),
        });
        Ok(format!(
            "https://test-inspection-bucket.s3.ap-south-1.amazonaws.com/{}",
            storage_key
        ))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
