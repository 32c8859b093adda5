//! Single-image upload models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::batch::{deserialize_loose_string, deserialize_string_only, format_kib};

/// JSON body for `POST /upload`: one base64 image plus the batch identifiers.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SingleUploadRequest {
    #[serde(default, deserialize_with = "deserialize_string_only")]
    pub mobile_number: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub inspection_uuid: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub prdp_uuid: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_only")]
    pub journey_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_only")]
    pub filename: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_only")]
    pub extension: Option<String>,
    /// Base64 payload, optionally as a `data:` URL
    #[serde(default, deserialize_with = "deserialize_string_only")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SingleUploadResponse {
    pub message: String,
    pub bucket: String,
    pub key: String,
    pub url: String,
    pub content_type: String,
    pub size: usize,
    #[serde(rename = "sizeKB")]
    pub size_kb: String,
}

impl SingleUploadResponse {
    pub fn new(
        bucket: impl Into<String>,
        key: String,
        url: String,
        content_type: String,
        size: usize,
    ) -> Self {
        Self {
            message: "Image uploaded successfully".to_string(),
            bucket: bucket.into(),
            key,
            url,
            content_type,
            size,
            size_kb: format_kib(size),
        }
    }
}
