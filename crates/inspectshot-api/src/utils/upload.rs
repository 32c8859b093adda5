//! Common utilities for file upload handlers

use std::collections::HashMap;

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use inspectshot_core::AppError;

/// Parsed multipart upload: text fields plus exactly one `file` part.
#[derive(Debug)]
pub struct UploadForm {
    pub fields: HashMap<String, String>,
    pub file_data: Vec<u8>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

impl UploadForm {
    /// Non-empty text field value
    pub fn field(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .filter(|value| !value.is_empty())
            .cloned()
    }
}

/// Body-limit failures surface as 413; everything else is a malformed form.
fn multipart_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(
            "Request body exceeds the configured size limit".to_string(),
        );
    }
    AppError::InvalidInput(format!("{}: {}", context, err))
}

/// Extract the `file` part and all text fields from a multipart form.
/// Only one field named "file" is accepted; multiple file fields are rejected.
pub async fn extract_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut fields = HashMap::new();
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Failed to read multipart", e))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == "file" {
            if file_data.is_some() {
                return Err(AppError::InvalidInput(
                    "Multiple file fields are not allowed; send exactly one field named 'file'"
                        .to_string(),
                ));
            }
            file_name = field.file_name().map(|s: &str| s.to_string());
            content_type = field.content_type().map(|s: &str| s.to_string());

            let data = field
                .bytes()
                .await
                .map_err(|e| multipart_error("Failed to read file data", e))?;

            file_data = Some(data.to_vec());
        } else if !field_name.is_empty() {
            let value = field.text().await.map_err(|e| {
                multipart_error(&format!("Failed to read field {}", field_name), e)
            })?;
            fields.insert(field_name, value);
        }
    }

    let file_data =
        file_data.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;

    Ok(UploadForm {
        fields,
        file_data,
        file_name,
        content_type,
    })
}
