use serde_json::Value;

/// Fallback filename reported for entries without a usable one.
const UNKNOWN_FILENAME: &str = "unknown";

/// Per-item failures. None of these abort a batch.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ItemError {
    #[error("Screenshot at index {0} is not an object")]
    NotAnObject(usize),

    #[error("Screenshot at index {0} missing filename")]
    MissingFilename(usize),

    #[error("Screenshot at index {0} missing image data")]
    MissingImageData(usize),

    #[error("Invalid base64 data: {0}")]
    InvalidBase64(String),

    #[error("Empty image data")]
    EmptyImage,
}

/// A screenshot entry that passed shape validation, borrowing from the request body.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenshotItem<'a> {
    pub filename: &'a str,
    pub extension: Option<&'a str>,
    /// Caller-supplied, passed through unvalidated
    pub timestamp: Option<f64>,
    pub image: &'a str,
}

/// Validate one entry of `screenshots`. Checks run in order and the first failure wins:
/// the entry must be an object, `filename` a non-empty string, `image` a non-empty string.
///
/// `extension` is used only when it is a string. The payload itself is not inspected here.
pub fn validate_item(item: &Value, index: usize) -> Result<ScreenshotItem<'_>, ItemError> {
    let Some(fields) = item.as_object() else {
        return Err(ItemError::NotAnObject(index));
    };

    let filename = fields
        .get("filename")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or(ItemError::MissingFilename(index))?;

    let image = fields
        .get("image")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or(ItemError::MissingImageData(index))?;

    Ok(ScreenshotItem {
        filename,
        extension: fields.get("extension").and_then(Value::as_str),
        timestamp: fields.get("timestamp").and_then(Value::as_f64),
        image,
    })
}

/// Filename to report for an entry that failed: its raw `filename` when that is a
/// string, `"unknown"` otherwise.
pub fn raw_filename(item: &Value) -> String {
    item.get("filename")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_FILENAME)
        .to_string()
}
