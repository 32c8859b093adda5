//! Shared key generation for storage backends.
//!
//! Folder layout: `{mobile}/{inspection}/{child}` where `child` is the PRDP token for
//! `PRE_INSPECTION_PRDP` journeys that carry one, and the inspection token otherwise.
//! Object keys append `{filename}.{extension}`. Duplicate filenames inside one folder
//! map to the same key; the last write wins.

use std::fmt;

use inspectshot_core::constants::DEFAULT_EXTENSION;
use inspectshot_core::models::JourneyType;
use inspectshot_core::SanitizedIdentity;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("Inspection UUID is required")]
    MissingInspectionUuid,
}

/// Three-segment folder shared by every object of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderPath(String);

impl FolderPath {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FolderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the folder for a request from its sanitized identity.
pub fn build_folder_path(
    identity: &SanitizedIdentity,
    journey_type: Option<JourneyType>,
) -> Result<FolderPath, KeyError> {
    let inspection = identity
        .inspection()
        .ok_or(KeyError::MissingInspectionUuid)?;

    let child = match (journey_type, identity.prdp()) {
        (Some(JourneyType::PreInspectionPrdp), Some(prdp)) => prdp,
        _ => inspection,
    };

    Ok(FolderPath(format!(
        "{}/{}/{}",
        identity.mobile_token, inspection, child
    )))
}

/// Extension to use for an item: the given one when non-empty, `jpg` otherwise.
pub fn resolve_extension(extension: Option<&str>) -> &str {
    extension
        .filter(|ext| !ext.is_empty())
        .unwrap_or(DEFAULT_EXTENSION)
}

/// Object key for one item inside `folder`.
pub fn build_item_key(folder: &FolderPath, filename: &str, extension: Option<&str>) -> String {
    format!(
        "{}/{}.{}",
        folder.as_str(),
        filename,
        resolve_extension(extension)
    )
}
