//! Content type resolution for stored images

/// Resolve the MIME type for an image extension.
///
/// Known extensions map through a fixed table (case-insensitive); anything else becomes
/// `image/{extension}`.
pub fn content_type_for_extension(extension: &str) -> String {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        "png" => "image/png".to_string(),
        "gif" => "image/gif".to_string(),
        "webp" => "image/webp".to_string(),
        _ => format!("image/{}", extension),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(content_type_for_extension("jpg"), "image/jpeg");
        assert_eq!(content_type_for_extension("JPEG"), "image/jpeg");
        assert_eq!(content_type_for_extension("png"), "image/png");
        assert_eq!(content_type_for_extension("gif"), "image/gif");
        assert_eq!(content_type_for_extension("webp"), "image/webp");
    }

    #[test]
    fn test_unknown_extension_falls_back() {
        assert_eq!(content_type_for_extension("tiff"), "image/tiff");
        assert_eq!(content_type_for_extension("heic"), "image/heic");
    }
}
