//! API constants

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "inspectshot";

/// Route paths
pub const HEALTH_PATH: &str = "/health";
pub const UPLOAD_BATCH_PATH: &str = "/upload-batch";
pub const UPLOAD_PATH: &str = "/upload";
pub const UPLOAD_MULTIPART_PATH: &str = "/upload-multipart";
pub const UPLOAD_BINARY_PATH: &str = "/upload-binary";
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";
