//! Batch upload request and report models

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Selects which identifier becomes the child folder of the key namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JourneyType {
    PreInspection,
    PreInspectionPrdp,
}

impl JourneyType {
    /// Parse the wire value. Unrecognized values yield `None` and behave like
    /// `PRE_INSPECTION` when choosing the child folder.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "PRE_INSPECTION" => Some(JourneyType::PreInspection),
            "PRE_INSPECTION_PRDP" => Some(JourneyType::PreInspectionPrdp),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JourneyType::PreInspection => "PRE_INSPECTION",
            JourneyType::PreInspectionPrdp => "PRE_INSPECTION_PRDP",
        }
    }
}

/// Accept a string identifier, coercing scalars the way loosely-typed mobile clients
/// send them. `null`, `false`, `0` and structured values are treated as absent.
pub fn deserialize_loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Bool(true)) => Some("true".to_string()),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    })
}

/// Accept only string values; anything else is treated as absent.
pub fn deserialize_string_only<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Inbound batch request. Everything is untrusted; screenshots are kept as raw JSON so
/// each entry can be validated (and fail) on its own.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchUploadRequest {
    #[serde(default, deserialize_with = "deserialize_string_only")]
    pub mobile_number: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub inspection_uuid: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_string")]
    pub prdp_uuid: Option<String>,
    /// `PRE_INSPECTION` or `PRE_INSPECTION_PRDP`
    #[serde(default, deserialize_with = "deserialize_string_only")]
    pub journey_type: Option<String>,
    /// Ordered screenshot entries: `{filename, extension?, timestamp?, image}`
    #[serde(default)]
    #[schema(value_type = Option<Vec<Object>>)]
    pub screenshots: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Failed,
}

/// Result of one screenshot. Created once, never mutated.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadOutcome {
    pub index: usize,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(rename = "sizeKB", skip_serializing_if = "Option::is_none")]
    pub size_kb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadOutcome {
    pub fn success(index: usize, filename: String, key: String, size: usize) -> Self {
        Self {
            index,
            filename,
            key: Some(key),
            status: OutcomeStatus::Success,
            size: Some(size),
            size_kb: Some(format_kib(size)),
            error: None,
        }
    }

    pub fn failed(index: usize, filename: String, error: impl Into<String>) -> Self {
        Self {
            index,
            filename,
            key: None,
            status: OutcomeStatus::Failed,
            size: None,
            size_kb: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}

/// Aggregate of one batch, serialized once when the batch finishes.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub folder_path: String,
    pub mobile_number: String,
    pub inspection_uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prdp_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journey_type: Option<String>,
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<UploadOutcome>,
    /// Wall-clock time of the whole batch, e.g. `"412ms"`
    pub duration: String,
    /// `duration / total`, two decimals, e.g. `"137.33ms"`
    pub avg_time_per_file: String,
}

/// Identifiers echoed back in the report.
#[derive(Debug, Clone)]
pub struct ReportIdentity {
    pub folder_path: String,
    pub mobile_number: String,
    pub inspection_uuid: String,
    pub prdp_uuid: Option<String>,
    pub journey_type: Option<String>,
}

impl BatchReport {
    /// Fold per-item outcomes (already in input order) into the aggregate report.
    pub fn from_outcomes(
        identity: ReportIdentity,
        results: Vec<UploadOutcome>,
        elapsed: Duration,
    ) -> Self {
        let total = results.len();
        let successful = results.iter().filter(|o| o.is_success()).count();
        let elapsed_ms = elapsed.as_millis();
        let avg_ms = if total == 0 {
            0.0
        } else {
            elapsed.as_secs_f64() * 1000.0 / total as f64
        };

        Self {
            folder_path: identity.folder_path,
            mobile_number: identity.mobile_number,
            inspection_uuid: identity.inspection_uuid,
            prdp_uuid: identity.prdp_uuid,
            journey_type: identity.journey_type,
            total,
            successful,
            failed: total - successful,
            results,
            duration: format!("{}ms", elapsed_ms),
            avg_time_per_file: format!("{:.2}ms", avg_ms),
        }
    }

    pub fn any_succeeded(&self) -> bool {
        self.successful > 0
    }

    pub fn summary(&self) -> String {
        format!(
            "Batch upload completed: {} successful, {} failed",
            self.successful, self.failed
        )
    }
}

/// Response body for `POST /upload-batch`, returned with 200 or 500.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchUploadResponse {
    pub message: String,
    pub bucket: String,
    #[serde(flatten)]
    pub report: BatchReport,
}

impl BatchUploadResponse {
    pub fn new(report: BatchReport, bucket: impl Into<String>) -> Self {
        Self {
            message: report.summary(),
            bucket: bucket.into(),
            report,
        }
    }
}

/// Size in KiB rounded to two decimals.
pub fn format_kib(bytes: usize) -> String {
    format!("{:.2}", bytes as f64 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn identity() -> ReportIdentity {
        ReportIdentity {
            folder_path: "555/insp-1/insp-1".to_string(),
            mobile_number: "555".to_string(),
            inspection_uuid: "insp-1".to_string(),
            prdp_uuid: None,
            journey_type: Some("PRE_INSPECTION".to_string()),
        }
    }

    #[test]
    fn test_journey_type_parse() {
        assert_eq!(
            JourneyType::parse("PRE_INSPECTION_PRDP"),
            Some(JourneyType::PreInspectionPrdp)
        );
        assert_eq!(
            JourneyType::parse("PRE_INSPECTION"),
            Some(JourneyType::PreInspection)
        );
        assert_eq!(JourneyType::parse("pre_inspection_prdp"), None);
    }

    #[test]
    fn test_request_coerces_loose_identifiers() {
        let request: BatchUploadRequest = serde_json::from_value(json!({
            "mobileNumber": 9876543210u64,
            "inspectionUuid": 12345,
            "prdpUuid": false,
            "journeyType": "PRE_INSPECTION_PRDP",
            "screenshots": []
        }))
        .unwrap();

        assert_eq!(request.mobile_number, None);
        assert_eq!(request.inspection_uuid.as_deref(), Some("12345"));
        assert_eq!(request.prdp_uuid, None);
        assert_eq!(request.journey_type.as_deref(), Some("PRE_INSPECTION_PRDP"));
        assert_eq!(request.screenshots, Some(json!([])));
    }

    #[test]
    fn test_request_missing_fields_default_to_none() {
        let request: BatchUploadRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.inspection_uuid.is_none());
        assert!(request.screenshots.is_none());
    }

    #[test]
    fn test_report_counts_and_timing() {
        let results = vec![
            UploadOutcome::success(0, "a.jpg".into(), "k/a.jpg".into(), 2048),
            UploadOutcome::failed(1, "b".into(), "Empty image data"),
            UploadOutcome::success(2, "c.png".into(), "k/c.png".into(), 1000),
        ];
        let report = BatchReport::from_outcomes(identity(), results, Duration::from_millis(300));

        assert_eq!(report.total, 3);
        assert_eq!(report.successful, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.duration, "300ms");
        assert_eq!(report.avg_time_per_file, "100.00ms");
        assert_eq!(report.results[0].size_kb.as_deref(), Some("2.00"));
        assert_eq!(report.results[2].size_kb.as_deref(), Some("0.98"));
        assert!(report.any_succeeded());
    }

    #[test]
    fn test_response_serialization_shape() {
        let results = vec![UploadOutcome::failed(0, "x".into(), "Invalid base64 data: bad")];
        let report = BatchReport::from_outcomes(identity(), results, Duration::from_millis(5));
        let body = serde_json::to_value(BatchUploadResponse::new(report, "photos")).unwrap();

        assert_eq!(body["message"], "Batch upload completed: 0 successful, 1 failed");
        assert_eq!(body["bucket"], "photos");
        assert_eq!(body["folderPath"], "555/insp-1/insp-1");
        assert_eq!(body["successful"], 0);
        assert_eq!(body["avgTimePerFile"], "5.00ms");
        assert_eq!(body["results"][0]["status"], "failed");
        assert!(body["results"][0].get("key").is_none());
        assert!(body.get("prdpUuid").is_none());
    }

    #[test]
    fn test_empty_report_average_is_zero() {
        let report = BatchReport::from_outcomes(identity(), vec![], Duration::from_millis(7));
        assert_eq!(report.avg_time_per_file, "0.00ms");
        assert!(!report.any_succeeded());
    }
}
