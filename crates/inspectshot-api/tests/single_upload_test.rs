//! Single-image upload API integration tests.
//!
//! Run with: `cargo test -p inspectshot-api --test single_upload_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{encode, setup_test_app, setup_test_app_with, RecordingStorage, TEST_BUCKET};
use serde_json::{json, Value};

#[tokio::test]
async fn test_json_upload() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload")
        .json(&json!({
            "mobileNumber": "555 0101",
            "inspectionUuid": "insp-1",
            "filename": "odometer",
            "extension": "webp",
            "image": format!("data:image/webp;base64,{}", encode(b"RIFFwebp")),
        }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Image uploaded successfully");
    assert_eq!(body["bucket"], TEST_BUCKET);
    assert_eq!(body["key"], "555_0101/insp-1/insp-1/odometer.webp");
    assert_eq!(body["contentType"], "image/webp");
    assert_eq!(body["size"], 8);

    let puts = app.storage.puts();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].data, b"RIFFwebp");
}

#[tokio::test]
async fn test_json_upload_validation_errors() {
    let app = setup_test_app().await;

    let cases = [
        json!({"filename": "a", "image": encode(b"x")}),
        json!({"inspectionUuid": "insp-1", "image": encode(b"x")}),
        json!({"inspectionUuid": "insp-1", "filename": "a"}),
        json!({"inspectionUuid": "insp-1", "filename": "a", "image": "@@@"}),
    ];
    for body in cases {
        let response = app.client().post("/upload").json(&body).await;
        assert_eq!(response.status_code(), 400, "body: {}", body);
    }
    assert_eq!(app.storage.put_count(), 0);
}

#[tokio::test]
async fn test_json_upload_storage_failure() {
    let app = setup_test_app_with(RecordingStorage::failing_on("insp-1"), &[]).await;

    let response = app
        .client()
        .post("/upload")
        .json(&json!({"inspectionUuid": "insp-1", "filename": "a", "image": encode(b"x")}))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"], "Failed to store image");
    assert_eq!(body["code"], "STORAGE_ERROR");
}

#[tokio::test]
async fn test_multipart_upload_defaults_from_file_name() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_text("inspectionUuid", "insp-1")
        .add_text("prdpUuid", "prdp-2")
        .add_text("journeyType", "PRE_INSPECTION_PRDP")
        .add_part(
            "file",
            Part::bytes(b"\x89PNG".to_vec())
                .file_name("chassis.png")
                .mime_type("image/png"),
        );

    let response = app.client().post("/upload-multipart").multipart(form).await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["key"], "unknown/insp-1/prdp-2/chassis.png");
    assert_eq!(body["contentType"], "image/png");
}

#[tokio::test]
async fn test_multipart_upload_requires_file() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_text("inspectionUuid", "insp-1");
    let response = app.client().post("/upload-multipart").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "No file provided");
}

#[tokio::test]
async fn test_binary_upload_uses_image_content_type_header() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload-binary")
        .add_query_param("inspectionUuid", "insp-1")
        .add_query_param("filename", "vin")
        .add_query_param("extension", "heic")
        .bytes(b"heic-bytes".to_vec().into())
        .content_type("image/heic")
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["key"], "unknown/insp-1/insp-1/vin.heic");
    assert_eq!(body["contentType"], "image/heic");
    assert_eq!(app.storage.puts()[0].data, b"heic-bytes");
}

#[tokio::test]
async fn test_binary_upload_falls_back_to_extension_table() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload-binary")
        .add_query_param("inspectionUuid", "insp-1")
        .add_query_param("filename", "vin")
        .bytes(b"jpeg-bytes".to_vec().into())
        .content_type("application/octet-stream")
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["key"], "unknown/insp-1/insp-1/vin.jpg");
    assert_eq!(body["contentType"], "image/jpeg");
}

#[tokio::test]
async fn test_body_over_limit_is_rejected() {
    let app = setup_test_app_with(RecordingStorage::default(), &[("MAX_BODY_SIZE_MB", "1")]).await;

    let response = app
        .client()
        .post("/upload-binary")
        .add_query_param("inspectionUuid", "insp-1")
        .add_query_param("filename", "big")
        .bytes(vec![0u8; 2 * 1024 * 1024].into())
        .await;

    assert_eq!(response.status_code(), 413);
    assert_eq!(app.storage.put_count(), 0);
}
