//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p inspectshot-api`.

#![allow(dead_code)]

pub mod storage;

use axum_test::TestServer;
use base64::{engine::general_purpose::STANDARD, Engine};
use inspectshot_api::setup::routes;
use inspectshot_api::state::AppState;
use inspectshot_core::Config;
use std::collections::HashMap;
use std::sync::Arc;

pub use storage::RecordingStorage;

pub const TEST_BUCKET: &str = "test-inspection-bucket";

/// Test application: server plus the storage it writes to.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<RecordingStorage>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Configuration for an S3 deployment with fake credentials; `overrides` replace or add
/// variables.
pub fn create_test_config(overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = [
        ("STORAGE_BACKEND", "s3"),
        ("S3_BUCKET", TEST_BUCKET),
        ("S3_REGION", "ap-south-1"),
        ("AWS_ACCESS_KEY_ID", "AKIATESTKEY"),
        ("AWS_SECRET_ACCESS_KEY", "test-secret"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }

    Config::from_lookup(move |key: &str| vars.get(key).cloned()).expect("valid test config")
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(RecordingStorage::default(), &[]).await
}

pub async fn setup_test_app_with(storage: RecordingStorage, overrides: &[(&str, &str)]) -> TestApp {
    let config = create_test_config(overrides);
    let storage = Arc::new(storage);
    let state = Arc::new(AppState::new(&config, storage.clone()));

    let app = routes::setup_routes(&config, state)
        .await
        .expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp { server, storage }
}

pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// App backed by the real local filesystem storage under `dir`.
pub async fn setup_local_test_app(dir: &std::path::Path) -> TestServer {
    let path = dir.to_string_lossy().to_string();
    let config = create_test_config(&[
        ("STORAGE_BACKEND", "local"),
        ("LOCAL_STORAGE_PATH", path.as_str()),
        ("LOCAL_STORAGE_BASE_URL", "http://localhost:3000/media"),
    ]);
    let storage = inspectshot_storage::create_storage(&config)
        .await
        .expect("Failed to create local storage");
    let state = Arc::new(AppState::new(&config, storage));

    let app = routes::setup_routes(&config, state)
        .await
        .expect("Failed to setup routes");
    TestServer::new(app.into_make_service()).expect("Failed to create test server")
}
