//! Storage setup and initialization

use anyhow::{Context, Result};
use inspectshot_core::Config;
use inspectshot_storage::{create_storage, Storage};
use std::sync::Arc;

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!(backend = %config.storage_backend(), "Initializing storage...");

    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage backend")?;

    tracing::info!(
        backend = %storage.backend_type(),
        bucket = config.s3_bucket().unwrap_or_default(),
        region = config.s3_region().unwrap_or_default(),
        endpoint = config.s3_endpoint().unwrap_or("default"),
        "Storage initialized successfully"
    );

    Ok(storage)
}
