//! Configuration validation
//!
//! `Config` already rejects missing or out-of-range values when it is loaded. This pass
//! re-checks them at startup and warns about settings that are legal but risky.

use anyhow::Result;
use inspectshot_core::{Config, StorageBackend};

pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    let is_production = config.is_production();

    if is_production && config.storage_backend() == StorageBackend::Local {
        tracing::warn!("Local filesystem storage in production - objects are not replicated");
    }

    if config.s3_endpoint().is_some_and(|e| e.starts_with("http://")) {
        tracing::warn!(
            endpoint = config.s3_endpoint().unwrap_or_default(),
            "S3 endpoint uses plain HTTP"
        );
    }

    if config.upload_timeout_secs().is_none() {
        tracing::debug!("No per-item upload timeout configured; puts wait for the backend");
    }

    if config.batch_upload_concurrency() > 1 {
        tracing::info!(
            concurrency = config.batch_upload_concurrency(),
            "Batch uploads run concurrently; outcomes are still reported in input order"
        );
    }

    tracing::info!("Configuration validation passed");
    Ok(())
}
