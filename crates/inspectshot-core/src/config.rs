//! Configuration module
//!
//! Configuration is read once at startup, validated, and then handed by value to the
//! storage factory and application state. Nothing reads the environment after that.

use std::env;

use crate::storage_types::StorageBackend;

// Common constants
const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_MAX_BODY_SIZE_MB: usize = 50;
const DEFAULT_BATCH_UPLOAD_CONCURRENCY: usize = 1;
const MAX_BATCH_UPLOAD_CONCURRENCY: usize = 32;

/// HTTP-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub max_body_size_bytes: usize,
    pub log_format: String,
}

/// Upload service configuration
#[derive(Clone, Debug)]
pub struct UploadServiceConfig {
    pub base: BaseConfig,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, Spaces, ...)
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    // Batch pipeline
    pub batch_upload_concurrency: usize,
    pub upload_timeout_secs: Option<u64>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<UploadServiceConfig>);

impl Config {
    fn inner(&self) -> &UploadServiceConfig {
        &self.0
    }

    /// Load `.env` (if any) and then read the process environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup and validate it.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = UploadServiceConfig::from_lookup(lookup)?;
        config.validate()?;
        Ok(Config(Box::new(config)))
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.inner().base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn max_body_size_bytes(&self) -> usize {
        self.inner().base.max_body_size_bytes
    }

    pub fn log_format(&self) -> &str {
        &self.inner().base.log_format
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.inner().storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.inner().s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.inner().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.inner().s3_endpoint.as_deref()
    }

    pub fn aws_access_key_id(&self) -> Option<&str> {
        self.inner().aws_access_key_id.as_deref()
    }

    pub fn aws_secret_access_key(&self) -> Option<&str> {
        self.inner().aws_secret_access_key.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.inner().local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.inner().local_storage_base_url.as_deref()
    }

    pub fn batch_upload_concurrency(&self) -> usize {
        self.inner().batch_upload_concurrency
    }

    pub fn upload_timeout_secs(&self) -> Option<u64> {
        self.inner().upload_timeout_secs
    }
}

/// First non-empty value among `keys`.
fn first_set<F>(lookup: &F, keys: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    keys.iter()
        .filter_map(|key| lookup(key))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

fn parse_or<F, T>(lookup: &F, keys: &[&str], default: T) -> Result<T, anyhow::Error>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match first_set(lookup, keys) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: {} ({})", keys[0], raw, e)),
        None => Ok(default),
    }
}

impl UploadServiceConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = first_set(&lookup, &["ENVIRONMENT", "APP_ENV"])
            .unwrap_or_else(|| "development".to_string());

        let cors_origins: Vec<String> = first_set(&lookup, &["CORS_ORIGINS"])
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_body_size_mb: usize =
            parse_or(&lookup, &["MAX_BODY_SIZE_MB"], DEFAULT_MAX_BODY_SIZE_MB)?;
        let max_body_size_bytes = max_body_size_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| {
                anyhow::anyhow!("MAX_BODY_SIZE_MB is too large: {}", max_body_size_mb)
            })?;

        let base = BaseConfig {
            server_port: parse_or(&lookup, &["PORT", "SERVER_PORT"], DEFAULT_SERVER_PORT)?,
            cors_origins,
            environment,
            max_body_size_bytes,
            log_format: first_set(&lookup, &["LOG_FORMAT"]).unwrap_or_else(|| "text".to_string()),
        };

        let storage_backend = match first_set(&lookup, &["STORAGE_BACKEND"]) {
            Some(raw) => raw.parse::<StorageBackend>()?,
            None => StorageBackend::S3,
        };

        let upload_timeout_secs = match first_set(&lookup, &["UPLOAD_TIMEOUT_SECS"]) {
            Some(raw) => Some(raw.parse::<u64>().map_err(|e| {
                anyhow::anyhow!("Invalid value for UPLOAD_TIMEOUT_SECS: {} ({})", raw, e)
            })?),
            None => None,
        };

        Ok(UploadServiceConfig {
            base,
            storage_backend,
            s3_bucket: first_set(&lookup, &["S3_BUCKET", "AWS_S3_BUCKET", "S3_BUCKET_NAME"]),
            s3_region: first_set(&lookup, &["S3_REGION", "AWS_REGION"]),
            s3_endpoint: first_set(&lookup, &["S3_ENDPOINT"]),
            aws_access_key_id: first_set(&lookup, &["AWS_ACCESS_KEY_ID"]),
            aws_secret_access_key: first_set(&lookup, &["AWS_SECRET_ACCESS_KEY"]),
            local_storage_path: first_set(&lookup, &["LOCAL_STORAGE_PATH"]),
            local_storage_base_url: first_set(&lookup, &["LOCAL_STORAGE_BASE_URL"]),
            batch_upload_concurrency: parse_or(
                &lookup,
                &["BATCH_UPLOAD_CONCURRENCY"],
                DEFAULT_BATCH_UPLOAD_CONCURRENCY,
            )?,
            upload_timeout_secs,
        })
    }

    /// Fail fast on anything that would only surface on the first upload.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let env = self.base.environment.to_lowercase();
        let is_production = env == "production" || env == "prod";
        if is_production && self.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.base.max_body_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_BODY_SIZE_MB cannot be 0"));
        }

        if self.batch_upload_concurrency == 0
            || self.batch_upload_concurrency > MAX_BATCH_UPLOAD_CONCURRENCY
        {
            return Err(anyhow::anyhow!(
                "BATCH_UPLOAD_CONCURRENCY must be between 1 and {}",
                MAX_BATCH_UPLOAD_CONCURRENCY
            ));
        }

        if self.upload_timeout_secs == Some(0) {
            return Err(anyhow::anyhow!("UPLOAD_TIMEOUT_SECS cannot be 0"));
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                let missing: Vec<&str> = [
                    ("S3_BUCKET", self.s3_bucket.is_none()),
                    ("S3_REGION or AWS_REGION", self.s3_region.is_none()),
                    ("AWS_ACCESS_KEY_ID", self.aws_access_key_id.is_none()),
                    ("AWS_SECRET_ACCESS_KEY", self.aws_secret_access_key.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, is_missing)| is_missing.then_some(name))
                .collect();

                if !missing.is_empty() {
                    return Err(anyhow::anyhow!(
                        "Missing required S3 configuration: {}",
                        missing.join(", ")
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when STORAGE_BACKEND=local"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when STORAGE_BACKEND=local"
                    ));
                }
            }
        }

        Ok(())
    }
}
