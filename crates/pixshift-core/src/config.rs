//! Configuration module
//!
//! Configuration is read from the environment (optionally seeded from a `.env`
//! file) once at startup and validated before the server binds.

use std::env;
use std::str::FromStr;

use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 8080;
const HTTP_CONCURRENCY_LIMIT: usize = 1024;
const MAX_UPLOAD_SIZE_MB: usize = 10;
const LOCAL_STORAGE_PATH: &str = "images";
const MAX_IMAGE_DIMENSION: u32 = 10_000;
const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

/// When encoded outputs are handed to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitMode {
    /// Store every output as soon as it is encoded. Earlier writes survive a
    /// later failure in the same batch.
    #[default]
    Streaming,
    /// Hold outputs in memory and store them only once the whole batch succeeded.
    Buffered,
}

impl FromStr for CommitMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "streaming" => Ok(CommitMode::Streaming),
            "buffered" => Ok(CommitMode::Buffered),
            _ => Err(anyhow::anyhow!("Invalid batch commit mode: {}", s)),
        }
    }
}

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub log_format: LogFormat,
    pub http_concurrency_limit: usize,
    pub max_upload_size_bytes: usize,
}

impl Default for BaseConfig {
    fn default() -> Self {
        Self {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            log_format: LogFormat::Pretty,
            http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
            max_upload_size_bytes: MAX_UPLOAD_SIZE_MB * 1024 * 1024,
        }
    }
}

/// Pipeline and storage settings
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub base: BaseConfig,
    pub storage_backend: StorageBackend,
    pub local_storage_path: String,
    pub max_image_dimension: u32,
    pub default_jpeg_quality: u8,
    /// Unparseable numeric form fields become 0 instead of rejecting the request
    pub lenient_numeric_params: bool,
    /// Stage raw inputs under the `uploads` category before decoding
    pub keep_uploads: bool,
    pub commit_mode: CommitMode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base: BaseConfig::default(),
            storage_backend: StorageBackend::Local,
            local_storage_path: LOCAL_STORAGE_PATH.to_string(),
            max_image_dimension: MAX_IMAGE_DIMENSION,
            default_jpeg_quality: DEFAULT_JPEG_QUALITY,
            lenient_numeric_params: false,
            keep_uploads: false,
            commit_mode: CommitMode::Streaming,
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug, Default)]
pub struct Config(pub Box<PipelineConfig>);

impl Config {
    pub fn new(config: PipelineConfig) -> Self {
        Config(Box::new(config))
    }

    fn inner(&self) -> &PipelineConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = PipelineConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.inner().base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn log_format(&self) -> LogFormat {
        self.inner().base.log_format
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.inner().base.http_concurrency_limit
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.inner().base.max_upload_size_bytes
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.inner().storage_backend
    }

    pub fn local_storage_path(&self) -> &str {
        &self.inner().local_storage_path
    }

    pub fn max_image_dimension(&self) -> u32 {
        self.inner().max_image_dimension
    }

    pub fn default_jpeg_quality(&self) -> u8 {
        self.inner().default_jpeg_quality
    }

    pub fn lenient_numeric_params(&self) -> bool {
        self.inner().lenient_numeric_params
    }

    pub fn keep_uploads(&self) -> bool {
        self.inner().keep_uploads
    }

    pub fn commit_mode(&self) -> CommitMode {
        self.inner().commit_mode
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T, anyhow::Error>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: {} ({})", key, raw, e)),
        _ => Ok(default),
    }
}

fn env_bool(key: &str, default: bool) -> Result<bool, anyhow::Error> {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_lowercase().as_str() {
            "" => Ok(default),
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(anyhow::anyhow!("Invalid boolean for {}: {}", key, other)),
        },
        Err(_) => Ok(default),
    }
}

impl PipelineConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let max_upload_size_mb = env_parse("MAX_UPLOAD_SIZE_MB", MAX_UPLOAD_SIZE_MB)?;

        let base = BaseConfig {
            server_port: env_parse("SERVER_PORT", SERVER_PORT)?,
            environment,
            log_format: env_parse("LOG_FORMAT", LogFormat::Pretty)?,
            http_concurrency_limit: env_parse("HTTP_CONCURRENCY_LIMIT", HTTP_CONCURRENCY_LIMIT)?,
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
        };

        let config = PipelineConfig {
            base,
            storage_backend: env_parse("STORAGE_BACKEND", StorageBackend::Local)?,
            local_storage_path: env::var("LOCAL_STORAGE_PATH")
                .unwrap_or_else(|_| LOCAL_STORAGE_PATH.to_string()),
            max_image_dimension: env_parse("MAX_IMAGE_DIMENSION", MAX_IMAGE_DIMENSION)?,
            default_jpeg_quality: env_parse("DEFAULT_JPEG_QUALITY", DEFAULT_JPEG_QUALITY)?,
            lenient_numeric_params: env_bool("LENIENT_NUMERIC_PARAMS", false)?,
            keep_uploads: env_bool("KEEP_UPLOADS", false)?,
            commit_mode: env_parse("BATCH_COMMIT_MODE", CommitMode::Streaming)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.server_port == 0 {
            return Err(anyhow::anyhow!("SERVER_PORT must be greater than 0"));
        }

        if self.base.http_concurrency_limit == 0 {
            return Err(anyhow::anyhow!(
                "HTTP_CONCURRENCY_LIMIT must be greater than 0"
            ));
        }

        if self.base.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }

        if self.max_image_dimension == 0 {
            return Err(anyhow::anyhow!("MAX_IMAGE_DIMENSION must be greater than 0"));
        }

        if self.default_jpeg_quality > 100 {
            return Err(anyhow::anyhow!(
                "DEFAULT_JPEG_QUALITY must be between 0 and 100"
            ));
        }

        if self.storage_backend == StorageBackend::Local
            && self.local_storage_path.trim().is_empty()
        {
            return Err(anyhow::anyhow!(
                "LOCAL_STORAGE_PATH must be set when STORAGE_BACKEND=local"
            ));
        }

        Ok(())
    }
}
