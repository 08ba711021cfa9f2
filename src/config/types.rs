//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_MAX_SIZE;
use crate::cache::worker::DEFAULT_POOL_SIZE;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Preview cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached previews
    #[serde(default = "default_max_size")]
    pub max_size: usize,
    /// Number of background fetch threads
    #[serde(default = "default_fetch_workers")]
    pub fetch_workers: usize,
}

pub fn default_max_size() -> usize {
    DEFAULT_MAX_SIZE
}

pub fn default_fetch_workers() -> usize {
    DEFAULT_POOL_SIZE
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_size(),
            fetch_workers: default_fetch_workers(),
        }
    }
}

/// Embedded viewer chrome, encoded into every display reference
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Show the viewer toolbar
    #[serde(default)]
    pub toolbar: bool,
    /// Show the navigation panes
    #[serde(default)]
    pub navpanes: bool,
    /// Extra fragment parameters, e.g. "zoom=page-width"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
}

impl ViewerConfig {
    /// Build the URL fragment (without `#`) for these settings.
    pub fn fragment(&self) -> String {
        let mut params = vec![
            format!("toolbar={}", u8::from(self.toolbar)),
            format!("navpanes={}", u8::from(self.navpanes)),
        ];
        if let Some(extra) = self.extra.as_deref() {
            let extra = extra.trim().trim_start_matches('#');
            if !extra.is_empty() {
                params.push(extra.to_string());
            }
        }
        params.join("&")
    }
}

/// Where raw references live
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Blobs held in process memory
    #[default]
    Memory,
    /// Blobs written to spool files
    Spool,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_spool_directory")]
    pub spool_directory: String,
    /// Upper bound on live preview content, in megabytes
    #[serde(default = "default_quota_mb")]
    pub quota_mb: u64,
    /// Largest document that will be fetched, in megabytes
    #[serde(default = "default_max_document_mb")]
    pub max_document_mb: u64,
}

pub fn default_spool_directory() -> String {
    "~/.cache/docview/spool".to_string()
}

pub fn default_quota_mb() -> u64 {
    256
}

pub fn default_max_document_mb() -> u64 {
    50
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            spool_directory: default_spool_directory(),
            quota_mb: default_quota_mb(),
            max_document_mb: default_max_document_mb(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns `Ok(())` if all values are within acceptable bounds,
    /// or an error describing the first invalid value found.
    pub fn validate(&self) -> Result<(), String> {
        if self.cache.max_size == 0 {
            return Err("cache.max_size must be > 0".to_string());
        }
        if self.cache.fetch_workers == 0 {
            return Err("cache.fetch_workers must be > 0".to_string());
        }
        if self.cache.fetch_workers > 32 {
            return Err(format!(
                "cache.fetch_workers {} exceeds maximum (32)",
                self.cache.fetch_workers
            ));
        }
        if self.storage.quota_mb == 0 {
            return Err("storage.quota_mb must be > 0".to_string());
        }
        if self.storage.max_document_mb == 0 {
            return Err("storage.max_document_mb must be > 0".to_string());
        }
        if self.storage.max_document_mb > self.storage.quota_mb {
            return Err(format!(
                "storage.max_document_mb {} exceeds storage.quota_mb {}",
                self.storage.max_document_mb, self.storage.quota_mb
            ));
        }
        Ok(())
    }
}
