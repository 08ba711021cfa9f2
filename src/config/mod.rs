//! Configuration management for docview

mod io;
mod types;

pub use types::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

impl Config {
    /// Get the config file path (~/.config/docview/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Get the config directory path (~/.config/docview)
    pub fn config_dir() -> Result<PathBuf> {
        io::config_dir()
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Result<Self> {
        io::load_from(&io::config_path()?)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        io::load_from(path)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        io::save_to(self, &io::config_path()?)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        io::save_to(self, path)
    }

    /// Expand ~ in the spool directory path
    pub fn spool_directory(&self) -> PathBuf {
        let dir = &self.storage.spool_directory;
        if let Some(stripped) = dir.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        }
        PathBuf::from(dir)
    }

    /// Preview content quota in bytes
    pub fn quota_bytes(&self) -> usize {
        usize::try_from(self.storage.quota_mb.saturating_mul(1024 * 1024)).unwrap_or(usize::MAX)
    }

    /// Largest fetchable document in bytes
    pub fn max_document_bytes(&self) -> u64 {
        self.storage.max_document_mb.saturating_mul(1024 * 1024)
    }
}
