//! Bounded document-preview cache with background fetching
//!
//! Re-exports [`DocumentPreviewCache`] and [`PreviewLoader`], and provides
//! constructors that wire both to the adapters selected in [`Config`].

#[allow(clippy::module_inception)]
pub mod cache;
pub mod loader;
pub mod worker;

pub use cache::{CacheStats, DocumentPreviewCache};
pub use loader::{PreviewLoader, PreviewState};

use std::path::Path;

use crate::config::{Config, StorageBackend};
use crate::registry::{MemoryRegistry, RegistryError, ResourceRegistry, SpoolRegistry};
use crate::source::DirectorySource;
use crate::trust::ViewerTrustPolicy;

/// Default number of cached previews
pub const DEFAULT_MAX_SIZE: usize = 20;

/// Preview cache over whichever registry the configuration selects.
pub type PreviewCache = DocumentPreviewCache<Box<dyn ResourceRegistry>, ViewerTrustPolicy>;

/// Loader feeding a [`PreviewCache`].
pub type DocumentLoader = PreviewLoader<Box<dyn ResourceRegistry>, ViewerTrustPolicy>;

/// Open the registry configured under `[storage]`.
pub fn open_registry(
    config: &Config,
    backend: StorageBackend,
) -> Result<Box<dyn ResourceRegistry>, RegistryError> {
    let quota = config.quota_bytes();
    Ok(match backend {
        StorageBackend::Memory => Box::new(MemoryRegistry::with_quota(quota)),
        StorageBackend::Spool => {
            Box::new(SpoolRegistry::new(config.spool_directory())?.with_quota(quota))
        }
    })
}

/// Create a `PreviewCache` from the configuration.
pub fn new_preview_cache(config: &Config) -> Result<PreviewCache, RegistryError> {
    let registry = open_registry(config, config.storage.backend)?;
    let trust = ViewerTrustPolicy::new(config.viewer.fragment());
    Ok(DocumentPreviewCache::new(config.cache.max_size, registry, trust))
}

/// Create a loader that previews documents stored below `root`.
pub fn new_document_loader(config: &Config, root: &Path) -> Result<DocumentLoader, RegistryError> {
    let cache = new_preview_cache(config)?;
    let source = DirectorySource::new(root).with_max_bytes(config.max_document_bytes());
    Ok(PreviewLoader::new(cache, config.cache.fetch_workers, source))
}
