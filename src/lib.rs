//! docview - bounded, revocable document-preview cache
//!
//! Maps document ids to display references that can be embedded in a
//! viewer. Each reference is backed by a revocable resource owned by the
//! cache and released when the entry is evicted, replaced or dropped.

pub mod cache;
pub mod config;
pub mod logging;
pub mod registry;
pub mod source;
pub mod trust;

pub use cache::{CacheStats, DocumentPreviewCache, PreviewLoader, PreviewState};
pub use config::Config;
pub use registry::{MemoryRegistry, RawReference, RegistryError, ResourceRegistry, SpoolRegistry};
pub use source::{DirectorySource, DocumentSource, FetchError};
pub use trust::{DisplayReference, TrustPolicy, ViewerTrustPolicy};
