//! Revocable resource references for previewed documents
//!
//! A [`ResourceRegistry`] turns raw document bytes into a [`RawReference`]:
//! a URL-like handle backed by some platform resource (memory, a spool
//! file) that stays alive until it is explicitly revoked.
//!
//! `RawReference` is deliberately not `Clone`. Revoking consumes it, so a
//! reference can be released at most once and cannot be used afterwards.

pub mod memory;
pub mod spool;

pub use memory::MemoryRegistry;
pub use spool::SpoolRegistry;

use std::fmt;

/// Errors raised while creating a raw reference.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Quota exceeded: {requested} bytes requested, {available} bytes available")]
    QuotaExceeded { requested: usize, available: usize },

    #[error("Failed to store document content: {0}")]
    Io(#[from] std::io::Error),

    #[error("Registry rejected the content: {0}")]
    Rejected(String),
}

/// An owned, revocable handle to binary content.
#[derive(Debug, PartialEq, Eq)]
pub struct RawReference {
    url: String,
}

impl RawReference {
    /// Wrap a freshly created resource URL.
    ///
    /// Only registries should construct these; everything else receives
    /// display references.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// The URL identifying the underlying resource.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for RawReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Platform port for creating and releasing raw references.
pub trait ResourceRegistry {
    /// Create a new reference holding `content`.
    fn create(&mut self, content: &[u8]) -> Result<RawReference, RegistryError>;

    /// Release the resource behind `reference`.
    ///
    /// Revocation cannot fail from the caller's point of view; adapters log
    /// cleanup problems instead of returning them.
    fn revoke(&mut self, reference: RawReference);
}

impl<R: ResourceRegistry + ?Sized> ResourceRegistry for Box<R> {
    fn create(&mut self, content: &[u8]) -> Result<RawReference, RegistryError> {
        (**self).create(content)
    }

    fn revoke(&mut self, reference: RawReference) {
        (**self).revoke(reference)
    }
}
