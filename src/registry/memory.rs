//! In-memory blob registry
//!
//! Holds document bytes in a map keyed by `blob:docview/<n>` URLs, the way a
//! browser keeps object URLs alive until they are revoked.

use std::collections::HashMap;

use tracing::trace;

use super::{RawReference, RegistryError, ResourceRegistry};

const URL_PREFIX: &str = "blob:docview/";

/// Registry that keeps blob contents in process memory.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    /// Live blobs (url -> content)
    blobs: HashMap<String, Vec<u8>>,
    /// Next blob number; never reused
    next_id: u64,
    /// Optional upper bound on live bytes
    quota: Option<usize>,
    /// Bytes currently held
    live_bytes: usize,
    /// Number of references revoked so far
    revoked: usize,
}

impl MemoryRegistry {
    /// Create an unbounded registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry that refuses to hold more than `quota` live bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    /// Look up the content behind a live blob URL.
    pub fn resolve(&self, url: &str) -> Option<&[u8]> {
        self.blobs.get(url).map(Vec::as_slice)
    }

    /// Number of blobs not yet revoked
    pub fn live_count(&self) -> usize {
        self.blobs.len()
    }

    /// Total bytes held by live blobs
    pub fn live_bytes(&self) -> usize {
        self.live_bytes
    }

    /// Number of revocations performed
    pub fn revoked_count(&self) -> usize {
        self.revoked
    }
}

impl ResourceRegistry for MemoryRegistry {
    fn create(&mut self, content: &[u8]) -> Result<RawReference, RegistryError> {
        if let Some(quota) = self.quota {
            let available = quota.saturating_sub(self.live_bytes);
            if content.len() > available {
                return Err(RegistryError::QuotaExceeded {
                    requested: content.len(),
                    available,
                });
            }
        }

        self.next_id += 1;
        let url = format!("{}{}", URL_PREFIX, self.next_id);
        self.blobs.insert(url.clone(), content.to_vec());
        self.live_bytes += content.len();
        trace!(%url, bytes = content.len(), "created blob");
        Ok(RawReference::new(url))
    }

    fn revoke(&mut self, reference: RawReference) {
        if let Some(content) = self.blobs.remove(reference.url()) {
            self.live_bytes -= content.len();
            self.revoked += 1;
            trace!(url = %reference.url(), "revoked blob");
        }
    }
}
