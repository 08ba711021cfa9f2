//! Document sources for background fetching
//!
//! A [`DocumentSource`] turns a document id into its raw bytes. The cache
//! never fetches anything itself; the loader runs sources on worker threads.

use std::fs;
use std::path::{Component, Path, PathBuf};

/// Default upper bound on a single fetched document (50 MB).
pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 50 * 1024 * 1024;

/// Errors that can occur while fetching a document.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid document id: {id:?}")]
    InvalidId { id: String },

    #[error("Document not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Document too large ({size} bytes). Maximum is {max} bytes.")]
    TooLarge { size: u64, max: u64 },

    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Port for fetching document content by id.
pub trait DocumentSource: Send + Sync {
    fn fetch(&self, id: &str) -> Result<Vec<u8>, FetchError>;
}

impl<F> DocumentSource for F
where
    F: Fn(&str) -> Result<Vec<u8>, FetchError> + Send + Sync,
{
    fn fetch(&self, id: &str) -> Result<Vec<u8>, FetchError> {
        self(id)
    }
}

/// Reads documents from files below a root directory.
///
/// Ids are relative paths; anything that would escape the root is rejected.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    max_bytes: u64,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an id to a path below the root.
    pub fn resolve(&self, id: &str) -> Result<PathBuf, FetchError> {
        let relative = Path::new(id);
        let is_plain = !id.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !is_plain {
            return Err(FetchError::InvalidId { id: id.to_string() });
        }
        Ok(self.root.join(relative))
    }
}

impl DocumentSource for DirectorySource {
    fn fetch(&self, id: &str) -> Result<Vec<u8>, FetchError> {
        let path = self.resolve(id)?;
        if !path.is_file() {
            return Err(FetchError::NotFound { path });
        }

        let size = fs::metadata(&path)?.len();
        if size > self.max_bytes {
            return Err(FetchError::TooLarge {
                size,
                max: self.max_bytes,
            });
        }

        Ok(fs::read(&path)?)
    }
}
