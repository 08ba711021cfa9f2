//! Spool-file registry
//!
//! Each reference is a file in a spool directory, exposed as a `file://`
//! URL that an external viewer can open. Revoking deletes the file.
//!
//! Several registries may share one directory (every cache built from the
//! default config does), so file names come from a process-wide counter and
//! files are created with `create_new` rather than overwritten.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{trace, warn};
use url::Url;

use super::{RawReference, RegistryError, ResourceRegistry};

/// Spool file number, shared by every registry in the process
static NEXT_SPOOL_ID: AtomicU64 = AtomicU64::new(1);

/// Attempts before giving up on finding a free spool file name
const MAX_CREATE_ATTEMPTS: usize = 16;

/// Registry that backs references with files on disk.
#[derive(Debug)]
pub struct SpoolRegistry {
    /// Absolute spool directory
    dir: PathBuf,
    /// Live spool files (url -> path)
    files: HashMap<String, PathBuf>,
    /// Optional upper bound on live bytes
    quota: Option<usize>,
    live_bytes: usize,
    /// Size of each live file, so revoke can release its share of the quota
    sizes: HashMap<String, usize>,
}

impl SpoolRegistry {
    /// Open a spool registry rooted at `dir`, creating the directory if needed.
    ///
    /// Relative paths are resolved against the current directory, since
    /// `file://` URLs must be absolute.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, RegistryError> {
        let dir = dir.into();
        let dir = if dir.is_absolute() {
            dir
        } else {
            std::env::current_dir()?.join(dir)
        };
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            files: HashMap::new(),
            quota: None,
            live_bytes: 0,
            sizes: HashMap::new(),
        })
    }

    /// Limit the total size of live spool files.
    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = Some(quota);
        self
    }

    /// Spool directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the spool file behind a live URL
    pub fn path_of(&self, url: &str) -> Option<&Path> {
        self.files.get(url).map(PathBuf::as_path)
    }

    /// Number of spool files not yet revoked
    pub fn live_count(&self) -> usize {
        self.files.len()
    }

    /// Write `content` to a spool file that did not exist before.
    fn write_new_file(&self, content: &[u8]) -> Result<PathBuf, RegistryError> {
        for _ in 0..MAX_CREATE_ATTEMPTS {
            let id = NEXT_SPOOL_ID.fetch_add(1, Ordering::Relaxed);
            let path = self
                .dir
                .join(format!("docview-{}-{}.blob", std::process::id(), id));
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                // Left behind by an earlier process with the same pid
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };
            if let Err(e) = file.write_all(content) {
                drop(file);
                let _ = fs::remove_file(&path);
                return Err(e.into());
            }
            return Ok(path);
        }
        Err(RegistryError::Rejected(format!(
            "no free spool file name in {}",
            self.dir.display()
        )))
    }
}

/// Percent-encoded `file://` URL for an absolute path
fn file_url(path: &Path) -> Result<String, RegistryError> {
    Url::from_file_path(path)
        .map(String::from)
        .map_err(|()| RegistryError::Rejected(format!("not an absolute path: {}", path.display())))
}

impl ResourceRegistry for SpoolRegistry {
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

        let path = self.write_new_file(content)?;
        let url = match file_url(&path) {
            Ok(url) => url,
            Err(e) => {
                let _ = fs::remove_file(&path);
                return Err(e);
            }
        };
        trace!(%url, bytes = content.len(), "spooled document");
        self.live_bytes += content.len();
        self.sizes.insert(url.clone(), content.len());
        self.files.insert(url.clone(), path);
        Ok(RawReference::new(url))
    }

    fn revoke(&mut self, reference: RawReference) {
        let Some(path) = self.files.remove(reference.url()) else {
            return;
        };
        if let Some(size) = self.sizes.remove(reference.url()) {
            self.live_bytes -= size;
        }
        if let Err(e) = fs::remove_file(&path) {
            warn!(path = %path.display(), error = %e, "failed to remove spool file");
        }
    }
}
