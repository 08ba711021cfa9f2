//! Non-blocking preview loading on top of the preview cache
//!
//! Callers request document ids, fetches run on a worker pool, and `poll()`
//! moves finished fetches into the cache on the calling thread. Failed
//! fetches surface as [`PreviewState::Unavailable`].
//!
//! Every request carries a generation number. Only the result for the
//! latest request of an id is accepted, so results that arrive after
//! `invalidate` (or for a superseded request) are discarded.
//!
//! Cache statistics count one access per `request`: a hit when the id is
//! already cached, a miss when it has to be fetched. `state` only refreshes
//! recency.

use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::sleep;
use std::time::{Duration, Instant};

use tracing::{trace, warn};

use super::cache::DocumentPreviewCache;
use super::worker::{spawn_fetch_pool, FetchRequest, FetchResult};
use crate::registry::ResourceRegistry;
use crate::source::DocumentSource;
use crate::trust::{DisplayReference, TrustPolicy};

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// What the UI should show for a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewState {
    /// Cached and ready to embed
    Ready(DisplayReference),
    /// Fetch in flight
    Pending,
    /// Fetching or storing failed; the reason is user-presentable
    Unavailable(String),
    /// Never requested, or evicted since
    Idle,
}

/// Fetches documents in the background and feeds them into a preview cache.
pub struct PreviewLoader<R: ResourceRegistry, T: TrustPolicy> {
    cache: DocumentPreviewCache<R, T>,
    /// Ids currently being fetched (id -> generation of the live request)
    pending: HashMap<String, u64>,
    /// Ids whose last fetch failed (id -> reason)
    failures: HashMap<String, String>,
    next_generation: u64,
    request_tx: Sender<FetchRequest>,
    result_rx: Receiver<FetchResult>,
}

impl<R: ResourceRegistry, T: TrustPolicy> PreviewLoader<R, T> {
    /// Wrap `cache`, fetching documents from `source` on `workers` threads.
    pub fn new(
        cache: DocumentPreviewCache<R, T>,
        workers: usize,
        source: impl DocumentSource + 'static,
    ) -> Self {
        let (request_tx, request_rx) = channel::<FetchRequest>();
        let (result_tx, result_rx) = channel::<FetchResult>();
        spawn_fetch_pool(workers, request_rx, result_tx, Arc::new(source));

        Self {
            cache,
            pending: HashMap::new(),
            failures: HashMap::new(),
            next_generation: 0,
            request_tx,
            result_rx,
        }
    }

    /// Request a document preview (non-blocking).
    ///
    /// Skips the request if the id is already pending or cached; a cached id
    /// counts as a cache hit and an id that needs fetching as a miss. A
    /// previous failure for the id is forgotten, so this also acts as a retry.
    pub fn request(&mut self, id: &str) {
        if self.pending.contains_key(id) || self.cache.get(id).is_some() {
            return;
        }

        self.next_generation += 1;
        let generation = self.next_generation;
        self.failures.remove(id);
        self.pending.insert(id.to_string(), generation);
        let request = FetchRequest {
            id: id.to_string(),
            generation,
        };
        if self.request_tx.send(request).is_err() {
            self.pending.remove(id);
            self.failures
                .insert(id.to_string(), "document fetcher is not running".to_string());
        }
    }

    /// Request several previews at once
    pub fn prefetch<S: AsRef<str>>(&mut self, ids: &[S]) {
        for id in ids {
            self.request(id.as_ref());
        }
    }

    /// Move finished fetches into the cache. Returns how many completed.
    pub fn poll(&mut self) -> usize {
        let mut completed = 0;
        while let Ok(result) = self.result_rx.try_recv() {
            completed += 1;
            if self.pending.get(&result.id) != Some(&result.generation) {
                trace!(id = %result.id, generation = result.generation, "discarding stale fetch");
                continue;
            }
            self.pending.remove(&result.id);
            let stored = result
                .outcome
                .map_err(|e| e.to_string())
                .and_then(|bytes| self.cache.put(&result.id, &bytes).map_err(|e| e.to_string()));
            if let Err(reason) = stored {
                warn!(id = %result.id, %reason, "preview unavailable");
                self.failures.insert(result.id, reason);
            }
        }
        completed
    }

    /// Current state of a document, refreshing its recency when cached.
    pub fn state(&mut self, id: &str) -> PreviewState {
        if let Some(display) = self.cache.view(id) {
            PreviewState::Ready(display)
        } else if self.pending.contains_key(id) {
            PreviewState::Pending
        } else if let Some(reason) = self.failures.get(id) {
            PreviewState::Unavailable(reason.clone())
        } else {
            PreviewState::Idle
        }
    }

    /// Check if a document is currently being fetched
    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains_key(id)
    }

    /// Forget a document: drop its preview, failure and any in-flight fetch.
    ///
    /// A fetch already running on a worker still completes, but its result
    /// no longer matches a pending request and is discarded by `poll`.
    pub fn invalidate(&mut self, id: &str) {
        self.cache.remove(id);
        self.pending.remove(id);
        self.failures.remove(id);
    }

    /// Poll until nothing is pending or `timeout` elapses.
    ///
    /// Returns `true` when every pending fetch completed.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.poll();
            if self.pending.is_empty() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            sleep(WAIT_POLL_INTERVAL);
        }
    }

    pub fn cache(&self) -> &DocumentPreviewCache<R, T> {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut DocumentPreviewCache<R, T> {
        &mut self.cache
    }
}
