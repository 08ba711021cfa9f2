//! Background worker pool for document fetching
//!
//! Workers pull document ids from a shared request channel, run the
//! configured [`DocumentSource`] and send the outcome back. Only bytes cross
//! threads; the preview cache itself stays on the owning thread.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

use tracing::trace;

use crate::source::{DocumentSource, FetchError};

/// A queued fetch
pub struct FetchRequest {
    pub id: String,
    /// Distinguishes repeated requests for the same id
    pub generation: u64,
}

/// Result of a background fetch
pub struct FetchResult {
    /// The document id that was requested
    pub id: String,
    /// Generation of the request this answers
    pub generation: u64,
    /// The fetched bytes, or why fetching failed
    pub outcome: Result<Vec<u8>, FetchError>,
}

/// Default number of worker threads in the pool
pub const DEFAULT_POOL_SIZE: usize = 4;

/// A thread-safe, shared document source.
pub type SharedSource = Arc<dyn DocumentSource>;

/// Spawn a pool of worker threads that fetch documents in parallel.
///
/// Workers exit when the request channel is closed (all senders dropped) or
/// when nobody is listening for results anymore.
pub fn spawn_fetch_pool(
    num_threads: usize,
    request_rx: Receiver<FetchRequest>,
    result_tx: Sender<FetchResult>,
    source: SharedSource,
) {
    let request_rx = Arc::new(Mutex::new(request_rx));

    for worker in 0..num_threads.max(1) {
        let rx = Arc::clone(&request_rx);
        let tx = result_tx.clone();
        let source = Arc::clone(&source);

        thread::spawn(move || loop {
            let FetchRequest { id, generation } = {
                let Ok(rx) = rx.lock() else {
                    return; // another worker panicked while holding the lock
                };
                match rx.recv() {
                    Ok(request) => request,
                    Err(_) => return, // channel closed
                }
            };
            trace!(worker, %id, generation, "fetching document");
            let outcome = source.fetch(&id);
            let result = FetchResult {
                id,
                generation,
                outcome,
            };
            if tx.send(result).is_err() {
                return;
            }
        });
    }
    // Drop the original result_tx so the channel closes only when all workers exit
    drop(result_tx);
}
