//! Cooperative cancellation for anytime searches.

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::debug;

/// A shared, write-once abort flag.
///
/// Clones share the same flag. Once cancelled it never resets; searches
/// observe it between construction attempts.
///
/// # Examples
///
/// ```
/// use fleet_routing::search::CancellationToken;
///
/// let token = CancellationToken::new();
/// let listener = token.clone();
/// assert!(!token.is_cancelled());
/// listener.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Returns `true` once any clone has called [`cancel`](Self::cancel).
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Spawns the abort listener: a thread that blocks until one line is read
/// from `reader`, then cancels `token`.
///
/// End of input or a read error ends the thread without cancelling, so a
/// closed stdin does not abort a running search.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use fleet_routing::search::{spawn_abort_listener, CancellationToken};
///
/// let token = CancellationToken::new();
/// let handle = spawn_abort_listener(Cursor::new("\n"), token.clone());
/// handle.join().unwrap();
/// assert!(token.is_cancelled());
/// ```
pub fn spawn_abort_listener<R>(mut reader: R, token: CancellationToken) -> JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => debug!("abort listener reached end of input"),
            Ok(_) => {
                debug!("abort requested");
                token.cancel();
            }
            Err(err) => debug!(error = %err, "abort listener read failed"),
        }
    })
}
