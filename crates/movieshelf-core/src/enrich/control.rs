//! Search supersession: at most one search is live at a time.
//!
//! Each search runs under a [`SearchTicket`]. Starting a new search through
//! [`SearchControl::begin`] cancels the previous ticket, so results of an
//! older search can never be delivered after a newer one started. A ticket
//! can also be cancelled directly (e.g. on Ctrl-C).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Cancellation handle for one search. Cloning shares the same token.
#[derive(Debug, Clone)]
pub struct SearchTicket {
    generation: u64,
    cancelled: Arc<watch::Sender<bool>>,
}

impl SearchTicket {
    fn new(generation: u64) -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            generation,
            cancelled: Arc::new(tx),
        }
    }

    /// Monotonic search number; later searches have larger generations.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cancel(&self) {
        self.cancelled.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow()
    }

    /// Resolves once the ticket is cancelled (immediately if it already is).
    pub async fn cancelled(&self) {
        let mut rx = self.cancelled.subscribe();
        // The sender lives as long as `self`, so this only returns on cancel.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

/// Hands out tickets and cancels the one it superseded.
#[derive(Debug, Default)]
pub struct SearchControl {
    next_generation: AtomicU64,
    current: Mutex<Option<SearchTicket>>,
}

impl SearchControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new search, cancelling whichever search was live.
    pub fn begin(&self) -> SearchTicket {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed) + 1;
        let ticket = SearchTicket::new(generation);
        let previous = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .replace(ticket.clone());
        if let Some(previous) = previous {
            if !previous.is_cancelled() {
                tracing::debug!(
                    superseded = previous.generation(),
                    by = generation,
                    "cancelling superseded search"
                );
            }
            previous.cancel();
        }
        ticket
    }

    /// Cancel the live search, if any.
    pub fn cancel_current(&self) {
        let current = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(ticket) = current {
            ticket.cancel();
        }
    }
}
