//! # Handler registry - append-only arena with a coalescing wake-up.
//!
//! The registry keeps every handler ever registered, in insertion order, and
//! never removes one. Sessions track how many entries they already started
//! (a cursor) and re-scan from that cursor when woken up.
//!
//! ## Architecture
//! ```text
//! any thread ── push(handler) ──► [lock] entries.push ──► try_send(()) ──► delta (capacity 1)
//!                                                                           │
//! session loop ◄── delta.recv() ◄───────────────────────────────────────────┘
//!      └─► start_from(cursor, spawn) ── [lock] for entry in entries[cursor..] ─► spawn
//! ```
//!
//! ## Rules
//! - The lock guards the append and the scan+spawn, never any `.await`.
//! - Scan and spawn happen under the same lock: an entry is either seen by the
//!   current pass or left for the next one, never both and never neither.
//! - `push` never blocks on the wake-up: when one is already pending the new one
//!   is dropped. The pending wake-up triggers a scan from the cursor, which
//!   picks up every entry appended since.
//! - The wake-up receiver stays inside the registry. A reconnect loop borrows it
//!   through [`Registry::claim_delta`] for as long as it runs, so at most one loop
//!   runs at a time and a dropped loop leaves it reusable.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, MutexGuard as AsyncMutexGuard, mpsc};

use crate::events::{Bus, Event, EventKind};
use crate::handlers::{HandlerKind, HandlerRef};
use crate::transport::Channel;

/// One registered handler.
pub struct Entry<C: Channel> {
    /// Display name used in events.
    pub name: Arc<str>,
    /// Role the handler was registered for.
    pub kind: HandlerKind,
    /// The handler itself.
    pub handler: HandlerRef<C>,
}

impl<C: Channel> Clone for Entry<C> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            kind: self.kind,
            handler: Arc::clone(&self.handler),
        }
    }
}

/// Append-only handler registry.
pub struct Registry<C: Channel> {
    entries: Mutex<Vec<Entry<C>>>,
    delta_tx: mpsc::Sender<()>,
    delta_rx: AsyncMutex<mpsc::Receiver<()>>,
    bus: Bus,
}

impl<C: Channel> Registry<C> {
    /// Creates an empty registry with a single-slot wake-up channel.
    pub fn new(bus: Bus) -> Self {
        let (delta_tx, delta_rx) = mpsc::channel(1);
        Self {
            entries: Mutex::new(Vec::new()),
            delta_tx,
            delta_rx: AsyncMutex::new(delta_rx),
            bus,
        }
    }

    /// Appends a handler and wakes the current session, if any.
    ///
    /// Safe from any thread, before or during a session. Returns the registry size.
    pub fn push(&self, name: Arc<str>, kind: HandlerKind, handler: HandlerRef<C>) -> usize {
        let len = {
            let mut entries = self.lock();
            entries.push(Entry {
                name: Arc::clone(&name),
                kind,
                handler,
            });
            entries.len()
        };

        // Full means a wake-up is already pending; it covers this entry too.
        let _ = self.delta_tx.try_send(());

        self.bus
            .publish(Event::new(EventKind::HandlerRegistered).with_handler(name, kind));
        len
    }

    /// Calls `start` for every entry at index `offset..`, holding the lock throughout.
    ///
    /// Returns the number of entries visited, to be added to the caller's cursor.
    pub fn start_from(&self, offset: usize, mut start: impl FnMut(&Entry<C>)) -> usize {
        let entries = self.lock();
        let fresh = entries.get(offset..).unwrap_or_default();
        for entry in fresh {
            start(entry);
        }
        fresh.len()
    }

    /// Borrows the wake-up receiver; `None` while another caller holds it.
    pub fn claim_delta(&self) -> Option<AsyncMutexGuard<'_, mpsc::Receiver<()>>> {
        self.delta_rx.try_lock().ok()
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Entry<C>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
