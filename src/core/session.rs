//! # Per-connection orchestration.
//!
//! One session per successful dial. The session owns a child token of the root
//! token, a cursor into the registry and a [`JoinSet`] of handler tasks.
//!
//! ## Flow
//! ```text
//! process_connection(conn)
//!   ├─► ctx = root.child_token()
//!   ├─► start_handlers(offset = 0)          one task per registered handler
//!   ├─► loop select! {
//!   │     ctx.cancelled()   ─► break
//!   │     delta.recv()      ─► start_handlers(offset = started)
//!   │   }
//!   └─► join every handler task ─► publish SessionDrained
//!
//! handler task:
//!   _teardown = ctx.drop_guard()            cancels ctx on return or panic
//!   run_handler(conn, entry, ctx)           panic ─► publish HandlerPanicked (name, kind)
//! ```
//!
//! ## Rules
//! - Any handler returning, `Ok` included, cancels the whole session.
//! - Channel setup failures count as handler failures.
//! - Already running handlers are never restarted on a wake-up; only entries
//!   past the cursor are started.
//! - Draining waits for every handler without a timeout.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinSet};
use tokio_util::sync::CancellationToken;

use crate::core::registry::Registry;
use crate::core::runner::run_handler;
use crate::events::{Bus, Event, EventKind};
use crate::subscribers::panic_message;
use crate::transport::Connection;

/// Runs every registered handler on `conn` until one of them returns or
/// `parent` is cancelled, then waits for all of them to unwind.
pub async fn process_connection<K: Connection>(
    conn: Arc<K>,
    registry: &Registry<K::Channel>,
    delta: &mut mpsc::Receiver<()>,
    parent: &CancellationToken,
    session: u64,
    bus: &Bus,
) {
    let ctx = parent.child_token();
    let mut running = JoinSet::new();

    let mut started = start_handlers(&conn, registry, &ctx, &mut running, 0, session, bus);
    loop {
        tokio::select! {
            biased;
            _ = ctx.cancelled() => break,
            Some(()) = delta.recv() => {
                started += start_handlers(&conn, registry, &ctx, &mut running, started, session, bus);
            }
        }
    }

    // Panics are reported from inside each task; a join error here means the task was aborted.
    while let Some(joined) = running.join_next().await {
        if let Err(e) = joined {
            tracing::warn!(session, err = %e, "handler task aborted");
        }
    }
    bus.publish(Event::new(EventKind::SessionDrained).with_session(session));
}

/// Spawns a task for every registry entry from `offset` on; returns how many were spawned.
fn start_handlers<K: Connection>(
    conn: &Arc<K>,
    registry: &Registry<K::Channel>,
    ctx: &CancellationToken,
    running: &mut JoinSet<()>,
    offset: usize,
    session: u64,
    bus: &Bus,
) -> usize {
    registry.start_from(offset, |entry| {
        let conn = Arc::clone(conn);
        let entry = entry.clone();
        let ctx = ctx.clone();
        let bus = bus.clone();

        running.spawn(async move {
            let _teardown = ctx.clone().drop_guard();
            let run = run_handler(conn.as_ref(), &entry, ctx, session, &bus);
            if let Err(panic) = AssertUnwindSafe(run).catch_unwind().await {
                bus.publish(
                    Event::new(EventKind::HandlerPanicked)
                        .with_handler(Arc::clone(&entry.name), entry.kind)
                        .with_session(session)
                        .with_reason(panic_message(panic.as_ref())),
                );
            }
        });
    })
}
