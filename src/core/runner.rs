//! # Run one handler on one session.
//!
//! Prepares a dedicated channel for the handler, runs it, and reports the
//! outcome on the [`Bus`].
//!
//! ## Event flow
//!
//! ```text
//! publish HandlerStarting
//!   ├─ open_channel()   ── Err ─► publish ChannelOpenFailed ─► return Err (handler not run)
//!   ├─ set_prefetch(1, global)
//!   │                   ── Err ─► publish QosFailed ─► close channel ─► return Err (handler not run)
//!   ├─ handler.run(ctx, channel)
//!   ├─ close channel (best-effort)
//!   └─ Ok, or Err(Canceled) after ctx fired ─► publish HandlerStopped
//!      anything else                      ─► publish HandlerFailed (with reason)
//! ```
//!
//! ## Rules
//! - Always publishes **exactly one** terminal event.
//! - `Canceled` without a cancelled token is a failure: nothing asked the handler to stop.
//! - Does not cancel the session itself; the caller does that once this returns.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::core::config::{PREFETCH_COUNT, PREFETCH_GLOBAL};
use crate::core::registry::Entry;
use crate::error::HandlerError;
use crate::events::{Bus, Event, EventKind};
use crate::transport::{Channel, Connection};

/// Runs `entry` on a fresh channel of `conn` until it returns.
pub async fn run_handler<K: Connection>(
    conn: &K,
    entry: &Entry<K::Channel>,
    ctx: CancellationToken,
    session: u64,
    bus: &Bus,
) -> Result<(), HandlerError> {
    let event = |kind: EventKind| {
        Event::new(kind)
            .with_handler(Arc::clone(&entry.name), entry.kind)
            .with_session(session)
    };

    bus.publish(event(EventKind::HandlerStarting));

    let channel = match conn.open_channel().await {
        Ok(ch) => Arc::new(ch),
        Err(e) => {
            bus.publish(event(EventKind::ChannelOpenFailed).with_reason(e.to_string()));
            return Err(e.into());
        }
    };

    if let Err(e) = channel.set_prefetch(PREFETCH_COUNT, PREFETCH_GLOBAL).await {
        bus.publish(event(EventKind::QosFailed).with_reason(e.to_string()));
        let _ = channel.close().await;
        return Err(e.into());
    }

    let res = entry.handler.run(ctx.clone(), Arc::clone(&channel)).await;
    let _ = channel.close().await;

    match &res {
        Ok(()) => bus.publish(event(EventKind::HandlerStopped)),
        Err(HandlerError::Canceled) if ctx.is_cancelled() => {
            bus.publish(event(EventKind::HandlerStopped));
        }
        Err(e) => bus.publish(event(EventKind::HandlerFailed).with_reason(e.to_string())),
    }
    res
}
