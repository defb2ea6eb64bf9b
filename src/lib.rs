//! # brokervisor
//!
//! **Brokervisor** keeps a single logical connection to a message-broker
//! cluster alive over an unreliable network, and re-establishes every
//! registered handler (consumers, producers, requeue workers) on each new
//! connection, including handlers registered while a connection is live.
//!
//! The broker protocol itself stays behind the [`Transport`] trait; the crate
//! owns the lifecycle: reconnect loop, endpoint rotation, per-connection
//! handler orchestration and failure propagation.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!    sink() / publisher() / requeue() / handle()      (any thread, any time)
//!                         │
//!                         ▼
//!     ┌────────────────────────────────────┐   try_send(())   ┌──────────────┐
//!     │ Registry (append-only, one Mutex)  │ ───────────────► │ delta (cap 1)│
//!     └──────────────────┬─────────────────┘                  └──────┬───────┘
//!                        │ start_from(cursor)                        │
//! ┌──────────────────────▼───────────────────────────────────────────▼────────┐
//! │  Supervisor::run (reconnect loop)                                         │
//! │   DIALING ─► CONNECTED (session) ─► DRAINING ─► close ─► delay ─► DIALING │
//! │      │ Endpoints::next_url (round-robin)                    │             │
//! │      └─ Transport::dial (connect timeout)          root cancel ─► STOPPED │
//! └──────┬──────────────────┬──────────────────┬──────────────────────────────┘
//!        ▼                  ▼                  ▼
//!  ┌────────────┐     ┌────────────┐     ┌────────────┐
//!  │ handler #1 │     │ handler #2 │     │ handler #N │   one task each, own channel
//!  │ prefetch 1 │     │ prefetch 1 │     │ prefetch 1 │   (any return cancels the session)
//!  └─────┬──────┘     └─────┬──────┘     └─────┬──────┘
//!        └──────── publish(Event) ─────────────┴──► Bus ─► SubscriberSet ─► LogWriter, ...
//! ```
//!
//! ### Failure policy
//! | Condition | Scope | Recovery |
//! |---|---|---|
//! | dial failure / timeout | connection | next endpoint after `reconnect_interval` |
//! | channel open / QoS failure | session | treated as handler failure |
//! | handler returns (error **or** `Ok`) | session | every handler cancelled, reconnect |
//! | root cancellation | supervisor | drain, stop, `finished` fires |
//!
//! Credentials embedded in endpoint URLs are masked in every event.
//!
//! ## Features
//! | Area              | Description                                           | Key types / traits                         |
//! |-------------------|-------------------------------------------------------|--------------------------------------------|
//! | **Supervision**   | Reconnect loop and handler orchestration.             | [`Supervisor`], [`SupervisorBuilder`]      |
//! | **Transport**     | Broker protocol seam.                                 | [`Transport`], [`Connection`], [`Channel`] |
//! | **Handlers**      | Units of work bound to one channel.                   | [`Handler`], [`HandlerFn`], [`HandlerRef`] |
//! | **Subscriber API**| Hook into lifecycle events (logging, metrics).        | [`Subscribe`], [`Event`], [`EventKind`]    |
//! | **Errors**        | Typed errors for runtime, transport and handlers.     | [`RuntimeError`], [`TransportError`], [`HandlerError`] |
//! | **Configuration** | Endpoints and timings.                                | [`SupervisorConfig`]                       |
//!
//! ## Optional features
//! - `logging` _(default)_: exports [`LogWriter`], rendering events through `tracing`.

mod core;
mod error;
mod events;
mod handlers;
mod masking;
mod subscribers;
mod transport;

// ---- Public re-exports ----

pub use core::{PREFETCH_COUNT, PREFETCH_GLOBAL, Supervisor, SupervisorBuilder, SupervisorConfig};
pub use error::{HandlerError, RuntimeError, TransportError};
pub use events::{Event, EventKind};
pub use handlers::{Handler, HandlerFn, HandlerKind, HandlerRef};
pub use masking::{MASK, mask_password};
pub use subscribers::{Subscribe, SubscriberSet};
pub use transport::{Channel, Connection, DialOptions, Transport};

#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
