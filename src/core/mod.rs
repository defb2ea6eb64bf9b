//! Runtime core: reconnect loop and handler orchestration.
//!
//! The public API from this module is [`Supervisor`], its builder and its
//! configuration. Everything else stays crate-private.
//!
//! Internal modules:
//! - [`supervisor`]: reconnect loop, registration API, finished signal;
//! - [`endpoints`]: round-robin endpoint rotation;
//! - [`registry`]: append-only handler registry with coalescing wake-up;
//! - [`session`]: per-connection fan-out, failure propagation, drain;
//! - [`runner`]: channel setup and one handler run;
//! - [`shutdown`]: OS signal handling;
//! - [`builder`], [`config`]: construction and settings.
//!
//! ```text
//! Supervisor::run ──► Endpoints::next_url ──► Transport::dial
//!        │                                          │ ok
//!        │                               session::process_connection
//!        │                                 ├─► Registry::start_from(cursor)
//!        │                                 │      └─► spawn runner::run_handler (× N)
//!        │                                 ├─► wait: ctx.cancelled | delta.recv
//!        │                                 └─► join all
//!        └─◄── close, delay (or STOPPED on root cancel) ◄──┘
//! ```

mod builder;
mod config;
mod endpoints;
mod registry;
mod runner;
mod session;
mod shutdown;
mod supervisor;

pub use builder::SupervisorBuilder;
pub use config::{PREFETCH_COUNT, PREFETCH_GLOBAL, SupervisorConfig};
pub use supervisor::Supervisor;
