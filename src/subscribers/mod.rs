//! # Event subscribers for the brokervisor runtime.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out
//! and the built-in [`LogWriter`].
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   reconnect loop / handler tasks ── publish(Event) ──► Bus
//!                                                        │
//!                                      Supervisor::subscriber_listener()
//!                                                        │
//!                                                SubscriberSet::emit
//!                                               ┌────────┼────────┐
//!                                               ▼        ▼        ▼
//!                                           LogWriter  Metrics  Custom
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use brokervisor::{Subscribe, Event, EventKind};
//! use async_trait::async_trait;
//!
//! struct ReconnectCounter;
//!
//! #[async_trait]
//! impl Subscribe for ReconnectCounter {
//!     async fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::Connected {
//!             // increment a counter
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "reconnect-counter" }
//! }
//! ```

mod embedded;
mod set;
mod subscriber;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
pub(crate) use set::panic_message;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;
