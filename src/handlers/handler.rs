//! # Handler trait.
//!
//! A [`Handler`] receives a cancellation token scoped to the current
//! connection session and a channel already configured with prefetch.
//! It is expected to run until the token is cancelled.
//!
//! Returning for any reason, `Ok` included, tears the session down and
//! makes the supervisor reconnect.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::HandlerError;
use crate::transport::Channel;

/// # Shared handle to a handler object.
pub type HandlerRef<C> = Arc<dyn Handler<C>>;

/// # Long-running unit of work bound to one channel.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
/// use brokervisor::{Channel, Handler, HandlerError};
///
/// struct Consumer;
///
/// #[async_trait]
/// impl<C: Channel> Handler<C> for Consumer {
///     fn name(&self) -> &str { "orders" }
///
///     async fn run(&self, ctx: CancellationToken, _channel: Arc<C>) -> Result<(), HandlerError> {
///         ctx.cancelled().await;
///         Err(HandlerError::Canceled)
///     }
/// }
/// ```
#[async_trait]
pub trait Handler<C: Channel>: Send + Sync + 'static {
    /// Returns a stable, human-readable handler name.
    fn name(&self) -> &str;

    /// Runs on `channel` until failure or until `ctx` is cancelled.
    ///
    /// Return `Err(HandlerError::Canceled)` (or `Ok`) when exiting because of cancellation.
    async fn run(&self, ctx: CancellationToken, channel: Arc<C>) -> Result<(), HandlerError>;
}

/// Role a handler was registered for.
///
/// The supervisor treats every kind the same way; the kind only shows up in events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    /// Consumer reading from a queue.
    Sink,
    /// Producer writing to an exchange.
    Publisher,
    /// Worker moving messages from a requeue queue back to its origin.
    Requeue,
    /// Anything registered through [`Supervisor::handle`](crate::Supervisor::handle).
    Custom,
}

impl HandlerKind {
    /// Returns a short stable label for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            HandlerKind::Sink => "sink",
            HandlerKind::Publisher => "publisher",
            HandlerKind::Requeue => "requeue",
            HandlerKind::Custom => "custom",
        }
    }
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
