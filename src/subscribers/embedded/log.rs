//! # LogWriter: supervisor events rendered through `tracing`
//!
//! Connection and reconnect events go to `info`/`warn`, handler-fatal
//! conditions to `error`. Endpoints and reasons arrive already masked.
//!
//! ## Example output (fmt subscriber)
//! ```text
//! INFO  connecting to endpoint="amqp://***@broker-a:5672/" timeout_ms=10000
//! WARN  connection error endpoint="amqp://***@broker-a:5672/" err="dial failed: connection refused"
//! INFO  connecting to endpoint="amqp://***@broker-b:5672/" timeout_ms=10000
//! INFO  successfully connected endpoint="amqp://***@broker-b:5672/" session=1
//! INFO  starting handler handler="orders" kind="sink" session=1
//! ERROR failed handler handler="orders" kind="sink" session=1 err="handler failed: queue deleted"
//! INFO  try to reconnect after delay_ms=5000
//! INFO  reconnect aborted due to context close
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let endpoint = e.endpoint.as_deref().unwrap_or("-");
        let handler = e.handler.as_deref().unwrap_or("-");
        let kind = e.handler_kind.map(|k| k.as_str()).unwrap_or("-");
        let err = e.reason.as_deref().unwrap_or("");

        match e.kind {
            EventKind::Connecting => {
                tracing::info!(endpoint, timeout_ms = e.timeout_ms, "connecting to");
            }
            EventKind::Connected => {
                tracing::info!(endpoint, session = e.session, "successfully connected");
            }
            EventKind::ConnectionError => {
                tracing::warn!(endpoint, err, "connection error");
            }
            EventKind::ConnectionClosed => {
                tracing::info!(endpoint, session = e.session, err, "connection closed");
            }
            EventKind::HandlerRegistered => {
                tracing::debug!(handler, kind, "handler registered");
            }
            EventKind::HandlerStarting => {
                tracing::info!(handler, kind, session = e.session, "starting handler");
            }
            EventKind::ChannelOpenFailed => {
                tracing::error!(handler, kind, session = e.session, err, "failed open channel");
            }
            EventKind::QosFailed => {
                tracing::error!(handler, kind, session = e.session, err, "failed set QoS");
            }
            EventKind::HandlerFailed => {
                tracing::error!(handler, kind, session = e.session, err, "failed handler");
            }
            EventKind::HandlerStopped => {
                tracing::info!(handler, kind, session = e.session, "handler stopped");
            }
            EventKind::HandlerPanicked => {
                tracing::error!(session = e.session, err, "handler panicked");
            }
            EventKind::SessionDrained => {
                tracing::debug!(session = e.session, "session drained");
            }
            EventKind::ReconnectScheduled => {
                tracing::info!(delay_ms = e.delay_ms, "try to reconnect after");
            }
            EventKind::ReconnectAborted => {
                tracing::info!("reconnect aborted due to context close");
            }
            EventKind::ShutdownRequested => {
                tracing::info!("shutdown requested");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
