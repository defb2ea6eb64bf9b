//! # Broker transport abstraction.
//!
//! The supervisor does not speak the broker protocol. It needs exactly three
//! things from a transport, expressed as traits:
//!
//! - [`Transport::dial`] opens a [`Connection`] to one endpoint URL;
//! - [`Connection::open_channel`] opens a fresh [`Channel`] per handler;
//! - [`Channel::set_prefetch`] configures QoS before the handler sees the channel.
//!
//! ```text
//! Transport ──dial(url, opts)──► Connection ──open_channel()──► Channel
//!                                    │                            │
//!                                close()              set_prefetch(1, global)
//!                                                                 │
//!                                                      Handler::run(ctx, &channel)
//! ```
//!
//! The connect timeout is enforced by the supervisor around `dial`; the
//! transport receives it in [`DialOptions`] too, for transports able to
//! bound the TCP handshake themselves.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::TransportError;

/// Options forwarded to [`Transport::dial`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialOptions {
    /// Upper bound for establishing the connection.
    pub connect_timeout: Duration,
    /// Protocol heartbeat interval.
    pub heartbeat: Duration,
    /// TCP keepalive interval.
    pub keepalive: Duration,
    /// Connection locale.
    pub locale: String,
}

/// Dials broker endpoints.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Channel type handed to handlers.
    type Channel: Channel;
    /// Live connection type.
    type Connection: Connection<Channel = Self::Channel>;

    /// Opens a connection to `url`.
    ///
    /// Errors may embed the URL; the supervisor masks credentials before
    /// reporting them.
    async fn dial(&self, url: &str, opts: &DialOptions)
    -> Result<Self::Connection, TransportError>;
}

/// A live broker connection, shared by every handler of one session.
#[async_trait]
pub trait Connection: Send + Sync + 'static {
    /// Channel type opened on this connection.
    type Channel: Channel;

    /// Opens a new channel.
    async fn open_channel(&self) -> Result<Self::Channel, TransportError>;

    /// Closes the connection. Called once per session, after every handler unwound.
    async fn close(&self) -> Result<(), TransportError>;
}

/// A logical sub-connection owned by exactly one handler.
#[async_trait]
pub trait Channel: Send + Sync + 'static {
    /// Limits unacknowledged deliveries; `global` applies the limit to the whole channel.
    async fn set_prefetch(&self, count: u16, global: bool) -> Result<(), TransportError>;

    /// Closes the channel once its handler returned.
    async fn close(&self) -> Result<(), TransportError>;
}
