//! Error types used by the brokervisor runtime, its transports and handlers.
//!
//! This module defines three enums:
//!
//! - [`RuntimeError`]: errors raised by the supervisor itself.
//! - [`HandlerError`]: errors returned by handlers (or by their channel setup).
//! - [`TransportError`]: errors raised by a [`Transport`](crate::Transport) implementation.
//!
//! All of them provide `as_label` for logging/metrics. Connection and handler
//! failures are never surfaced to the caller of
//! [`Supervisor::run`](crate::Supervisor::run); they are reported as events
//! and recovered by reconnecting.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by the supervisor runtime.
///
/// Root cancellation is the only condition that stops the reconnect loop,
/// so [`RuntimeError::Canceled`] is its normal final value.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// The root cancellation token fired; the reconnect loop has stopped.
    #[error("supervisor cancelled")]
    Canceled,

    /// The configuration has no broker endpoints.
    #[error("at least one broker url is required")]
    NoEndpoints,

    /// `run` was called while another `run` owned the reconnect loop.
    #[error("supervisor reconnect loop is already running")]
    AlreadyRunning,
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use brokervisor::RuntimeError;
    ///
    /// assert_eq!(RuntimeError::Canceled.as_label(), "runtime_canceled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::Canceled => "runtime_canceled",
            RuntimeError::NoEndpoints => "runtime_no_endpoints",
            RuntimeError::AlreadyRunning => "runtime_already_running",
        }
    }

    /// True when the loop ended because of root cancellation.
    pub fn is_canceled(&self) -> bool {
        matches!(self, RuntimeError::Canceled)
    }
}

/// # Errors produced by a broker transport.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Dialing the broker failed.
    #[error("dial failed: {error}")]
    Dial {
        /// The underlying error message.
        error: String,
    },

    /// Dialing did not complete within the connect timeout.
    #[error("connect timed out after {timeout:?}")]
    ConnectTimeout {
        /// The configured connect timeout.
        timeout: Duration,
    },

    /// Opening a channel on a live connection failed.
    #[error("open channel failed: {error}")]
    Channel {
        /// The underlying error message.
        error: String,
    },

    /// Setting the channel prefetch (QoS) failed.
    #[error("set qos failed: {error}")]
    Qos {
        /// The underlying error message.
        error: String,
    },

    /// Closing a connection or channel failed.
    #[error("close failed: {error}")]
    Close {
        /// The underlying error message.
        error: String,
    },
}

impl TransportError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            TransportError::Dial { .. } => "transport_dial",
            TransportError::ConnectTimeout { .. } => "transport_connect_timeout",
            TransportError::Channel { .. } => "transport_channel",
            TransportError::Qos { .. } => "transport_qos",
            TransportError::Close { .. } => "transport_close",
        }
    }
}

/// # Errors returned by handlers.
///
/// Whatever a handler returns, its session is torn down; the variant only
/// decides how the termination is reported.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum HandlerError {
    /// Handler failed.
    #[error("handler failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Handler observed session cancellation and exited.
    #[error("context cancelled")]
    Canceled,

    /// Channel setup (or a channel operation inside the handler) failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl HandlerError {
    /// Shorthand for [`HandlerError::Fail`].
    ///
    /// # Example
    /// ```
    /// use brokervisor::HandlerError;
    ///
    /// let err = HandlerError::fail("queue deleted");
    /// assert_eq!(err.to_string(), "handler failed: queue deleted");
    /// ```
    pub fn fail(error: impl Into<String>) -> Self {
        HandlerError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            HandlerError::Fail { .. } => "handler_failed",
            HandlerError::Canceled => "handler_canceled",
            HandlerError::Transport(e) => e.as_label(),
        }
    }

    /// True for a cooperative exit after cancellation.
    pub fn is_canceled(&self) -> bool {
        matches!(self, HandlerError::Canceled)
    }
}
