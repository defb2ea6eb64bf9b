//! # Function-backed handler (`HandlerFn`)
//!
//! [`HandlerFn`] wraps a closure `F: Fn(CancellationToken, Arc<C>) -> Fut`,
//! producing a fresh future per session. Each reconnect calls the closure again
//! with the new session token and channel; state shared between sessions must
//! live in an explicit `Arc<...>` captured by the closure.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use tokio_util::sync::CancellationToken;
//! use brokervisor::{Channel, Handler, HandlerError, HandlerFn, HandlerRef, TransportError};
//!
//! struct NoopChannel;
//!
//! #[async_trait]
//! impl Channel for NoopChannel {
//!     async fn set_prefetch(&self, _count: u16, _global: bool) -> Result<(), TransportError> { Ok(()) }
//!     async fn close(&self) -> Result<(), TransportError> { Ok(()) }
//! }
//!
//! let h: HandlerRef<NoopChannel> = HandlerFn::arc("orders", |ctx: CancellationToken, _ch: Arc<NoopChannel>| async move {
//!     ctx.cancelled().await;
//!     Err::<(), _>(HandlerError::Canceled)
//! });
//! assert_eq!(h.name(), "orders");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::HandlerError;
use crate::handlers::handler::Handler;
use crate::transport::Channel;

/// Function-backed handler implementation.
///
/// Wraps a closure that *creates* a new future per session.
#[derive(Debug)]
pub struct HandlerFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> HandlerFn<F> {
    /// Creates a new function-backed handler.
    ///
    /// Prefer [`HandlerFn::arc`] when you immediately need a [`HandlerRef`](crate::HandlerRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the handler and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<C, F, Fut> Handler<C> for HandlerFn<F>
where
    C: Channel,
    F: Fn(CancellationToken, Arc<C>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, ctx: CancellationToken, channel: Arc<C>) -> Result<(), HandlerError> {
        (self.f)(ctx, channel).await
    }
}
