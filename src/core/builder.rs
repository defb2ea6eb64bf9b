use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::supervisor::Supervisor;
use crate::{
    core::SupervisorConfig,
    error::RuntimeError,
    events::Bus,
    subscribers::{Subscribe, SubscriberSet},
    transport::Transport,
};

/// Builder for constructing a [`Supervisor`].
pub struct SupervisorBuilder<T: Transport> {
    cfg: SupervisorConfig,
    transport: T,
    subscribers: Vec<Arc<dyn Subscribe>>,
    root: Option<CancellationToken>,
}

impl<T: Transport> SupervisorBuilder<T> {
    /// Creates a new builder with the given configuration and transport.
    pub fn new(cfg: SupervisorConfig, transport: T) -> Self {
        Self {
            cfg,
            transport,
            subscribers: Vec::new(),
            root: None,
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive supervisor events (dial attempts, handler failures, etc.)
    /// through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Uses an externally owned root token instead of a fresh one.
    ///
    /// Cancelling it (or any of its parents) stops the supervisor for good.
    pub fn with_cancellation(mut self, root: CancellationToken) -> Self {
        self.root = Some(root);
        self
    }

    /// Validates the configuration and builds the supervisor.
    ///
    /// Must be called from within a tokio runtime: subscriber workers are spawned here.
    pub fn build(self) -> Result<Arc<Supervisor<T>>, RuntimeError> {
        self.cfg.validate()?;

        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let subs = Arc::new(SubscriberSet::new(self.subscribers));
        let root = self.root.unwrap_or_default();

        Ok(Arc::new(Supervisor::new_internal(
            self.cfg,
            self.transport,
            bus,
            subs,
            root,
        )))
    }
}
