//! Scripted transport and stub handlers shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use brokervisor::{
    Channel, Connection, DialOptions, Event, Handler, HandlerError, Supervisor, SupervisorConfig,
    Transport, TransportError,
};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio_util::sync::CancellationToken;

pub const WAIT: Duration = Duration::from_secs(5);

// ---------------------------
// Transport
// ---------------------------

#[derive(Default)]
pub struct TransportState {
    pub dials: Mutex<Vec<String>>,
    pub failing: Mutex<HashSet<String>>,
    pub hanging: AtomicBool,
    pub fail_channel: AtomicBool,
    pub fail_qos: AtomicBool,
    pub connections: AtomicU64,
    pub closed_connections: AtomicUsize,
    pub closed_channels: AtomicUsize,
    pub prefetch: Mutex<Vec<(u16, bool)>>,
}

/// In-memory transport; every dial succeeds unless the url is marked failing.
#[derive(Clone, Default)]
pub struct FakeTransport {
    pub state: Arc<TransportState>,
}

impl FakeTransport {
    pub fn fail(&self, url: &str) -> &Self {
        self.state.failing.lock().unwrap().insert(url.to_string());
        self
    }

    pub fn dials(&self) -> Vec<String> {
        self.state.dials.lock().unwrap().clone()
    }
}

pub struct FakeConnection {
    pub id: u64,
    state: Arc<TransportState>,
}

pub struct FakeChannel {
    /// Id of the connection (equals the session number when every dial succeeds).
    pub session: u64,
    state: Arc<TransportState>,
}

#[async_trait]
impl Transport for FakeTransport {
    type Channel = FakeChannel;
    type Connection = FakeConnection;

    async fn dial(&self, url: &str, _opts: &DialOptions) -> Result<FakeConnection, TransportError> {
        self.state.dials.lock().unwrap().push(url.to_string());
        if self.state.hanging.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if self.state.failing.lock().unwrap().contains(url) {
            return Err(TransportError::Dial {
                error: format!("{url}: connection refused"),
            });
        }
        let id = self.state.connections.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(FakeConnection {
            id,
            state: Arc::clone(&self.state),
        })
    }
}

#[async_trait]
impl Connection for FakeConnection {
    type Channel = FakeChannel;

    async fn open_channel(&self) -> Result<FakeChannel, TransportError> {
        if self.state.fail_channel.load(Ordering::SeqCst) {
            return Err(TransportError::Channel {
                error: "channel limit reached".into(),
            });
        }
        Ok(FakeChannel {
            session: self.id,
            state: Arc::clone(&self.state),
        })
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.state.closed_connections.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl Channel for FakeChannel {
    async fn set_prefetch(&self, count: u16, global: bool) -> Result<(), TransportError> {
        self.state.prefetch.lock().unwrap().push((count, global));
        if self.state.fail_qos.load(Ordering::SeqCst) {
            return Err(TransportError::Qos {
                error: "access refused".into(),
            });
        }
        Ok(())
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.state.closed_channels.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ---------------------------
// Handlers
// ---------------------------

#[derive(Clone, Copy)]
pub enum Behavior {
    /// Runs until cancelled.
    Block,
    /// Fails after the delay on its first run, blocks on later runs.
    FailOnce(Duration),
    /// Returns `Ok` after the delay on its first run, blocks on later runs.
    ReturnOnce(Duration),
    /// Returns `Canceled` right away on its first run, blocks on later runs.
    CancelOnce,
    /// Panics on its first run, blocks on later runs.
    PanicOnce,
}

/// Handler recording on which sessions it ran and whether it saw cancellation.
pub struct Stub {
    name: String,
    behavior: Behavior,
    pub sessions: Mutex<Vec<u64>>,
    pub cancelled: AtomicUsize,
}

impl Stub {
    pub fn new(name: impl Into<String>, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            behavior,
            sessions: Mutex::new(Vec::new()),
            cancelled: AtomicUsize::new(0),
        })
    }

    pub fn blocking(name: impl Into<String>) -> Arc<Self> {
        Self::new(name, Behavior::Block)
    }

    pub fn sessions(&self) -> Vec<u64> {
        self.sessions.lock().unwrap().clone()
    }

    pub fn cancellations(&self) -> usize {
        self.cancelled.load(Ordering::SeqCst)
    }

    async fn until_cancelled(&self, ctx: &CancellationToken) -> Result<(), HandlerError> {
        ctx.cancelled().await;
        self.cancelled.fetch_add(1, Ordering::SeqCst);
        Err(HandlerError::Canceled)
    }
}

#[async_trait]
impl Handler<FakeChannel> for Stub {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, ctx: CancellationToken, channel: Arc<FakeChannel>) -> Result<(), HandlerError> {
        let first = {
            let mut sessions = self.sessions.lock().unwrap();
            sessions.push(channel.session);
            sessions.len() == 1
        };

        let delay = match self.behavior {
            Behavior::CancelOnce if first => return Err(HandlerError::Canceled),
            Behavior::PanicOnce if first => panic!("handler exploded"),
            Behavior::FailOnce(d) | Behavior::ReturnOnce(d) if first => d,
            _ => return self.until_cancelled(&ctx).await,
        };
        tokio::select! {
            _ = ctx.cancelled() => {
                self.cancelled.fetch_add(1, Ordering::SeqCst);
                Err(HandlerError::Canceled)
            }
            _ = tokio::time::sleep(delay) => match self.behavior {
                Behavior::FailOnce(_) => Err(HandlerError::fail("queue deleted")),
                _ => Ok(()),
            },
        }
    }
}

// ---------------------------
// Helpers
// ---------------------------

pub fn config(urls: &[&str]) -> SupervisorConfig {
    let mut cfg = SupervisorConfig::new(urls.iter().copied());
    cfg.connect_timeout = Duration::from_millis(200);
    cfg.reconnect_interval = Duration::from_millis(20);
    cfg
}

/// Spawns `run` on the runtime and returns its handle.
pub fn spawn_run(
    sup: &Arc<Supervisor<FakeTransport>>,
) -> tokio::task::JoinHandle<Result<(), brokervisor::RuntimeError>> {
    let sup = Arc::clone(sup);
    tokio::spawn(async move { sup.run().await })
}

/// Reads events until `pred` matches; returns everything read, the match last.
pub async fn collect_until(
    rx: &mut broadcast::Receiver<Event>,
    pred: impl Fn(&Event) -> bool,
) -> Vec<Event> {
    let mut seen = Vec::new();
    let res = tokio::time::timeout(WAIT, async {
        loop {
            match rx.recv().await {
                Ok(ev) => {
                    let done = pred(&ev);
                    seen.push(ev);
                    if done {
                        return;
                    }
                }
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => panic!("event bus closed"),
            }
        }
    })
    .await;
    assert!(res.is_ok(), "timed out waiting for event; seen: {:?}", kinds(&seen));
    seen
}

/// Reads events until `pred` matches and returns the matching event.
pub async fn wait_for(rx: &mut broadcast::Receiver<Event>, pred: impl Fn(&Event) -> bool) -> Event {
    collect_until(rx, pred)
        .await
        .pop()
        .expect("collect_until returns the match")
}

/// Polls `cond` until it holds.
pub async fn eventually(cond: impl Fn() -> bool) {
    let res = tokio::time::timeout(WAIT, async {
        while !cond() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(res.is_ok(), "condition not reached in time");
}

pub fn kinds(events: &[Event]) -> Vec<brokervisor::EventKind> {
    events.iter().map(|e| e.kind).collect()
}
