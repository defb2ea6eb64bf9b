//! # Handler abstractions.
//!
//! A handler is an independent unit of work (consumer, producer, requeue worker)
//! that needs a ready channel on a live connection:
//! - [`Handler`] - trait with a single `run(ctx, channel)` operation
//! - [`HandlerFn`] - closure-backed implementation
//! - [`HandlerRef`] - shared reference to a handler (`Arc<dyn Handler<C>>`)
//! - [`HandlerKind`] - what role the caller registered the handler for

mod handler;
mod handler_fn;

pub use handler::{Handler, HandlerKind, HandlerRef};
pub use handler_fn::HandlerFn;
