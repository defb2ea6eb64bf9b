//! # Built-in subscribers
//!
//! - [`LogWriter`]: renders supervisor events through `tracing`.

#[cfg(feature = "logging")]
mod log;

#[cfg(feature = "logging")]
pub use log::LogWriter;
