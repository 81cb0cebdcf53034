//! Leveled stderr logging with per-target filters read from `RUST_LOG`.
//!
//! Logging is a no-op until [`init`] is called.

#[macro_use]
mod log;

pub use log::*;

pub type Result<T> = core::result::Result<T, LogError>;
