//! Logging setup for the reaper daemon.
//!
//! Installs one global `tracing` subscriber writing text, JSON or journald output.
mod logger;
pub use logger::*;
