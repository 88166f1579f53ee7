//! Adapters implementing the domain ports.

pub mod sinks;

pub use sinks::{LogEvent, MemorySink, PlainTextLog};
