//! Logging infrastructure
//!
//! Structured diagnostics using tracing and tracing-subscriber:
//! - Pretty or JSON output on stderr
//! - Optional rolling JSON files via tracing-appender

pub mod logger;

pub use logger::LoggerImpl;
