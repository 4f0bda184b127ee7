//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber, stdout only.

pub mod config;
pub mod logger;
pub mod observer;

pub use config::{LogConfig, LogFormat};
pub use logger::LoggerImpl;
pub use observer::TracingObserver;
