//! Renders structured log entries as single, deterministic text lines:
//!
//! ```text
//! 2024-03-01 10:15:30.123 INFO 1 server started addr="0.0.0.0:8080" workers="4"
//! ```
//!
//! A [`Renderer`] wraps any [`std::io::Write`] sink and may be shared between
//! threads. [`Builder`] wires one into the `log` facade.

mod logging;

pub use logging::{
    level_name, open_log_file, sorted_attributes, Builder, Config, Level, LineFormatter, LogEntry,
    LogSink, Logger, NullSink, Renderer, Timezone, Value,
};
