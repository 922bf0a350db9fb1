use std::{
    io::Write,
    sync::{Mutex, PoisonError},
};

use chrono::NaiveDateTime;
use eyre::Context;

use super::{
    formatters::LineFormatter,
    logger::{Config, Timezone},
    LogEntry, LogSink,
};

/// Renders log entries as single lines onto a shared writer.
///
/// Formatting and writing of one entry happen under the same lock, so lines
/// from concurrent callers never interleave. The writer's lifecycle stays with
/// the caller: the renderer neither opens nor closes it.
pub struct Renderer<W> {
    output: Mutex<W>,
    formatter: LineFormatter,
    timezone: Timezone,
}

impl<W: Write + Send> Renderer<W> {
    pub fn new(output: W) -> Self {
        Self::with_config(output, Config::default())
    }

    pub fn with_config(output: W, config: Config) -> Self {
        Self {
            output: Mutex::new(output),
            timezone: config.timezone,
            formatter: LineFormatter::new(config),
        }
    }

    /// Writes exactly one line for `entry`.
    ///
    /// Write failures are returned as-is; nothing is retried.
    pub fn render(&self, entry: &LogEntry) -> eyre::Result<()> {
        // A panic while rendering (e.g. in a caller's Display impl) must not
        // take the sink down with it.
        let mut output = self.output.lock().unwrap_or_else(PoisonError::into_inner);

        let line = self.formatter.format(self.now(), entry);
        output
            .write_all(line.as_bytes())
            .context("Failed writing log line")?;
        output.flush().context("Failed flushing log sink")
    }

    pub fn into_inner(self) -> W {
        self.output
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn now(&self) -> NaiveDateTime {
        match self.timezone {
            Timezone::Local => chrono::Local::now().naive_local(),
            Timezone::Utc => chrono::Utc::now().naive_utc(),
        }
    }
}

impl Renderer<std::io::Stderr> {
    /// Renderer bound to standard error with the default configuration.
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write + Send> LogSink for Renderer<W> {
    fn write_log(&self, entry: &LogEntry) -> eyre::Result<()> {
        self.render(entry)
    }

    fn flush(&self) -> eyre::Result<()> {
        self.output
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()
            .context("Failed flushing log sink")
    }
}
