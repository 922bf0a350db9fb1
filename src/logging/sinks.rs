use std::{fs::File, io::LineWriter, path::Path};

use eyre::Context;

use super::{LogEntry, LogSink};

/// Opens `path` for appending, creating it if needed.
///
/// Creation and permissions stay with the caller; the renderer only ever
/// receives the opened writer.
pub fn open_log_file(path: impl AsRef<Path>) -> eyre::Result<LineWriter<File>> {
    let path = path.as_ref();
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed opening or creating log file {}", path.display()))?;

    Ok(LineWriter::new(file))
}

pub struct NullSink {}

impl NullSink {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for NullSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for NullSink {
    fn write_log(&self, _entry: &LogEntry) -> eyre::Result<()> {
        Ok(())
    }

    fn flush(&self) -> eyre::Result<()> {
        Ok(())
    }
}
