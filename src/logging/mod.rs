mod entry;
mod formatters;
mod level;
mod logger;
mod renderer;
mod sinks;

pub use entry::{LogEntry, Value};
pub use formatters::{sorted_attributes, LineFormatter};
pub use level::{level_name, Level};
pub use logger::{Builder, Config, Logger, Timezone};
pub use renderer::Renderer;
pub use sinks::{open_log_file, NullSink};

pub trait LogSink: Sync + Send {
    fn write_log(&self, entry: &LogEntry) -> eyre::Result<()>;
    fn flush(&self) -> eyre::Result<()>;
}
