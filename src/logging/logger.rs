use std::{collections::HashMap, io::Write, path::PathBuf};

use eyre::Context;
use log::{kv::VisitSource, LevelFilter, Log};

use super::{
    formatters::render_text,
    sinks::{open_log_file, NullSink},
    LogEntry, LogSink, Renderer, Value,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Timezone {
    #[default]
    Local,
    Utc,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Clock used to stamp each line at render time.
    pub timezone: Timezone,
    /// Color the level token.
    pub use_ansi: bool,
}

/// Bridges the `log` facade onto a [`LogSink`].
pub struct Logger {
    filter: LevelFilter,
    sink: Box<dyn LogSink>,
}

impl Logger {
    pub fn new(filter: LevelFilter, sink: Box<dyn LogSink>) -> Self {
        Self { filter, sink }
    }

    pub fn init(self) -> eyre::Result<()> {
        log::set_max_level(self.filter);
        log::set_boxed_logger(Box::new(self)).context("Failed registering boxed logger")?;

        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.filter >= metadata.level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // `Log::log` can't return errors, so stderr is the only place left to
        // report them.
        if let Err(err) = self.sink.write_log(&entry_from_record(record)) {
            eprintln!("logline: {}: {}", err, err.root_cause());
        }
    }

    fn flush(&self) {
        if let Err(err) = self.sink.flush() {
            eprintln!("logline: {}: {}", err, err.root_cause());
        }
    }
}

fn entry_from_record(record: &log::Record) -> LogEntry {
    let mut entry = LogEntry::new(record.level().into(), render_text(record.args()));
    let mut collector = AttributeCollector(&mut entry.attributes);

    // The collector never fails.
    let _ = record.key_values().visit(&mut collector);
    entry
}

struct AttributeCollector<'a>(&'a mut HashMap<String, Value>);

impl<'kvs> VisitSource<'kvs> for AttributeCollector<'_> {
    fn visit_pair(
        &mut self,
        key: log::kv::Key<'kvs>,
        value: log::kv::Value<'kvs>,
    ) -> Result<(), log::kv::Error> {
        self.0.insert(key.as_str().to_string(), kv_to_value(&value));
        Ok(())
    }
}

fn kv_to_value(value: &log::kv::Value) -> Value {
    if let Some(b) = value.to_bool() {
        Value::Bool(b)
    } else if let Some(n) = value.to_i64() {
        Value::I64(n)
    } else if let Some(n) = value.to_u64() {
        Value::U64(n)
    } else if let Some(n) = value.to_f64() {
        Value::F64(n)
    } else if let Some(s) = value.to_borrowed_str() {
        Value::Str(s.to_string())
    } else {
        Value::Str(render_text(value))
    }
}

type SinkConstructor = Box<dyn FnOnce(Config) -> eyre::Result<Box<dyn LogSink + 'static>>>;

pub struct Builder {
    filter: LevelFilter,
    constructor: SinkConstructor,
    config: Config,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            filter: LevelFilter::Off,
            constructor: Box::new(|_| Ok(Box::new(NullSink::new()))),
            config: Config::default(),
        }
    }

    pub fn with_level(self, filter: LevelFilter) -> Self {
        Self { filter, ..self }
    }

    pub fn with_config(self, config: Config) -> Self {
        Self { config, ..self }
    }

    pub fn with_file_sink(self, path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        Self {
            constructor: Box::new(move |config| {
                let file = open_log_file(&path)?;
                Ok(Box::new(Renderer::with_config(file, config)))
            }),
            ..self
        }
    }

    pub fn with_stderr_sink(self) -> Self {
        Self {
            constructor: Box::new(|config| {
                Ok(Box::new(Renderer::with_config(std::io::stderr(), config)))
            }),
            ..self
        }
    }

    pub fn with_writer<W>(self, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            constructor: Box::new(move |config| Ok(Box::new(Renderer::with_config(writer, config)))),
            ..self
        }
    }

    pub fn build(self) -> eyre::Result<Logger> {
        let sink = (self.constructor)(self.config)?;
        Ok(Logger::new(self.filter, sink))
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
