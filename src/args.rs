use std::{io::IsTerminal, path::PathBuf};

use clap::{Parser, ValueEnum};
use logline::{Config, Level, LogEntry, Timezone, Value};

#[derive(Parser, Debug)]
#[command(version)]
#[command(about = "Render a structured log entry as a single line.", long_about = None)]
pub struct Args {
    #[arg(
        short,
        long,
        default_value = "info",
        value_parser = parse_level,
        help = "Severity, by name (debug, info, warn, error, fatal) or ordinal (0-4)."
    )]
    pub level: Level,

    #[arg(long, help = "Stamp the line in UTC instead of local time.")]
    pub utc: bool,

    #[arg(
        long,
        value_enum,
        default_value_t = ColorChoice::Never,
        default_missing_value = "always",
        num_args = 0..=1,
        require_equals = true,
        help = "Color the level name. `auto` colors only when stderr is a terminal."
    )]
    pub color: ColorChoice,

    #[arg(
        short,
        long,
        help = "Append to this file instead of writing to stderr."
    )]
    pub file: Option<PathBuf>,

    #[arg(index = 1)]
    pub message: String,

    #[arg(index = 2, value_name = "KEY=VALUE", value_parser = parse_attribute)]
    pub attributes: Vec<(String, Value)>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl Args {
    pub fn config(&self) -> Config {
        Config {
            timezone: if self.utc {
                Timezone::Utc
            } else {
                Timezone::Local
            },
            use_ansi: self.use_ansi(std::io::stderr().is_terminal()),
        }
    }

    fn use_ansi(&self, stderr_is_terminal: bool) -> bool {
        match self.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            // Files never get escape codes.
            ColorChoice::Auto => self.file.is_none() && stderr_is_terminal,
        }
    }

    pub fn entry(&self) -> LogEntry {
        self.attributes
            .iter()
            .cloned()
            .fold(LogEntry::new(self.level, self.message.clone()), |entry, (k, v)| {
                entry.with(k, v)
            })
    }
}

fn parse_level(level: &str) -> eyre::Result<Level> {
    level.parse()
}

fn parse_attribute(attribute: &str) -> eyre::Result<(String, Value)> {
    let (name, value) = attribute
        .split_once('=')
        .ok_or_else(|| eyre::eyre!("Expected KEY=VALUE, got '{}'", attribute))?;

    if name.is_empty() {
        return Err(eyre::eyre!("Attribute name can't be empty: '{}'", attribute));
    }

    // Values stay exactly as typed.
    Ok((name.to_string(), Value::Str(value.to_string())))
}
