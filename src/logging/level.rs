use std::{fmt, str::FromStr};

/// Severity of a log entry, ordered from least to most important.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Level {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    fn from_ordinal(ordinal: u8) -> Option<Level> {
        match ordinal {
            0 => Some(Level::Debug),
            1 => Some(Level::Info),
            2 => Some(Level::Warn),
            3 => Some(Level::Error),
            4 => Some(Level::Fatal),
            _ => None,
        }
    }

    /// Canonical uppercase display token.
    pub fn name(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }
}

/// Resolves a raw severity ordinal to its display token.
///
/// Ordinals outside the known range resolve to `"UNKNOWN"` instead of failing,
/// so a misbehaving producer can never corrupt a rendered line.
pub fn level_name(ordinal: u8) -> &'static str {
    Level::from_ordinal(ordinal).map_or("UNKNOWN", Level::name)
}

impl TryFrom<u8> for Level {
    type Error = eyre::Report;

    fn try_from(ordinal: u8) -> Result<Self, eyre::Report> {
        Level::from_ordinal(ordinal)
            .ok_or_else(|| eyre::eyre!("Unknown severity ordinal {}", ordinal))
    }
}

impl FromStr for Level {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, eyre::Report> {
        if let Ok(ordinal) = s.parse::<u8>() {
            return Level::try_from(ordinal);
        }

        Level::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| eyre::eyre!("Unknown severity level '{}'", s))
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info => Level::Info,
            log::Level::Debug | log::Level::Trace => Level::Debug,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
