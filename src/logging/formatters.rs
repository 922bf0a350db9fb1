use std::{
    collections::HashMap,
    fmt::{Display, Write},
};

use chrono::NaiveDateTime;
use yansi::Paint;

use super::{logger::Config, Level, LogEntry, Value};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Written in place of a value whose `Display` impl reports an error.
pub const UNRENDERABLE: &str = "<unrenderable>";

/// Attribute pairs ordered by name, byte-wise.
pub fn sorted_attributes(attributes: &HashMap<String, Value>) -> Vec<(&str, &Value)> {
    let mut fields: Vec<_> = attributes
        .iter()
        .map(|(name, value)| (name.as_str(), value))
        .collect();

    fields.sort_unstable_by(|a, b| a.0.cmp(b.0));
    fields
}

#[derive(Debug, Clone)]
pub struct LineFormatter {
    config: Config,
}

impl LineFormatter {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Renders `entry` as one newline-terminated line stamped with `now`.
    pub fn format(&self, now: NaiveDateTime, entry: &LogEntry) -> String {
        let mut line = String::with_capacity(64 + entry.message.len());

        // Writing into a String only fails if a Display impl does, and none
        // of these can.
        let _ = write!(line, "{} ", now.format(TIMESTAMP_FORMAT));
        self.format_level(&mut line, entry.level);
        let _ = write!(line, " {} {}", entry.level.ordinal(), entry.message);

        for (name, value) in sorted_attributes(&entry.attributes) {
            line.push(' ');
            line.push_str(name);
            line.push_str("=\"");
            format_value(&mut line, value);
            line.push('"');
        }

        line.push('\n');
        line
    }

    fn format_level(&self, line: &mut String, level: Level) {
        let name = level.name();

        if !self.config.use_ansi {
            line.push_str(name);
            return;
        }

        let _ = match level {
            Level::Debug => write!(line, "{}", name.blue()),
            Level::Info => write!(line, "{}", name.green()),
            Level::Warn => write!(line, "{}", name.yellow()),
            Level::Error => write!(line, "{}", name.red()),
            Level::Fatal => write!(line, "{}", name.red().bold()),
        };
    }
}

fn format_value(line: &mut String, value: &Value) {
    line.push_str(&render_text(value));
}

/// Like `to_string`, but a failing `Display` impl yields [`UNRENDERABLE`]
/// instead of a panic.
pub fn render_text(value: &dyn Display) -> String {
    let mut text = String::new();

    match write!(text, "{}", value) {
        Ok(()) => text,
        Err(_) => UNRENDERABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use chrono::NaiveDate;

    use super::*;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_milli_opt(10, 15, 30, 123)
            .unwrap()
    }

    fn plain() -> LineFormatter {
        LineFormatter::new(Config::default())
    }

    #[test]
    fn formats_attributes_sorted_by_name() {
        let entry = LogEntry::new(Level::Info, "listening")
            .with("port", 8080)
            .with("host", "0.0.0.0");

        assert_eq!(
            plain().format(at(), &entry),
            "2024-03-01 10:15:30.123 INFO 1 listening host=\"0.0.0.0\" port=\"8080\"\n"
        );
    }

    #[test]
    fn no_attribute_segment_without_attributes() {
        let entry = LogEntry::new(Level::Error, "boom");

        assert_eq!(
            plain().format(at(), &entry),
            "2024-03-01 10:15:30.123 ERROR 3 boom\n"
        );
    }

    #[test]
    fn empty_message_keeps_field_layout() {
        let entry = LogEntry::new(Level::Debug, "");
        assert_eq!(plain().format(at(), &entry), "2024-03-01 10:15:30.123 DEBUG 0 \n");
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let a = LogEntry::new(Level::Warn, "w")
            .with("b", 2)
            .with("a", 1)
            .with("c", true);
        let b = LogEntry::new(Level::Warn, "w")
            .with("c", true)
            .with("a", 1)
            .with("b", 2);

        assert_eq!(plain().format(at(), &a), plain().format(at(), &b));
    }

    #[test]
    fn ordering_is_case_sensitive_bytewise() {
        let mut attributes = HashMap::new();
        attributes.insert("b".to_string(), Value::from(1));
        attributes.insert("B".to_string(), Value::from(2));
        attributes.insert("_".to_string(), Value::from(3));
        attributes.insert("a".to_string(), Value::from(4));

        let names: Vec<_> = sorted_attributes(&attributes)
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["B", "_", "a", "b"]);
        assert!(sorted_attributes(&HashMap::new()).is_empty());
    }

    #[test]
    fn quotes_are_not_escaped() {
        let entry = LogEntry::new(Level::Info, "say \"hi\"").with("quote", "a\"b");
        assert_eq!(
            plain().format(at(), &entry),
            "2024-03-01 10:15:30.123 INFO 1 say \"hi\" quote=\"a\"b\"\n"
        );
    }

    struct Broken;

    impl fmt::Display for Broken {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn unrenderable_value_falls_back_to_placeholder() {
        let entry = LogEntry::new(Level::Fatal, "bad field")
            .with("broken", Value::display(Broken))
            .with("ok", 1);

        assert_eq!(
            plain().format(at(), &entry),
            "2024-03-01 10:15:30.123 FATAL 4 bad field broken=\"<unrenderable>\" ok=\"1\"\n"
        );
    }

    #[test]
    fn ansi_only_touches_level_token() {
        let formatter = LineFormatter::new(Config {
            use_ansi: true,
            ..Config::default()
        });
        let entry = LogEntry::new(Level::Error, "boom").with("k", "v");
        let line = formatter.format(at(), &entry);

        assert!(line.starts_with("2024-03-01 10:15:30.123 "));
        assert!(line.contains("ERROR"));
        assert!(line.contains("\x1b["), "level not colored: {:?}", line);
        assert_ne!(line, plain().format(at(), &entry));
        assert!(line.ends_with(" 3 boom k=\"v\"\n"));
    }
}
