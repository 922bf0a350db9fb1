use std::{
    collections::HashMap,
    fmt::{self, Display},
    sync::Arc,
};

use super::Level;

/// An attribute value that knows how to render itself as text.
#[derive(Clone)]
pub enum Value {
    Str(String),
    I64(i64),
    U64(u64),
    F64(f64),
    Bool(bool),
    Json(serde_json::Value),
    /// Anything else with a `Display` impl.
    Display(Arc<dyn Display + Send + Sync>),
}

impl Value {
    pub fn display(value: impl Display + Send + Sync + 'static) -> Self {
        Value::Display(Arc::new(value))
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::I64(n) => write!(f, "{}", n),
            Value::U64(n) => write!(f, "{}", n),
            Value::F64(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            // Strings unquoted so `name="value"` doesn't double up.
            Value::Json(serde_json::Value::String(s)) => f.write_str(s),
            Value::Json(json) => write!(f, "{}", json),
            Value::Display(inner) => inner.fmt(f),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::I64(n) => f.debug_tuple("I64").field(n).finish(),
            Value::U64(n) => f.debug_tuple("U64").field(n).finish(),
            Value::F64(n) => f.debug_tuple("F64").field(n).finish(),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Json(json) => f.debug_tuple("Json").field(json).finish(),
            Value::Display(_) => f.write_str("Display(..)"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::F64(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Value::Json(value)
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty, $($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value as $target)
                }
            }
        )*
    };
}

impl_from_int!(I64, i64, i8, i16, i32, i64, isize);
impl_from_int!(U64, u64, u8, u16, u32, u64, usize);

/// One structured event handed to the renderer.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    pub message: String,
    pub attributes: HashMap<String, Value>,
}

impl LogEntry {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            attributes: HashMap::new(),
        }
    }

    /// Adds an attribute, replacing any previous value under the same name.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}
