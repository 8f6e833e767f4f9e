//! Attribute values and key/value pairs.

use std::error::Error;
use std::fmt;
use std::time::Duration;

/// Renderable attribute value.
///
/// The set is closed; anything else goes through [`Value::display`] and is
/// stored as its `Display` text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    /// Rendered like `500ms` or `1.5s`.
    Duration(Duration),
    /// An error's `Display` text.
    Error(String),
}

impl Value {
    /// Stringify any `Display` value.
    pub fn display(value: impl fmt::Display) -> Self {
        Value::Str(value.to_string())
    }

    pub fn error(err: &(dyn Error + 'static)) -> Self {
        Value::Error(err.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) | Value::Error(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{n}"),
            Value::Uint(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Duration(d) => write!(f, "{d:?}"),
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

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Str(value.clone())
    }
}

macro_rules! value_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Value {
                fn from(value: $source) -> Self {
                    Value::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

value_from!(Int as i64: i8, i16, i32, i64);
value_from!(Uint as u64: u8, u16, u32, u64);
value_from!(Float as f64: f32, f64);

impl From<isize> for Value {
    fn from(value: isize) -> Self {
        Value::Int(value as i64)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Uint(value as u64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Duration> for Value {
    fn from(value: Duration) -> Self {
        Value::Duration(value)
    }
}

impl From<std::io::Error> for Value {
    fn from(value: std::io::Error) -> Self {
        Value::Error(value.to_string())
    }
}

impl From<&anyhow::Error> for Value {
    fn from(value: &anyhow::Error) -> Self {
        Value::Error(format!("{value:#}"))
    }
}

/// A key/value pair attached to a record or bound to a handler.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
