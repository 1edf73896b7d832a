//! Command-line argument formatting
//!
//! Turns an ordered map of flags into a string suitable for splicing into
//! a shell command.
//!
//! ```ignore
//! let a = Args::new().set("--verbose", true).set("-j", 4).set("--out", "dist");
//! assert_eq!(args(&a, &FormatOptions::default()), r#"--verbose -j 4 --out "dist""#);
//! ```

use crate::error::{Error, Result};
use std::fmt;

/// Value of a single argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// Presence-only flag. `false` emits nothing.
    Flag(bool),
    Int(i64),
    Float(f64),
    /// Emitted double-quoted, without escaping.
    Str(String),
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Flag(b) => write!(f, "{}", b),
            ArgValue::Int(n) => write!(f, "{}", n),
            ArgValue::Float(n) => write!(f, "{}", n),
            ArgValue::Str(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        ArgValue::Flag(b)
    }
}

macro_rules! int_arg {
    ($($t:ty),*) => {
        $(impl From<$t> for ArgValue {
            fn from(n: $t) -> Self {
                ArgValue::Int(n as i64)
            }
        })*
    };
}

int_arg!(i8, i16, i32, i64, u8, u16, u32);

// Values above i64::MAX saturate.
macro_rules! wide_int_arg {
    ($($t:ty),*) => {
        $(impl From<$t> for ArgValue {
            fn from(n: $t) -> Self {
                ArgValue::Int(i64::try_from(n).unwrap_or(i64::MAX))
            }
        })*
    };
}

wide_int_arg!(u64, usize, isize);

impl From<f64> for ArgValue {
    fn from(n: f64) -> Self {
        ArgValue::Float(n)
    }
}

impl From<f32> for ArgValue {
    fn from(n: f32) -> Self {
        ArgValue::Float(f64::from(n))
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::Str(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::Str(s)
    }
}

/// Ordered map from flag name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    entries: Vec<(String, ArgValue)>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an argument. A replaced argument keeps its position.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace an argument in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ArgValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build from a JSON object, keeping key order.
    ///
    /// Null, array and object values are rejected.
    pub fn from_json(map: &serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        use serde_json::Value;

        let mut args = Args::new();
        for (name, value) in map {
            let value = match value {
                Value::Bool(b) => ArgValue::Flag(*b),
                Value::Number(n) => match n.as_i64() {
                    Some(i) => ArgValue::Int(i),
                    None => ArgValue::Float(n.as_f64().unwrap_or(f64::NAN)),
                },
                Value::String(s) => ArgValue::Str(s.clone()),
                other => {
                    return Err(Error::UnsupportedArg {
                        name: name.clone(),
                        found: json_type(other).to_string(),
                    });
                }
            };
            args.insert(name.clone(), value);
        }
        Ok(args)
    }
}

impl<K, V> FromIterator<(K, V)> for Args
where
    K: Into<String>,
    V: Into<ArgValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Args::new();
        for (k, v) in iter {
            args.insert(k, v);
        }
        args
    }
}

fn json_type(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Options for [`args`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Placed between a name and its value.
    pub separator: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            separator: " ".to_string(),
        }
    }
}

impl FormatOptions {
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }
}

/// Format arguments as a space-separated string.
pub fn args(args: &Args, opts: &FormatOptions) -> String {
    let mut tokens = Vec::with_capacity(args.len());
    for (name, value) in args.iter() {
        match value {
            ArgValue::Flag(true) => tokens.push(name.to_string()),
            ArgValue::Flag(false) => {}
            other => tokens.push(format!("{}{}{}", name, opts.separator, other)),
        }
    }
    tokens.join(" ")
}
