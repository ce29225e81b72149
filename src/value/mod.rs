//! The untyped value model used at the module configuration boundary.
//!
//! Module configuration arrives as plain data produced by a module author:
//! JSON-like scalars, arrays and objects, plus two things JSON cannot carry:
//! regular-expression objects (used for CORS origins) and callables (request
//! log configurers, state validators, manifest factories). [`ConfigValue`]
//! models all of them.
//!
//! Objects are [`ConfigMap`]s, which keep insertion order so that "unknown
//! key" violations are reported in the order the author wrote them. Equality
//! on maps ignores order.
//!
//! # Examples
//!
//! ```rust
//! use modcfg::value::ConfigValue;
//! use serde_json::json;
//!
//! let config = ConfigValue::from(json!({ "csp": "default-src 'self';" }))
//!     .with("createSsrFetch", ConfigValue::function(1, |args| Ok(args[0].clone())));
//!
//! assert_eq!(config.get("csp").and_then(ConfigValue::as_str), Some("default-src 'self';"));
//! assert!(config.get("createSsrFetch").and_then(ConfigValue::as_callable).is_some());
//! ```

mod callable;

pub use callable::{Callable, CallableFn};

use indexmap::IndexMap;
use regex::Regex;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

/// Insertion-ordered object representation.
pub type ConfigMap = IndexMap<String, ConfigValue>;

/// A configuration value as supplied by a module.
#[derive(Clone, Debug)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<ConfigValue>),
    Object(ConfigMap),
    /// A regular-expression object, e.g. a CORS origin matcher.
    Regex(Regex),
    /// An invocable capability.
    Function(Callable),
}

impl ConfigValue {
    /// Build an object value from key/value pairs, preserving their order.
    pub fn object<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<ConfigValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Object(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Wrap a closure as a function value.
    pub fn function<F>(arity: usize, func: F) -> Self
    where
        F: Fn(&[ConfigValue]) -> Result<ConfigValue, String> + Send + Sync + 'static,
    {
        Self::Function(Callable::new(arity, func))
    }

    /// Compile `pattern` into a regex value.
    ///
    /// # Errors
    ///
    /// Returns the regex compilation error for invalid patterns.
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self::Regex)
    }

    /// Return this value with `key` set to `value`.
    ///
    /// A non-object receiver is replaced by an empty object first, which keeps
    /// fixture construction in tests short.
    #[must_use]
    pub fn with(self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        let mut map = match self {
            Self::Object(map) => map,
            _ => ConfigMap::new(),
        };
        map.insert(key.into(), value.into());
        Self::Object(map)
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ConfigValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub const fn as_object(&self) -> Option<&ConfigMap> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub const fn as_callable(&self) -> Option<&Callable> {
        match self {
            Self::Function(callable) => Some(callable),
            _ => None,
        }
    }

    /// Look up `key` when this value is an object.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.as_object().and_then(|map| map.get(key))
    }
}

impl PartialEq for ConfigValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::Regex(a), Self::Regex(b)) => a.as_str() == b.as_str(),
            (Self::Function(a), Self::Function(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => fmt_number(*n, f),
            Self::String(s) => f.write_str(s),
            Self::Array(_) | Self::Object(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
            Self::Regex(re) => write!(f, "/{}/", re.as_str()),
            Self::Function(callable) => write!(f, "{callable:?}"),
        }
    }
}

fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{n}")
    }
}

impl From<serde_json::Value> for ConfigValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(value: Vec<ConfigValue>) -> Self {
        Self::Array(value)
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(value: ConfigMap) -> Self {
        Self::Object(value)
    }
}

impl From<Callable> for ConfigValue {
    fn from(value: Callable) -> Self {
        Self::Function(value)
    }
}

impl From<Regex> for ConfigValue {
    fn from(value: Regex) -> Self {
        Self::Regex(value)
    }
}

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            Self::Regex(re) => serializer.serialize_str(&format!("/{}/", re.as_str())),
            Self::Function(_) => serializer.serialize_str("[Function]"),
        }
    }
}

impl<'de> Deserialize<'de> for ConfigValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}
