//! Values accepted by the conversion engine
//!
//! A value is a single number, a numeric string, or a homogeneous
//! collection of numbers. The shape is resolved once, by matching on
//! [`Value`], and each shape has its own conversion path.

use std::collections::BTreeMap;
use std::fmt;
use serde::{Deserialize, Serialize};

use crate::error::ConversionError;

/// Input (and output) of a shape-polymorphic conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    /// Textual representation of one number
    Text(String),
    /// Ordered, mutable sequence
    List(Vec<Value>),
    /// Key-ordered mapping
    Map(BTreeMap<String, Value>),
    /// Ordered collection that is rebuilt, never mutated in place
    Tuple(Vec<Value>),
}

impl Value {
    // ========== Safe Accessors (never panic) ==========

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) | Value::Tuple(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Number(_) => "Number",
            Value::Text(_) => "Text",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
            Value::Tuple(_) => "Tuple",
        }
    }

    /// Build a tuple from any iterator of numbers
    pub fn tuple<I: IntoIterator<Item = f64>>(values: I) -> Self {
        Value::Tuple(values.into_iter().map(Value::Number).collect())
    }

    /// Read this value as one number.
    ///
    /// Text is trimmed and parsed; anything else that is not a number fails
    /// with `UnsupportedType`.
    pub fn to_scalar(&self) -> Result<f64, ConversionError> {
        match self {
            Value::Number(n) => Ok(*n),
            Value::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                ConversionError::unsupported("Text", format!("'{}' is not a number", s))
            }),
            other => Err(ConversionError::unsupported(
                other.type_name(),
                "expected a number or numeric text",
            )),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<f64>> for Value {
    fn from(values: Vec<f64>) -> Self {
        Value::List(values.into_iter().map(Value::Number).collect())
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Value::Map(iter.into_iter().map(|(k, v)| (k.into(), Value::Number(v))).collect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
            Value::List(items) => write_items(f, "[", items, "]"),
            Value::Tuple(items) => write_items(f, "(", items, ")"),
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, open: &str, items: &[Value], close: &str) -> fmt::Result {
    write!(f, "{}", open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "{}", close)
}
