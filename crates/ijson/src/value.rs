//! JSON value types and utilities.
//!
//! This module defines the [`Value`] enum, which represents any valid JSON
//! value, and provides helper functions for escaping JSON strings.
use alloc::{string::String, vec::Vec};

use crate::number::NumberValue;

#[cfg(feature = "preserve_order")]
/// The concrete map type backing [`Value::Object`].
///
/// An insertion-ordered `IndexMap` by default (spec.md §4.4: "default: an
/// insertion-ordered mapping"). Building without the `preserve_order`
/// feature swaps in a `BTreeMap` sorted by key instead, mirroring
/// `serde_json`'s own `preserve_order` feature (spec.md §9, "configurable map
/// type").
pub type Map = indexmap::IndexMap<String, Value>;

#[cfg(not(feature = "preserve_order"))]
/// The concrete map type backing [`Value::Object`]; see the `preserve_order`
/// feature for the insertion-ordered alternative.
pub type Map = alloc::collections::BTreeMap<String, Value>;

/// An array of JSON values.
pub type Array = Vec<Value>;

/// A JSON value as defined by [RFC 8259].
///
/// # Examples
///
/// ```
/// use ijson::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key".into(), Value::String("value".into()));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"key":"value"}"#);
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// `null`.
    Null,
    /// `true` or `false`.
    Boolean(bool),
    /// A JSON number, arbitrary precision (see [`NumberValue`]).
    Number(NumberValue),
    /// A JSON string.
    String(String),
    /// A JSON array.
    Array(Array),
    /// A JSON object.
    Object(Map),
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<NumberValue> for Value {
    fn from(v: NumberValue) -> Self {
        Self::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Value::Boolean`].
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` if the value is [`Value::Number`].
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(..))
    }

    /// Returns `true` if the value is [`Value::String`].
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Value::Array`].
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Value::Object`].
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }
}

/// Escapes control characters in a string for inclusion in a JSON string
/// literal.
///
/// Writes to the provided formatter, replacing quotes, backslashes, control
/// characters (<= U+001F), and Unicode line separators with their JSON
/// escape sequences.
pub(crate) fn write_escaped_string<W: core::fmt::Write>(
    src: &str,
    f: &mut W,
) -> core::fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{08}' => f.write_str("\\b")?,
            '\u{0C}' => f.write_str("\\f")?,
            '\u{2028}' | '\u{2029}' => write!(f, "\\u{:04X}", c as u32)?,
            c if c.is_control() && (c as u32) <= 0xFFFF => write!(f, "\\u{:04X}", c as u32)?,
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

/// Escapes control characters in a string for inclusion in a JSON string
/// literal and returns the result.
pub(crate) fn escape_string(src: &str) -> String {
    let mut result = String::with_capacity(src.len() + 2);
    write_escaped_string(src, &mut result).expect("writing to a String cannot fail");
    result
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "\"{}\"", escape_string(s)),
            Self::Array(arr) => {
                f.write_str("[")?;
                let mut first = true;
                for v in arr {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Self::Object(map) => {
                f.write_str("{")?;
                let mut first = true;
                for (k, v) in map {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "\"{}\":{}", escape_string(k), v)?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips_nested_structure() {
        let mut inner = Map::new();
        inner.insert("b".into(), Value::Number(NumberValue::from(1i64)));
        let mut outer = Map::new();
        outer.insert("a".into(), Value::Array(alloc::vec![Value::Object(inner)]));
        let v = Value::Object(outer);
        assert_eq!(v.to_string(), r#"{"a":[{"b":1}]}"#);
    }

    #[test]
    fn display_escapes_control_characters() {
        let v = Value::String("a\nb\tc\"d".into());
        assert_eq!(v.to_string(), r#""a\nb\tc\"d""#);
    }
}
