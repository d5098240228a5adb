//! Host-owned value tree carried by message events.
//!
//! The bridge never interprets values; it only forwards references to them.
//! The JSON conversions exist so embedders and tests can build argument lists
//! without spelling out every variant.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single value owned by the host.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Double(f64),
    String(String),
    ByteArray(Vec<u8>),
    List(Vec<Value>),
    Dict(BTreeMap<String, Value>),
}

impl Value {
    /// Parses a JSON document into a value tree.
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let json: serde_json::Value = serde_json::from_str(json)?;
        Ok(Self::from(json))
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Nil,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::UInt(u)
                } else {
                    Self::Double(n.as_f64().unwrap_or_default())
                }
            }
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Dict(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Self::UInt(u)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Self::Double(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn json_numbers_pick_narrowest_variant() {
        let v = Value::from_json_str("[1, 18446744073709551615, 1.5]").unwrap();
        assert_eq!(
            v,
            Value::List(vec![
                Value::Int(1),
                Value::UInt(u64::MAX),
                Value::Double(1.5),
            ])
        );
    }

    #[test]
    fn json_object_becomes_dict() {
        let v = Value::from_json_str(r#"{"a": null, "b": "x"}"#).unwrap();
        let mut expected = BTreeMap::new();
        expected.insert("a".to_string(), Value::Nil);
        expected.insert("b".to_string(), Value::String("x".into()));
        assert_eq!(v, Value::Dict(expected));
    }

    #[test]
    fn invalid_json_is_error() {
        assert!(Value::from_json_str("{").is_err());
    }

    #[test]
    fn default_is_nil() {
        assert!(Value::default().is_nil());
        assert_eq!(Value::from("hi").as_str(), Some("hi"));
    }
}
