//! Structured values for state entries and turn metadata.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A constrained, round-trippable value: scalars, lists, and nested maps.
///
/// Variant order matters for deserialization: integers must be tried before
/// floats so that whole-number JSON tokens stay integral.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ContextValue {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Integer(i64),
    /// Floating point value.
    Float(f64),
    /// Text value.
    String(String),
    /// Ordered list of values.
    List(Vec<ContextValue>),
    /// Nested string-keyed mapping.
    Map(BTreeMap<String, ContextValue>),
}

impl ContextValue {
    /// Borrow the value as a string if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ContextValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// Return the value as an integer if it is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ContextValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Return the value as a boolean if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ContextValue::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextValue::Bool(value) => write!(f, "{value}"),
            ContextValue::Integer(value) => write!(f, "{value}"),
            ContextValue::Float(value) => write!(f, "{value}"),
            ContextValue::String(value) => write!(f, "{value}"),
            ContextValue::List(values) => {
                let parts = values.iter().map(|v| v.to_string()).collect::<Vec<_>>();
                write!(f, "[{}]", parts.join(", "))
            }
            ContextValue::Map(map) => {
                let parts = map
                    .iter()
                    .map(|(key, value)| format!("{key}: {value}"))
                    .collect::<Vec<_>>();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        ContextValue::String(value.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        ContextValue::String(value)
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        ContextValue::Bool(value)
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        ContextValue::Integer(value)
    }
}

impl From<f64> for ContextValue {
    fn from(value: f64) -> Self {
        ContextValue::Float(value)
    }
}

impl<T: Into<ContextValue>> From<Vec<T>> for ContextValue {
    fn from(values: Vec<T>) -> Self {
        ContextValue::List(values.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::ContextValue;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    #[test]
    fn scalar_round_trips_preserve_variants() {
        let values = vec![
            ContextValue::Bool(true),
            ContextValue::Integer(42),
            ContextValue::Float(0.5),
            ContextValue::String("moderate".to_string()),
        ];
        for value in values {
            let json = serde_json::to_string(&value).expect("serialize");
            let parsed: ContextValue = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(parsed, value);
        }
    }

    #[test]
    fn nested_map_round_trips() {
        let mut inner = BTreeMap::new();
        inner.insert("count".to_string(), ContextValue::Integer(3));
        inner.insert("flagged".to_string(), ContextValue::Bool(false));
        let value = ContextValue::Map(inner);

        let json = serde_json::to_string(&value).expect("serialize");
        let parsed: ContextValue = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, value);
    }

    #[test]
    fn whole_numbers_stay_integral() {
        let parsed: ContextValue = serde_json::from_str("7").expect("deserialize");
        assert_eq!(parsed, ContextValue::Integer(7));
        assert_eq!(parsed.as_i64(), Some(7));
    }

    #[test]
    fn display_renders_nested_values() {
        let value = ContextValue::List(vec![
            ContextValue::String("fever".to_string()),
            ContextValue::String("cough".to_string()),
        ]);
        assert_eq!(value.to_string(), "[fever, cough]");
    }
}
