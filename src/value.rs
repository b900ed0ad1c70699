//! Structured literal values.
//!
//! [`Value`] backs a variable's `init` field. It is *not* used for
//! `control.expr` or event-action `value` strings — those are raw JS
//! expression text, embedded verbatim by design.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A JSON-shaped literal, serializable both to the persisted IR snapshot
/// and to a JS literal expression by the compiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(IndexMap<String, Value>),
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    /// Emits this value as a JS literal expression.
    ///
    /// Strings are JSON-quoted (JSON string escaping coincides with JS
    /// string escaping for the character set `serde_json` produces).
    /// Numbers and booleans print in their textual form. Arrays and
    /// records recurse. `Null` prints as `null`.
    pub fn emit(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::String(s) => serde_json::to_string(s).expect("string serialization is infallible"),
            Value::Array(items) => {
                let parts: Vec<String> = items.iter().map(Value::emit).collect();
                format!("[{}]", parts.join(", "))
            }
            Value::Object(fields) => {
                let parts: Vec<String> = fields
                    .iter()
                    .map(|(k, v)| format!("{}: {}", property_key(k), v.emit()))
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Quotes an object key only when it isn't already a valid JS identifier.
fn property_key(key: &str) -> String {
    let is_ident = !key.is_empty()
        && key
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if is_ident {
        key.to_string()
    } else {
        serde_json::to_string(key).expect("string serialization is infallible")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_primitives() {
        assert_eq!(Value::Null.emit(), "null");
        assert_eq!(Value::Bool(true).emit(), "true");
        assert_eq!(Value::Number(0.0).emit(), "0");
        assert_eq!(Value::Number(1.5).emit(), "1.5");
        assert_eq!(Value::String("x\"y".into()).emit(), "\"x\\\"y\"");
    }

    #[test]
    fn emits_array_recursively() {
        let v = Value::Array(vec![Value::string("x"), Value::string("y")]);
        assert_eq!(v.emit(), r#"["x", "y"]"#);
    }

    #[test]
    fn emits_object_with_bare_and_quoted_keys() {
        let mut fields = IndexMap::new();
        fields.insert("label".to_string(), Value::string("Hi"));
        fields.insert("data-id".to_string(), Value::number(3.0));
        let v = Value::Object(fields);
        assert_eq!(v.emit(), r#"{label: "Hi", "data-id": 3}"#);
    }
}
