//! Typed field values produced by argument extraction.
//!
//! Request payloads arrive as untyped JSON or query-string text. The extractor
//! converts them into [`FieldValue`]s tagged with a [`FieldType`], and collects
//! the results in an [`Args`] mapping.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::{Map, Value};

/// The declared type of a request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Bool,
    Int,
    Float,
    Str,
    /// Timestamp without timezone. Textual input is parsed, offsets are dropped.
    DateTime,
    List,
    Map,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Bool => "bool",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Str => "str",
            FieldType::DateTime => "datetime",
            FieldType::List => "list",
            FieldType::Map => "map",
        };
        f.write_str(name)
    }
}

/// A request field value with a known [`FieldType`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    /// JSON integers above `i64::MAX` can't be represented and never satisfy
    /// [`FieldType::Int`].
    Int(i64),
    Float(f64),
    Str(String),
    DateTime(NaiveDateTime),
    List(Vec<Value>),
    Map(Map<String, Value>),
}

impl FieldValue {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Bool(_) => FieldType::Bool,
            FieldValue::Int(_) => FieldType::Int,
            FieldValue::Float(_) => FieldType::Float,
            FieldValue::Str(_) => FieldType::Str,
            FieldValue::DateTime(_) => FieldType::DateTime,
            FieldValue::List(_) => FieldType::List,
            FieldValue::Map(_) => FieldType::Map,
        }
    }

    /// Converts a JSON value without any coercion. `null` has no field value.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(FieldValue::Bool(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(FieldValue::Int(i)),
                None => n.as_f64().map(FieldValue::Float),
            },
            Value::String(s) => Some(FieldValue::Str(s.clone())),
            Value::Array(items) => Some(FieldValue::List(items.clone())),
            Value::Object(map) => Some(FieldValue::Map(map.clone())),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            FieldValue::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        FieldValue::DateTime(value)
    }
}

impl From<Vec<Value>> for FieldValue {
    fn from(value: Vec<Value>) -> Self {
        FieldValue::List(value)
    }
}

impl From<Map<String, Value>> for FieldValue {
    fn from(value: Map<String, Value>) -> Self {
        FieldValue::Map(value)
    }
}

/// Output of argument extraction: field name to typed value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Args(BTreeMap<String, FieldValue>);

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_str)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(FieldValue::as_i64)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(FieldValue::as_f64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(FieldValue::as_bool)
    }

    pub fn get_datetime(&self, key: &str) -> Option<NaiveDateTime> {
        self.get(key).and_then(FieldValue::as_datetime)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.0.remove(key)
    }

    /// Copies every entry of `other` into `self`, overwriting on collision.
    pub fn merge(&mut self, other: Args) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_inner(self) -> BTreeMap<String, FieldValue> {
        self.0
    }
}

impl<K, V> FromIterator<(K, V)> for Args
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_numbers() {
        assert_eq!(FieldValue::from_json(&json!(1)), Some(FieldValue::Int(1)));
        assert_eq!(
            FieldValue::from_json(&json!(1.5)),
            Some(FieldValue::Float(1.5))
        );
        assert_eq!(FieldValue::from_json(&Value::Null), None);
    }

    #[test]
    fn test_bool_is_not_int() {
        let value = FieldValue::from_json(&json!(true)).unwrap();
        assert_eq!(value.field_type(), FieldType::Bool);
        assert_eq!(value.as_i64(), None);
    }

    #[test]
    fn test_args_serialize() {
        let args: Args = [("b", FieldValue::from("c")), ("a", FieldValue::from(1))]
            .into_iter()
            .collect();
        let serialized = serde_json::to_value(&args).unwrap();
        assert_eq!(serialized, json!({"a": 1, "b": "c"}));
    }

    #[test]
    fn test_datetime_serializes_as_string() {
        let dt = NaiveDateTime::parse_from_str("2018-01-02 03:04:05", "%Y-%m-%d %H:%M:%S").unwrap();
        let serialized = serde_json::to_value(FieldValue::from(dt)).unwrap();
        assert_eq!(serialized, json!("2018-01-02T03:04:05"));
    }

    #[test]
    fn test_merge_overwrites() {
        let mut args: Args = [("a", 1), ("b", 2)].into_iter().collect();
        args.merge([("b", 3)].into_iter().collect());
        assert_eq!(args.get_i64("a"), Some(1));
        assert_eq!(args.get_i64("b"), Some(3));
        assert_eq!(args.len(), 2);
    }
}
