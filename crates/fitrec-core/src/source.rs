//! Sources that request arguments can be looked up from.
//!
//! Two kinds of payloads reach the extractor: decoded JSON bodies and
//! query-string/form pairs. Both implement [`ArgSource`], which looks a key up
//! and coerces the raw value into the declared [`FieldType`].

use axum::http::Uri;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::errors::ExtractError;
use crate::value::{FieldType, FieldValue};

/// Result of looking a single key up in an [`ArgSource`].
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// The key exists and its value has (or was coerced to) the declared type.
    Present(FieldValue),
    /// The key does not exist or holds `null`.
    Absent,
    /// The key exists but its value cannot be coerced to the declared type.
    Mismatched { expected: FieldType, found: String },
}

impl Lookup {
    pub fn into_value(self) -> Option<FieldValue> {
        match self {
            Lookup::Present(value) => Some(value),
            Lookup::Absent | Lookup::Mismatched { .. } => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Lookup::Present(_))
    }
}

/// Keyed lookup with type coercion.
pub trait ArgSource {
    fn lookup(&self, key: &str, ty: FieldType) -> Result<Lookup, ExtractError>;

    /// Looks `key` up using the type of `default`, yielding `default` unless
    /// the value is present and valid.
    fn lookup_or(&self, key: &str, default: &FieldValue) -> Result<FieldValue, ExtractError> {
        Ok(self
            .lookup(key, default.field_type())?
            .into_value()
            .unwrap_or_else(|| default.clone()))
    }
}

impl ArgSource for Map<String, Value> {
    fn lookup(&self, key: &str, ty: FieldType) -> Result<Lookup, ExtractError> {
        Ok(match self.get(key) {
            None | Some(Value::Null) => Lookup::Absent,
            Some(raw) => coerce_json(raw, ty),
        })
    }
}

impl ArgSource for Value {
    fn lookup(&self, key: &str, ty: FieldType) -> Result<Lookup, ExtractError> {
        match self {
            Value::Object(map) => map.lookup(key, ty),
            other => Err(ExtractError::UnsupportedSource(json_kind(other).to_string())),
        }
    }
}

fn coerce_json(raw: &Value, ty: FieldType) -> Lookup {
    if let (FieldType::DateTime, Value::String(text)) = (ty, raw) {
        return match parse_datetime(text) {
            Some(dt) => Lookup::Present(FieldValue::DateTime(dt)),
            None => Lookup::Mismatched {
                expected: ty,
                found: FieldType::Str.to_string(),
            },
        };
    }

    if let (FieldType::Int, Value::Number(n)) = (ty, raw) {
        if n.is_u64() && n.as_i64().is_none() {
            return Lookup::Mismatched {
                expected: ty,
                found: "int out of range".to_string(),
            };
        }
    }

    match FieldValue::from_json(raw) {
        Some(value) if value.field_type() == ty => Lookup::Present(value),
        Some(value) => Lookup::Mismatched {
            expected: ty,
            found: value.field_type().to_string(),
        },
        None => Lookup::Absent,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parses an ISO-like timestamp. Timezone offsets are discarded, keeping the
/// wall-clock time as written.
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }

    const OFFSET_FORMATS: [&str; 7] = [
        "%Y-%m-%dT%H:%M:%S%.f%z",
        "%Y-%m-%d %H:%M:%S%.f%z",
        "%Y-%m-%d %H:%M:%S%.f %z",
        "%Y-%m-%dT%H:%M%z",
        "%Y-%m-%d %H:%M%z",
        "%Y-%m-%d %H:%M %z",
        "%Y%m%dT%H%M%S%z",
    ];
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Some(dt.naive_local());
        }
    }

    const NAIVE_FORMATS: [&str; 6] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
        "%Y%m%dT%H%M%S",
        "%Y%m%dT%H%M",
    ];
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }

    ["%Y-%m-%d", "%Y%m%d"]
        .into_iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Multi-value mapping decoded from a query string or form body.
///
/// Keys may repeat; lookups use the first value and convert its text into the
/// declared type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryArgs {
    pairs: Vec<(String, String)>,
}

impl QueryArgs {
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Decodes an `application/x-www-form-urlencoded` string such as a query
    /// string without its leading `?`.
    pub fn from_query_str(query: &str) -> Self {
        Self::from_form_bytes(query.as_bytes())
    }

    /// Decodes a urlencoded form body.
    pub fn from_form_bytes(body: &[u8]) -> Self {
        Self {
            pairs: form_urlencoded::parse(body).into_owned().collect(),
        }
    }

    /// Decodes the query component of `uri`. A URI without a query is empty.
    pub fn from_uri(uri: &Uri) -> Self {
        uri.query().map(Self::from_query_str).unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl ArgSource for QueryArgs {
    fn lookup(&self, key: &str, ty: FieldType) -> Result<Lookup, ExtractError> {
        Ok(match self.get(key) {
            None => Lookup::Absent,
            Some(text) => match coerce_text(text, ty) {
                Some(value) => Lookup::Present(value),
                None => Lookup::Mismatched {
                    expected: ty,
                    found: FieldType::Str.to_string(),
                },
            },
        })
    }
}

fn coerce_text(text: &str, ty: FieldType) -> Option<FieldValue> {
    match ty {
        FieldType::Str => Some(FieldValue::Str(text.to_string())),
        FieldType::Int => text.trim().parse().ok().map(FieldValue::Int),
        FieldType::Float => text.trim().parse().ok().map(FieldValue::Float),
        FieldType::Bool => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(FieldValue::Bool(true)),
            "false" | "0" => Some(FieldValue::Bool(false)),
            _ => None,
        },
        FieldType::DateTime => parse_datetime(text).map(FieldValue::DateTime),
        FieldType::List | FieldType::Map => None,
    }
}
