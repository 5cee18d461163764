// used for persistence
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};

// used for date-time attributes
use chrono::NaiveDateTime;
// used for structured attributes
use serde_json::Value as JsonValue;

// used to print out readable forms of a value
use std::fmt;

use crate::custom::{CastObject, CustomCast};

/// A value in the form the attribute store keeps it.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Boolean(bool),
}

impl RawValue {
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(s) => Some(s),
            _ => None,
        }
    }
    /// The textual rendering used whenever a raw value has to be read as text
    /// (JSON decoding, date parsing, custom codecs).
    pub fn to_text(&self) -> String {
        match self {
            RawValue::Null => String::new(),
            RawValue::Integer(i) => i.to_string(),
            RawValue::Real(r) => r.to_string(),
            RawValue::Text(s) => s.clone(),
            RawValue::Boolean(true) => String::from("1"),
            RawValue::Boolean(false) => String::new(),
        }
    }
    pub fn type_name(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::Integer(_) => "integer",
            RawValue::Real(_) => "real",
            RawValue::Text(_) => "text",
            RawValue::Boolean(_) => "boolean",
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RawValue::Null => write!(f, "null"),
            other => write!(f, "{}", other.to_text()),
        }
    }
}
impl From<i64> for RawValue {
    fn from(i: i64) -> Self {
        RawValue::Integer(i)
    }
}
impl From<i32> for RawValue {
    fn from(i: i32) -> Self {
        RawValue::Integer(i64::from(i))
    }
}
impl From<f64> for RawValue {
    fn from(r: f64) -> Self {
        RawValue::Real(r)
    }
}
impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Boolean(b)
    }
}
impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}
impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}
impl ToSql for RawValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            RawValue::Null => ToSqlOutput::Owned(Value::Null),
            RawValue::Integer(i) => ToSqlOutput::from(*i),
            RawValue::Real(r) => ToSqlOutput::from(*r),
            RawValue::Text(s) => ToSqlOutput::from(s.as_str()),
            RawValue::Boolean(b) => ToSqlOutput::from(*b),
        })
    }
}
impl FromSql for RawValue {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Null => Ok(RawValue::Null),
            ValueRef::Integer(i) => Ok(RawValue::Integer(i)),
            ValueRef::Real(r) => Ok(RawValue::Real(r)),
            ValueRef::Text(_) => Ok(RawValue::Text(value.as_str()?.to_string())),
            ValueRef::Blob(_) => Err(FromSqlError::InvalidType),
        }
    }
}

/// Collection wrapper handed out for `collection` casts. Holds either a JSON
/// array or a JSON object, so keys survive a round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection(JsonValue);

impl Collection {
    pub fn new(items: JsonValue) -> Self {
        match items {
            JsonValue::Null => Collection(JsonValue::Array(Vec::new())),
            JsonValue::Array(_) | JsonValue::Object(_) => Collection(items),
            scalar => Collection(JsonValue::Array(vec![scalar])),
        }
    }
    pub fn len(&self) -> usize {
        match &self.0 {
            JsonValue::Array(a) => a.len(),
            JsonValue::Object(o) => o.len(),
            _ => 0,
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Object members are looked up by key, array members by their index.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        match &self.0 {
            JsonValue::Object(o) => o.get(key),
            JsonValue::Array(a) => key.parse::<usize>().ok().and_then(|i| a.get(i)),
            _ => None,
        }
    }
    pub fn values(&self) -> Vec<&JsonValue> {
        match &self.0 {
            JsonValue::Array(a) => a.iter().collect(),
            JsonValue::Object(o) => o.values().collect(),
            _ => Vec::new(),
        }
    }
    pub fn as_json(&self) -> &JsonValue {
        &self.0
    }
    pub fn into_inner(self) -> JsonValue {
        self.0
    }
}
impl Default for Collection {
    fn default() -> Self {
        Collection::new(JsonValue::Null)
    }
}
impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn json_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::String(s) => !(s.is_empty() || s == "0"),
        JsonValue::Array(a) => !a.is_empty(),
        JsonValue::Object(o) => !o.is_empty(),
    }
}

/// A value in the form callers work with after decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum LogicalValue {
    Null,
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    /// Result of an `object` cast.
    Object(JsonValue),
    /// Result of an `array`/`json` cast.
    Json(JsonValue),
    Collection(Collection),
    DateTime(NaiveDateTime),
    Custom(Box<dyn CastObject>),
}

impl LogicalValue {
    pub fn custom<T: CustomCast>(value: T) -> Self {
        LogicalValue::Custom(Box::new(value))
    }
    pub fn is_null(&self) -> bool {
        matches!(self, LogicalValue::Null)
    }
    /// Loose truthiness: null, zero, empty text, "0", and empty containers
    /// are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            LogicalValue::Null => false,
            LogicalValue::Integer(i) => *i != 0,
            LogicalValue::Float(f) => *f != 0.0,
            LogicalValue::String(s) => !(s.is_empty() || s == "0"),
            LogicalValue::Boolean(b) => *b,
            // decoded objects are always truthy, even when empty
            LogicalValue::Object(JsonValue::Object(_)) => true,
            LogicalValue::Object(j) | LogicalValue::Json(j) => json_truthy(j),
            LogicalValue::Collection(c) => !c.is_empty(),
            LogicalValue::DateTime(_) => true,
            LogicalValue::Custom(_) => true,
        }
    }
    pub fn type_name(&self) -> &str {
        match self {
            LogicalValue::Null => "null",
            LogicalValue::Integer(_) => "integer",
            LogicalValue::Float(_) => "float",
            LogicalValue::String(_) => "string",
            LogicalValue::Boolean(_) => "boolean",
            LogicalValue::Object(_) => "object",
            LogicalValue::Json(_) => "array",
            LogicalValue::Collection(_) => "collection",
            LogicalValue::DateTime(_) => "datetime",
            LogicalValue::Custom(c) => c.type_name(),
        }
    }
    pub fn downcast_ref<T: CustomCast>(&self) -> Option<&T> {
        match self {
            LogicalValue::Custom(c) => c.as_any().downcast_ref::<T>(),
            _ => None,
        }
    }
    pub fn into_custom<T: CustomCast>(self) -> Option<T> {
        match self {
            LogicalValue::Custom(c) => c.into_any().downcast::<T>().ok().map(|b| *b),
            _ => None,
        }
    }
}

impl From<RawValue> for LogicalValue {
    fn from(raw: RawValue) -> Self {
        match raw {
            RawValue::Null => LogicalValue::Null,
            RawValue::Integer(i) => LogicalValue::Integer(i),
            RawValue::Real(r) => LogicalValue::Float(r),
            RawValue::Text(s) => LogicalValue::String(s),
            RawValue::Boolean(b) => LogicalValue::Boolean(b),
        }
    }
}
impl From<i64> for LogicalValue {
    fn from(i: i64) -> Self {
        LogicalValue::Integer(i)
    }
}
impl From<i32> for LogicalValue {
    fn from(i: i32) -> Self {
        LogicalValue::Integer(i64::from(i))
    }
}
impl From<f64> for LogicalValue {
    fn from(f: f64) -> Self {
        LogicalValue::Float(f)
    }
}
impl From<bool> for LogicalValue {
    fn from(b: bool) -> Self {
        LogicalValue::Boolean(b)
    }
}
impl From<String> for LogicalValue {
    fn from(s: String) -> Self {
        LogicalValue::String(s)
    }
}
impl From<&str> for LogicalValue {
    fn from(s: &str) -> Self {
        LogicalValue::String(s.to_string())
    }
}
impl From<NaiveDateTime> for LogicalValue {
    fn from(d: NaiveDateTime) -> Self {
        LogicalValue::DateTime(d)
    }
}
impl From<JsonValue> for LogicalValue {
    fn from(j: JsonValue) -> Self {
        LogicalValue::Json(j)
    }
}
impl From<Collection> for LogicalValue {
    fn from(c: Collection) -> Self {
        LogicalValue::Collection(c)
    }
}
impl<T: Into<LogicalValue>> From<Option<T>> for LogicalValue {
    fn from(o: Option<T>) -> Self {
        o.map_or(LogicalValue::Null, Into::into)
    }
}

impl fmt::Display for LogicalValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LogicalValue::Null => write!(f, "null"),
            LogicalValue::Integer(i) => write!(f, "{}", i),
            LogicalValue::Float(x) => write!(f, "{}", x),
            LogicalValue::String(s) => write!(f, "{}", s),
            LogicalValue::Boolean(b) => write!(f, "{}", b),
            LogicalValue::Object(j) | LogicalValue::Json(j) => write!(f, "{}", j),
            LogicalValue::Collection(c) => write!(f, "{}", c),
            LogicalValue::DateTime(d) => write!(f, "{}", d),
            LogicalValue::Custom(c) => write!(f, "{:?}", c),
        }
    }
}
