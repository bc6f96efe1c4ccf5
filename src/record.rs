//! Records
//!
//! An ordered, string-keyed container of heterogeneous values decoded from
//! Atom content. A [`Value`] is a scalar string, a nested [`Record`] or a
//! list of values.

use crate::codec;
use crate::error::{ApiError, Result};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

/// A single value held by a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    Record(Record),
    List(Vec<Value>),
}

impl Value {
    /// The scalar text, or `None` for records and lists.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Record(_) => "record",
            Value::List(_) => "list",
        }
    }

    fn scalar(&self, key: &str) -> Result<&str> {
        self.as_str().ok_or_else(|| {
            ApiError::Format(format!(
                "Value for '{}' is a {}, expected a scalar",
                key,
                self.kind()
            ))
        })
    }

    /// Flatten a list of scalars into strings.
    pub fn to_string_array(&self, key: &str) -> Result<Vec<String>> {
        let items = self.as_list().ok_or_else(|| {
            ApiError::Format(format!(
                "Value for '{}' is a {}, expected a list",
                key,
                self.kind()
            ))
        })?;
        items
            .iter()
            .map(|item| item.scalar(key).map(str::to_string))
            .collect()
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Str(if value { "1" } else { "0" }.to_string())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<Vec<String>> for Value {
    fn from(values: Vec<String>) -> Self {
        Value::List(values.into_iter().map(Value::Str).collect())
    }
}

impl From<Vec<&str>> for Value {
    fn from(values: Vec<&str>) -> Self {
        Value::List(values.into_iter().map(Value::from).collect())
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

/// Apply a scalar conversion to an optional value.
///
/// `Ok(None)` means the key is absent; a present value that fails to convert
/// is an error.
pub(crate) fn convert<T>(
    value: Option<&Value>,
    key: &str,
    conv: fn(&str) -> Result<T>,
) -> Result<Option<T>> {
    match value {
        Some(value) => conv(value.scalar(key)?).map(Some),
        None => Ok(None),
    }
}

/// Ordered string-keyed map of values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    entries: IndexMap<String, Value>,
}

macro_rules! typed_getters {
    ($($(#[$doc:meta])* $name:ident, $name_or:ident, $ty:ty, $conv:path;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(&self, key: &str) -> Result<$ty> {
                convert(self.get(key), key, $conv)?
                    .ok_or_else(|| ApiError::MissingKey(key.to_string()))
            }

            pub fn $name_or(&self, key: &str, default: $ty) -> Result<$ty> {
                Ok(convert(self.get(key), key, $conv)?.unwrap_or(default))
            }
        )*
    };
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous value under `key` in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Nested record under `key`, if the value is record-shaped.
    pub fn get_record(&self, key: &str) -> Option<&Record> {
        self.get(key).and_then(Value::as_record)
    }

    pub fn get_string(&self, key: &str) -> Result<String> {
        self.get_string_opt(key)?
            .ok_or_else(|| ApiError::MissingKey(key.to_string()))
    }

    pub fn get_string_or(&self, key: &str, default: &str) -> Result<String> {
        Ok(self
            .get_string_opt(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    fn get_string_opt(&self, key: &str) -> Result<Option<String>> {
        convert(self.get(key), key, |s| Ok(s.to_string()))
    }

    typed_getters! {
        get_boolean, get_boolean_or, bool, codec::to_boolean;
        get_integer, get_integer_or, i32, codec::to_integer;
        get_long, get_long_or, i64, codec::to_long;
        get_float, get_float_or, f64, codec::to_float;
        /// Byte count with an optional KB/MB/GB suffix.
        get_byte_count, get_byte_count_or, i64, codec::to_byte_count;
        get_date, get_date_or, DateTime<Utc>, codec::to_date;
    }

    /// List of scalars under `key`; fails if the value is not list-shaped.
    pub fn get_string_array(&self, key: &str) -> Result<Vec<String>> {
        self.get(key)
            .ok_or_else(|| ApiError::MissingKey(key.to_string()))?
            .to_string_array(key)
    }

    pub fn get_string_array_or(&self, key: &str, default: Vec<String>) -> Result<Vec<String>> {
        match self.get(key) {
            Some(value) => value.to_string_array(key),
            None => Ok(default),
        }
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
