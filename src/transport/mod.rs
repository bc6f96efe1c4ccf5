//! Transport seam.
//!
//! The entity layer talks to the server only through [`Transport::send`].
//! [`HttpTransport`] speaks HTTP with reqwest; [`MemoryTransport`] serves
//! canned responses and records every call.

mod http;
mod memory;

pub use http::HttpTransport;
pub use memory::{MemoryTransport, RecordedCall};

use crate::error::{ApiError, Result};
use crate::record::Value;
use indexmap::IndexMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        })
    }
}

/// Ordered request arguments. Later inserts replace earlier values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    entries: IndexMap<String, Value>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merge `other` into `self`; keys in `other` win.
    pub fn merge(&mut self, other: &Args) {
        for (key, value) in &other.entries {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    /// Flatten into wire pairs: lists repeat their key, nested records are rejected.
    pub fn to_pairs(&self) -> Result<Vec<(String, String)>> {
        let mut pairs = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            match value {
                Value::Str(s) => pairs.push((key.clone(), s.clone())),
                Value::List(_) => {
                    for item in value.to_string_array(key)? {
                        pairs.push((key.clone(), item));
                    }
                }
                Value::Record(_) => {
                    return Err(ApiError::Format(format!(
                        "Argument '{}' is a record and cannot be sent",
                        key
                    )))
                }
            }
        }
        Ok(pairs)
    }
}

impl FromIterator<(String, Value)> for Args {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub args: Args,
}

impl Request {
    pub fn new(method: Method, args: Args) -> Self {
        Self { method, args }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_status(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..400).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Sends one request to a fully-qualified path.
pub trait Transport: Send + Sync {
    fn send(&self, path: &str, request: &Request) -> Result<Response>;
}
