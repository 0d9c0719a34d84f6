//! Flat request parameters sent to the repository API.

mod multi_value;

pub use multi_value::{MultiValue, SEPARATOR};

use crate::{Error, ErrorContext, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Scalar value bound to a request parameter.
///
/// `Missing` marks a required parameter whose value was not supplied; a map
/// holding one is never transmitted (see [`ParameterMap::ensure_complete`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    /// Revision ids and other unsigned counters, kept exact past `i64::MAX`.
    UInt(u64),
    Bool(bool),
    Missing,
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Int(n) => Some(*n),
            ParamValue::UInt(n) => i64::try_from(*n).ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            ParamValue::Int(n) => u64::try_from(*n).ok(),
            ParamValue::UInt(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Wire form. Booleans follow the API's presence semantics: `true` is
    /// sent as `1`, `false` is not sent at all.
    pub fn to_wire(&self) -> Option<String> {
        match self {
            ParamValue::Str(s) => Some(s.clone()),
            ParamValue::Int(n) => Some(n.to_string()),
            ParamValue::UInt(n) => Some(n.to_string()),
            ParamValue::Bool(true) => Some("1".to_string()),
            ParamValue::Bool(false) | ParamValue::Missing => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

impl From<&String> for ParamValue {
    fn from(v: &String) -> Self {
        ParamValue::Str(v.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<u64> for ParamValue {
    fn from(v: u64) -> Self {
        ParamValue::UInt(v)
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        ParamValue::Int(i64::from(v))
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&MultiValue> for ParamValue {
    fn from(v: &MultiValue) -> Self {
        ParamValue::Str(v.encode())
    }
}

/// Parameter name → value mapping for one API call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParameterMap {
    entries: BTreeMap<String, ParamValue>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a map for the given API module.
    pub fn for_action(action: &str) -> Self {
        let mut map = Self::new();
        map.insert("action", action);
        map
    }

    pub fn insert(&mut self, name: &str, value: impl Into<ParamValue>) -> &mut Self {
        self.entries.insert(name.to_string(), value.into());
        self
    }

    /// Insert only when a value is present; `None` leaves the key out entirely.
    pub fn insert_opt<V: Into<ParamValue>>(&mut self, name: &str, value: Option<V>) -> &mut Self {
        if let Some(v) = value {
            self.insert(name, v);
        }
        self
    }

    /// Insert a required identifier. A blank value is recorded as `Missing`.
    pub fn require(&mut self, name: &str, value: &str) -> &mut Self {
        let v = if value.trim().is_empty() {
            ParamValue::Missing
        } else {
            ParamValue::from(value)
        };
        self.entries.insert(name.to_string(), v);
        self
    }

    /// Insert a required multi-valued parameter. An empty collection is recorded as `Missing`.
    pub fn require_multi(&mut self, name: &str, value: &MultiValue) -> &mut Self {
        let v = if value.encode().is_empty() {
            ParamValue::Missing
        } else {
            ParamValue::from(value)
        };
        self.entries.insert(name.to_string(), v);
        self
    }

    /// Insert an optional multi-valued parameter, leaving it out when absent or empty.
    pub fn insert_multi_opt(&mut self, name: &str, value: Option<&MultiValue>) -> &mut Self {
        if let Some(v) = value.filter(|v| !v.encode().is_empty()) {
            self.insert(name, v);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParamValue::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn action(&self) -> Option<&str> {
        self.get_str("action")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Fail on the first parameter still bound to `Missing`.
    pub fn ensure_complete(&self) -> Result<()> {
        for (name, value) in &self.entries {
            if *value == ParamValue::Missing {
                return Err(Error::invalid_argument_with_context(
                    format!("Parameter \"{}\" is not specified properly", name),
                    ErrorContext::new()
                        .with_field_path(name.as_str())
                        .with_source(self.action().unwrap_or("unknown")),
                ));
            }
        }
        Ok(())
    }

    /// Name/value pairs as they go on the wire.
    pub fn to_wire_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.to_wire().map(|w| (k.clone(), w)))
            .collect()
    }
}
