//! Multi-valued request arguments.
//!
//! The API accepts several values in one parameter. Values are joined with the
//! unit separator (U+001F), each element carrying its own leading separator:
//!
//! ```rust
//! use wikibase_repo_api::params::MultiValue;
//!
//! assert_eq!(MultiValue::from(vec!["Q1", "Q2"]).encode(), "\u{1f}Q1\u{1f}Q2");
//! assert_eq!(MultiValue::from("Q1").encode(), "Q1");
//! assert_eq!(MultiValue::decode("\u{1f}Q1\u{1f}Q2"), vec!["Q1", "Q2"]);
//! ```
//!
//! The older pipe-joined form (`Q1|Q2`) is only understood by [`MultiValue::decode`]
//! for bare values; it is never produced.

use crate::{Error, ErrorContext, Result};

/// Separator between elements of a multi-valued parameter.
pub const SEPARATOR: char = '\u{1f}';

/// One logical argument carrying one or many string values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultiValue {
    Single(String),
    Many(Vec<String>),
}

impl MultiValue {
    /// Number of values carried.
    pub fn len(&self) -> usize {
        match self {
            MultiValue::Single(_) => 1,
            MultiValue::Many(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when more than one value is carried.
    pub fn is_multi(&self) -> bool {
        self.len() > 1
    }

    pub fn values(&self) -> Vec<&str> {
        match self {
            MultiValue::Single(s) => vec![s.as_str()],
            MultiValue::Many(v) => v.iter().map(String::as_str).collect(),
        }
    }

    /// Serialize to the wire form.
    pub fn encode(&self) -> String {
        match self {
            MultiValue::Single(s) if !needs_prefix(s) => s.clone(),
            MultiValue::Single(s) => format!("{}{}", SEPARATOR, s),
            MultiValue::Many(v) => v.iter().fold(String::new(), |mut out, s| {
                out.push(SEPARATOR);
                out.push_str(s);
                out
            }),
        }
    }

    /// Split a wire value back into its elements.
    pub fn decode(raw: &str) -> Vec<String> {
        if raw.is_empty() {
            return Vec::new();
        }
        match raw.strip_prefix(SEPARATOR) {
            Some(rest) => rest.split(SEPARATOR).map(str::to_string).collect(),
            None => raw.split('|').map(str::to_string).collect(),
        }
    }

    /// Reject elements the wire format cannot carry.
    pub fn validate(&self, param: &str) -> Result<()> {
        if let Some(bad) = self.values().into_iter().find(|v| v.contains(SEPARATOR)) {
            return Err(Error::invalid_argument_with_context(
                "value contains the U+001F separator",
                ErrorContext::new()
                    .with_field_path(param)
                    .with_details(format!("{:?}", bad)),
            ));
        }
        Ok(())
    }
}

fn needs_prefix(value: &str) -> bool {
    value.contains('|') || value.contains(SEPARATOR)
}

impl From<&str> for MultiValue {
    fn from(value: &str) -> Self {
        MultiValue::Single(value.to_string())
    }
}

impl From<String> for MultiValue {
    fn from(value: String) -> Self {
        MultiValue::Single(value)
    }
}

impl From<Vec<String>> for MultiValue {
    fn from(values: Vec<String>) -> Self {
        MultiValue::Many(values)
    }
}

impl From<Vec<&str>> for MultiValue {
    fn from(values: Vec<&str>) -> Self {
        MultiValue::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for MultiValue {
    fn from(values: &[&str]) -> Self {
        MultiValue::Many(values.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for MultiValue {
    fn from(values: [&str; N]) -> Self {
        MultiValue::Many(values.iter().map(|s| s.to_string()).collect())
    }
}
