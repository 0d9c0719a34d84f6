//! Argument types for repository API calls.

use std::fmt;
use std::str::FromStr;

/// Kind of the main snak of a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnakType {
    /// Carries a data value; the call must then include a value.
    Value,
    NoValue,
    SomeValue,
}

impl SnakType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::NoValue => "novalue",
            Self::SomeValue => "somevalue",
        }
    }

    /// Whether the server expects a `value` parameter alongside this snak type.
    pub fn requires_value(&self) -> bool {
        matches!(self, Self::Value)
    }
}

impl FromStr for SnakType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "value" => Ok(Self::Value),
            "novalue" => Ok(Self::NoValue),
            "somevalue" => Ok(Self::SomeValue),
            other => Err(format!("unknown snak type: {}", other)),
        }
    }
}

impl fmt::Display for SnakType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statement rank filter for `wbgetclaims`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    Preferred,
    Normal,
    Deprecated,
}

impl Rank {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preferred => "preferred",
            Self::Normal => "normal",
            Self::Deprecated => "deprecated",
        }
    }
}

/// Sort direction for `wbgetentities`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

/// The `reference_hash` slot of [`crate::api::RepoApi::set_reference`].
///
/// Older callers passed the reference's position through the hash slot.
/// `Index` keeps that form expressible; it is remapped to the `index`
/// parameter when no explicit index is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashOrIndex {
    Hash(String),
    Index(u32),
}

impl From<&str> for HashOrIndex {
    fn from(hash: &str) -> Self {
        Self::Hash(hash.to_string())
    }
}

impl From<String> for HashOrIndex {
    fn from(hash: String) -> Self {
        Self::Hash(hash)
    }
}

impl From<u32> for HashOrIndex {
    fn from(index: u32) -> Self {
        Self::Index(index)
    }
}
