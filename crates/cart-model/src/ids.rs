//! Product identifiers.
//!
//! Catalog backends hand out either numeric or textual ids. Both are kept in
//! their original JSON form so a snapshot written by one front end reads back
//! unchanged in another.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// An opaque product identifier, stable across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Numeric id, serialized as a JSON number.
    Number(i64),
    /// Textual id, serialized as a JSON string.
    Text(String),
}

impl ProductId {
    /// Create a textual id.
    pub fn text(id: impl Into<String>) -> Self {
        Self::Text(id.into())
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Integers parse as numeric ids; anything else is kept as text.
impl FromStr for ProductId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map(Self::Number)
            .unwrap_or_else(|_| Self::Text(s.to_string())))
    }
}

impl From<i64> for ProductId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}
