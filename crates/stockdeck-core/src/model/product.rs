// ── Core identity and record types ──
//
// ProductId and Product are the foundation of the canonical collection.
// Ids unify the remote's numeric identifiers with client-synthesized
// fallbacks behind a single opaque interface.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category assigned to records the remote left uncategorized.
pub const DEFAULT_CATEGORY: &str = "uncategorized";

// ── ProductId ───────────────────────────────────────────────────────

/// Opaque stable identifier for a product.
///
/// Transparently wraps either a number (the remote's native ids) or a
/// string (forward-compatible with non-numeric id schemes). Consumers
/// never care which.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(u64),
    Text(String),
}

impl ProductId {
    pub fn as_number(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for ProductId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<u64> for ProductId {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        match s.parse::<u64>() {
            Ok(n) => Self::Number(n),
            Err(_) => Self::Text(s.to_owned()),
        }
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

// ── Product ─────────────────────────────────────────────────────────

/// Canonical product record.
///
/// Exactly one `Product` per id exists in the canonical collection, and
/// every field has been normalized (numeric coercion, category default)
/// before the record entered it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Non-negative; non-finite inputs are coerced to 0 at the boundary.
    pub price: f64,
    pub stock: u32,
    pub category: String,
    /// Optional URI; empty string when the remote supplied none.
    pub thumbnail: String,
}

// ── Intent-side candidates ──────────────────────────────────────────

/// Candidate for `create` -- a product without an id.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub title: String,
    pub price: f64,
    pub stock: u32,
    pub category: Option<String>,
    pub thumbnail: Option<String>,
}

/// Partial changes for `update` -- only provided fields are sent and merged.
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub title: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<u32>,
    pub category: Option<String>,
    pub thumbnail: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn product_id_from_numeric_string() {
        let id = ProductId::from("42");
        assert_eq!(id.as_number(), Some(42));
    }

    #[test]
    fn product_id_from_text_string() {
        let id = ProductId::from("sku-abc");
        assert_eq!(id, ProductId::Text("sku-abc".into()));
        assert!(id.as_number().is_none());
    }

    #[test]
    fn product_id_display() {
        assert_eq!(ProductId::Number(7).to_string(), "7");
        assert_eq!(ProductId::Text("sku-abc".into()).to_string(), "sku-abc");
    }

    #[test]
    fn product_id_deserializes_untagged() {
        let n: ProductId = serde_json::from_str("42").unwrap();
        assert_eq!(n, ProductId::Number(42));
        let s: ProductId = serde_json::from_str("\"sku-abc\"").unwrap();
        assert_eq!(s, ProductId::Text("sku-abc".into()));
    }
}
