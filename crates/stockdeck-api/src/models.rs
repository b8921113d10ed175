// Catalog API wire types
//
// Raw shapes as the remote returns them. Fields use `#[serde(default)]`
// liberally because the API is inconsistent about field presence, and the
// numeric fields are modeled as `serde_json::Value` because prices and
// stock counts have been observed both as numbers and as numeric strings.
// Coercion into canonical types happens in `stockdeck-core`, never here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Response envelope ────────────────────────────────────────────────

/// Page envelope returned by `GET /products`.
///
/// ```json
/// { "products": [...], "total": 100, "skip": 0, "limit": 100 }
/// ```
#[derive(Debug, Deserialize)]
pub struct ProductPage {
    #[serde(default)]
    pub products: Vec<RawProduct>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
}

// ── Product ──────────────────────────────────────────────────────────

/// A product record exactly as the remote API shapes it.
///
/// Any subset of these fields may be present depending on the endpoint.
/// Undocumented fields land in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProduct {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
    /// Number or numeric string, depending on endpoint and record age.
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub stock: Option<Value>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Alternate image list; first entry doubles as a thumbnail fallback.
    #[serde(default)]
    pub images: Vec<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// ── Request bodies ───────────────────────────────────────────────────

/// Full candidate body for `POST /products/add`.
#[derive(Debug, Clone, Serialize)]
pub struct ProductBody {
    pub title: String,
    pub price: f64,
    pub stock: u32,
    pub category: String,
    pub thumbnail: String,
}

/// Partial body for `PUT /products/{id}`; only provided fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl ProductPatch {
    /// Whether the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.category.is_none()
            && self.thumbnail.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn raw_product_tolerates_sparse_records() {
        let raw: RawProduct = serde_json::from_str(r#"{"title": "Lamp"}"#).unwrap();
        assert_eq!(raw.title.as_deref(), Some("Lamp"));
        assert!(raw.id.is_none());
        assert!(raw.images.is_empty());
    }

    #[test]
    fn raw_product_keeps_undocumented_fields() {
        let raw: RawProduct =
            serde_json::from_str(r#"{"title": "Lamp", "brand": "Lumen"}"#).unwrap();
        assert_eq!(raw.extra.get("brand").and_then(Value::as_str), Some("Lumen"));
    }

    #[test]
    fn patch_serializes_only_provided_fields() {
        let patch = ProductPatch {
            price: Some(15.0),
            ..ProductPatch::default()
        };
        let body = serde_json::to_string(&patch).unwrap();
        assert_eq!(body, r#"{"price":15.0}"#);
    }

    #[test]
    fn empty_patch_is_empty() {
        assert!(ProductPatch::default().is_empty());
    }
}
