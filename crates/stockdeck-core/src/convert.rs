// ── API-to-domain normalization ──
//
// The single boundary where loose `stockdeck_api` wire shapes become
// canonical `Product` records. Numeric fields arrive as JSON numbers or
// numeric strings and coerce with a 0 fallback; categories default to
// "uncategorized"; thumbnails fall back to the first alternate image.
// Unnormalized shapes never travel past this module.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

use stockdeck_api::{ProductBody, ProductPatch, RawProduct};

use crate::model::{DEFAULT_CATEGORY, NewProduct, Product, ProductChanges, ProductId};

// ── Coercion helpers ────────────────────────────────────────────────

/// Clamp a price into the canonical range: finite and non-negative.
fn sanitize_price(price: f64) -> f64 {
    if price.is_finite() && price >= 0.0 { price } else { 0.0 }
}

/// Coerce a JSON number or numeric string to `f64`, 0 on anything else.
fn coerce_f64(value: Option<&Value>) -> f64 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    sanitize_price(raw)
}

/// Coerce a JSON number or numeric string to a non-negative integer.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn coerce_u32(value: Option<&Value>) -> u32 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    if raw.is_finite() && raw > 0.0 {
        raw.min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// Non-empty string or `None`.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn id_from_value(value: Option<&Value>) -> Option<ProductId> {
    match value {
        Some(Value::Number(n)) => n.as_u64().map(ProductId::Number),
        Some(Value::String(s)) if !s.is_empty() => Some(ProductId::from(s.as_str())),
        _ => None,
    }
}

/// Client-side fallback id for create responses that omit one:
/// milliseconds since the epoch, unique enough for a single session.
fn synthesized_id() -> ProductId {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
    ProductId::Number(millis)
}

fn thumbnail_or_fallback(thumbnail: Option<String>, images: &[String]) -> String {
    non_empty(thumbnail)
        .or_else(|| images.iter().find(|i| !i.is_empty()).cloned())
        .unwrap_or_default()
}

// ── Normalization ───────────────────────────────────────────────────

/// Coerce a raw remote record into the full canonical `Product` shape.
///
/// Missing ids are synthesized client-side.
pub fn normalize_product(raw: RawProduct) -> Product {
    let id = id_from_value(raw.id.as_ref()).unwrap_or_else(synthesized_id);
    Product {
        id,
        title: raw.title.unwrap_or_default(),
        price: coerce_f64(raw.price.as_ref()),
        stock: coerce_u32(raw.stock.as_ref()),
        category: non_empty(raw.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_owned()),
        thumbnail: thumbnail_or_fallback(raw.thumbnail, &raw.images),
    }
}

/// Normalize a create candidate into the wire body.
pub fn normalize_candidate(candidate: NewProduct) -> ProductBody {
    ProductBody {
        title: candidate.title,
        price: sanitize_price(candidate.price),
        stock: candidate.stock,
        category: non_empty(candidate.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_owned()),
        thumbnail: candidate.thumbnail.unwrap_or_default(),
    }
}

/// The canonical record for a freshly created product: the normalized
/// candidate fields plus the server-assigned id (synthesized when the
/// response carries none).
pub fn created_product(body: &ProductBody, response: &RawProduct) -> Product {
    Product {
        id: id_from_value(response.id.as_ref()).unwrap_or_else(synthesized_id),
        title: body.title.clone(),
        price: body.price,
        stock: body.stock,
        category: body.category.clone(),
        thumbnail: body.thumbnail.clone(),
    }
}

/// Translate intent-side changes into the partial wire body, sanitizing
/// numerics on the way out.
pub fn changes_to_patch(changes: ProductChanges) -> ProductPatch {
    ProductPatch {
        title: changes.title,
        price: changes.price.map(sanitize_price),
        stock: changes.stock,
        category: changes.category,
        thumbnail: changes.thumbnail,
    }
}

/// Shallow-overwrite merge of an update response into an existing record.
///
/// Only fields present in the response are applied; absent fields retain
/// their prior values. The id is never touched.
pub fn merge_response(existing: &mut Product, raw: &RawProduct) {
    if let Some(title) = &raw.title {
        existing.title.clone_from(title);
    }
    if raw.price.is_some() {
        existing.price = coerce_f64(raw.price.as_ref());
    }
    if raw.stock.is_some() {
        existing.stock = coerce_u32(raw.stock.as_ref());
    }
    if let Some(category) = raw.category.clone() {
        existing.category = if category.is_empty() {
            DEFAULT_CATEGORY.to_owned()
        } else {
            category
        };
    }
    if raw.thumbnail.is_some() {
        existing.thumbnail = thumbnail_or_fallback(raw.thumbnail.clone(), &raw.images);
    }
}
