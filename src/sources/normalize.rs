//! Turns loosely-shaped product records into `ProductEntry`.
//!
//! Records come from a hosted table filled by CSV imports, so the same field
//! can be a string, a number, an object or missing entirely. Everything past
//! this module sees one shape.

use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::ProductEntry;
use crate::errors::{MarketError, MarketResult};

const ID_KEYS: &[&str] = &["id", "product_id"];
const TITLE_KEYS: &[&str] = &["title", "name", "product_display_name", "productDisplayName"];
const CATEGORY_KEYS: &[&str] = &["category", "master_category", "masterCategory"];
const SUB_CATEGORY_KEYS: &[&str] = &["sub_category", "subCategory"];
const ARTICLE_TYPE_KEYS: &[&str] = &["article_type", "articleType"];

/// Image fields in the order they are tried; the first that yields a URI wins
const IMAGE_KEYS: &[&str] = &["images", "image_url", "image", "thumbnail", "link"];

/// Normalize one record. Records without a usable id are dropped.
pub fn normalize_product(raw: &Value) -> Option<ProductEntry> {
    let record = raw.as_object()?;

    let id = ID_KEYS
        .iter()
        .find_map(|key| record.get(*key).and_then(scalar_to_string))?;

    let title = first_text(record, TITLE_KEYS).unwrap_or_else(|| "Untitled".to_string());
    let description = first_text(record, &["description"]).unwrap_or_default();
    let price = record.get("price").and_then(parse_price).unwrap_or(0.0);

    Some(
        ProductEntry::new(id, title)
            .with_description(description)
            .with_price(price)
            .with_images(resolve_images(record))
            .with_category(first_text(record, CATEGORY_KEYS))
            .with_sub_category(first_text(record, SUB_CATEGORY_KEYS))
            .with_article_type(first_text(record, ARTICLE_TYPE_KEYS)),
    )
}

/// Normalize a JSON array of records
pub fn normalize_products(raw: &Value) -> MarketResult<Vec<ProductEntry>> {
    let records = raw
        .as_array()
        .ok_or_else(|| MarketError::Source("expected a JSON array of products".to_string()))?;

    let products: Vec<ProductEntry> = records.iter().filter_map(normalize_product).collect();

    if products.len() < records.len() {
        debug!(
            dropped = records.len() - products.len(),
            "skipped product records without an id"
        );
    }

    Ok(products)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A string, or an object carrying the text under `name`
fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Object(map) => map.get("name").and_then(text_value),
        _ => None,
    }
}

fn first_text(record: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| record.get(*key).and_then(text_value))
}

fn parse_price(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s
            .trim()
            .trim_start_matches('$')
            .replace(',', "")
            .parse()
            .ok(),
        _ => None,
    }
}

fn image_uris(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            // Arrays stored as text by the CSV import
            if s.starts_with('[') {
                if let Ok(parsed) = serde_json::from_str::<Value>(s) {
                    return image_uris(&parsed);
                }
            }
            if s.is_empty() {
                Vec::new()
            } else {
                vec![s.to_string()]
            }
        }
        Value::Array(items) => items.iter().flat_map(image_uris).collect(),
        Value::Object(map) => ["url", "uri", "src"]
            .iter()
            .find_map(|key| map.get(*key).and_then(scalar_to_string))
            .into_iter()
            .collect(),
        _ => Vec::new(),
    }
}

fn resolve_images(record: &Map<String, Value>) -> Vec<String> {
    for key in IMAGE_KEYS {
        let Some(value) = record.get(*key) else {
            continue;
        };

        let mut uris: Vec<String> = Vec::new();
        for uri in image_uris(value) {
            if !uris.contains(&uri) {
                uris.push(uri);
            }
        }

        if !uris.is_empty() {
            return uris;
        }
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_record() {
        let entry = normalize_product(&json!({
            "id": "abc",
            "title": "Denim Jacket",
            "description": "Light wash",
            "price": 35.5,
            "images": ["https://cdn.example.com/1.jpg"],
            "sub_category": "Topwear",
            "article_type": "Jackets"
        }))
        .unwrap();

        assert_eq!(entry.id, "abc");
        assert_eq!(entry.title, "Denim Jacket");
        assert_eq!(entry.price, 35.5);
        assert_eq!(entry.images, vec!["https://cdn.example.com/1.jpg"]);
        assert_eq!(entry.sub_category.as_deref(), Some("Topwear"));
        assert_eq!(entry.article_type.as_deref(), Some("Jackets"));
    }

    #[test]
    fn test_numeric_id_and_string_price() {
        let entry = normalize_product(&json!({
            "product_id": 15970,
            "productDisplayName": "Navy Blue Shirt",
            "price": "$1,299.00"
        }))
        .unwrap();

        assert_eq!(entry.id, "15970");
        assert_eq!(entry.title, "Navy Blue Shirt");
        assert_eq!(entry.price, 1299.0);
    }

    #[test]
    fn test_missing_id_dropped() {
        assert!(normalize_product(&json!({ "title": "No id" })).is_none());
        assert!(normalize_product(&json!({ "id": "  ", "title": "Blank id" })).is_none());
        assert!(normalize_product(&json!("not an object")).is_none());
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let entry = normalize_product(&json!({ "id": 1, "price": "free" })).unwrap();

        assert_eq!(entry.title, "Untitled");
        assert_eq!(entry.description, "");
        assert_eq!(entry.price, 0.0);
        assert!(entry.images.is_empty());
        assert!(entry.category.is_none());
    }

    #[test]
    fn test_negative_price_clamped() {
        let entry = normalize_product(&json!({ "id": 1, "price": -3 })).unwrap();
        assert_eq!(entry.price, 0.0);
    }

    #[test]
    fn test_category_objects_use_name() {
        let entry = normalize_product(&json!({
            "id": 1,
            "masterCategory": { "name": "Apparel" },
            "subCategory": { "name": "Innerwear" },
            "articleType": "Briefs"
        }))
        .unwrap();

        assert_eq!(entry.category.as_deref(), Some("Apparel"));
        assert_eq!(entry.sub_category.as_deref(), Some("Innerwear"));
        assert_eq!(entry.article_type.as_deref(), Some("Briefs"));
    }

    #[test]
    fn test_images_from_objects_and_dedup() {
        let entry = normalize_product(&json!({
            "id": 1,
            "images": [{ "url": "a.jpg" }, { "uri": "b.jpg" }, "a.jpg", ""]
        }))
        .unwrap();

        assert_eq!(entry.images, vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_images_stored_as_json_text() {
        let entry = normalize_product(&json!({
            "id": 1,
            "images": "[\"a.jpg\", \"b.jpg\"]"
        }))
        .unwrap();

        assert_eq!(entry.images, vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_image_fallback_chain() {
        let from_image_url = normalize_product(&json!({
            "id": 1,
            "images": [],
            "image_url": "primary.jpg",
            "thumbnail": "thumb.jpg"
        }))
        .unwrap();
        assert_eq!(from_image_url.images, vec!["primary.jpg"]);

        let from_image_object = normalize_product(&json!({
            "id": 2,
            "image": { "url": "object.jpg" }
        }))
        .unwrap();
        assert_eq!(from_image_object.images, vec!["object.jpg"]);

        let from_link = normalize_product(&json!({
            "id": 3,
            "images": null,
            "link": "http://assets.example.com/15970.jpg"
        }))
        .unwrap();
        assert_eq!(from_link.images, vec!["http://assets.example.com/15970.jpg"]);
    }

    #[test]
    fn test_normalize_products_requires_array() {
        assert!(matches!(
            normalize_products(&json!({ "id": 1 })),
            Err(MarketError::Source(_))
        ));

        let products = normalize_products(&json!([{ "id": 1 }, { "title": "x" }, { "id": 2 }])).unwrap();
        assert_eq!(products.len(), 2);
    }
}
