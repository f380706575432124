use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::ProductEntry;

/// Snapshot of a product kept on the device, either in the saved list or the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredProduct {
    pub product_id: String,
    pub title: String,
    pub price: f64,
    pub image: Option<String>,
    pub stored_at: String,
}

impl StoredProduct {
    pub fn from_entry(entry: &ProductEntry) -> Self {
        Self {
            product_id: entry.id.clone(),
            title: entry.title.clone(),
            price: entry.price,
            image: entry.primary_image().map(|s| s.to_string()),
            stored_at: Utc::now().to_rfc3339(),
        }
    }
}

pub type SavedItem = StoredProduct;
pub type CartItem = StoredProduct;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSummary {
    pub items: Vec<CartItem>,
    pub total: f64,
}

impl CartSummary {
    pub fn new(items: Vec<CartItem>) -> Self {
        let total = items.iter().map(|i| i.price).sum();
        Self { items, total }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
