use std::fs;
use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ProductEntry;
use crate::errors::MarketResult;
use crate::sources::normalize::normalize_products;
use crate::sources::traits::{FetchParams, ProductSource};

/// Products held in memory, filtered and paged locally.
///
/// Backs the offline catalog file and the placeholder data shown when the
/// hosted API is unavailable.
pub struct CatalogProductSource {
    products: Vec<ProductEntry>,
}

impl CatalogProductSource {
    pub fn new(products: Vec<ProductEntry>) -> Self {
        Self { products }
    }

    /// Load a JSON array of product records
    pub fn from_path<P: AsRef<Path>>(path: P) -> MarketResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> MarketResult<Self> {
        let raw: Value = serde_json::from_str(content)?;
        Ok(Self::new(normalize_products(&raw)?))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn page(&self, params: &FetchParams) -> Vec<ProductEntry> {
        let query = params.query.as_deref().unwrap_or("");

        self.products
            .iter()
            .filter(|p| p.matches_text(query))
            .skip(params.offset)
            .take(params.limit)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ProductSource for CatalogProductSource {
    async fn fetch(&self, params: &FetchParams) -> MarketResult<Vec<ProductEntry>> {
        Ok(self.page(params))
    }
}
