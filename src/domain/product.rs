use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub images: Vec<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub article_type: Option<String>,
}

impl ProductEntry {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            price: 0.0,
            images: Vec::new(),
            category: None,
            sub_category: None,
            article_type: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Prices are never negative
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = if price.is_finite() { price.max(0.0) } else { 0.0 };
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    pub fn with_sub_category(mut self, sub_category: Option<String>) -> Self {
        self.sub_category = sub_category;
        self
    }

    pub fn with_article_type(mut self, article_type: Option<String>) -> Self {
        self.article_type = article_type;
        self
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(|s| s.as_str())
    }

    /// Text fields that catalog search looks at
    pub fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.title.as_str()),
            self.category.as_deref(),
            self.sub_category.as_deref(),
            self.article_type.as_deref(),
            Some(self.description.as_str()),
        ]
        .into_iter()
        .flatten()
    }

    /// Fields the exclusion policy checks. The master category is left out:
    /// it is too broad to exclude on.
    pub fn exclusion_fields(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.title.as_str()),
            self.sub_category.as_deref(),
            self.article_type.as_deref(),
            Some(self.description.as_str()),
        ]
        .into_iter()
        .flatten()
    }

    /// Case-insensitive substring match over the searchable fields
    pub fn matches_text(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.searchable_fields()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price)
    }
}
