use crate::domain::SavedItem;
use crate::errors::{MarketError, MarketResult};
use crate::storage::traits::SavedItemRepository;

pub struct SavedService<R: SavedItemRepository> {
    repository: R,
}

impl<R: SavedItemRepository> SavedService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// List saved products, most recently saved first
    pub fn list(&self) -> MarketResult<Vec<SavedItem>> {
        self.repository.get_all()
    }

    /// Remove a product from the saved list
    pub fn remove(&self, product_id: &str) -> MarketResult<()> {
        if !self.repository.remove(product_id)? {
            return Err(MarketError::NotFound(product_id.to_string()));
        }
        Ok(())
    }

    pub fn is_saved(&self, product_id: &str) -> MarketResult<bool> {
        self.repository.exists(product_id)
    }
}
