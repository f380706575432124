use crate::domain::{CartItem, SavedItem};
use crate::errors::MarketResult;

#[cfg_attr(test, mockall::automock)]
pub trait SavedItemRepository: Send + Sync {
    /// Saving a product that is already saved keeps the original entry
    fn save(&self, item: &SavedItem) -> MarketResult<()>;
    /// Returns false when nothing was removed
    fn remove(&self, product_id: &str) -> MarketResult<bool>;
    fn get_all(&self) -> MarketResult<Vec<SavedItem>>;
    fn get(&self, product_id: &str) -> MarketResult<Option<SavedItem>>;
    fn exists(&self, product_id: &str) -> MarketResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
pub trait CartRepository: Send + Sync {
    fn add(&self, item: &CartItem) -> MarketResult<()>;
    /// Move a saved product into the cart as one write. `None` when the
    /// product is not saved; nothing changes in that case.
    fn move_from_saved(&self, product_id: &str) -> MarketResult<Option<CartItem>>;
    fn remove(&self, product_id: &str) -> MarketResult<bool>;
    fn get_all(&self) -> MarketResult<Vec<CartItem>>;
    fn clear(&self) -> MarketResult<()>;
}
