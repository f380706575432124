use tracing::info;

use crate::domain::{CartItem, CartSummary};
use crate::errors::{MarketError, MarketResult};
use crate::storage::traits::CartRepository;

pub struct CartService<C: CartRepository> {
    cart: C,
}

impl<C: CartRepository> CartService<C> {
    pub fn new(cart: C) -> Self {
        Self { cart }
    }

    /// Move a saved product into the cart
    pub fn add_from_saved(&self, product_id: &str) -> MarketResult<CartItem> {
        self.cart
            .move_from_saved(product_id)?
            .ok_or_else(|| MarketError::NotFound(product_id.to_string()))
    }

    pub fn remove(&self, product_id: &str) -> MarketResult<()> {
        if !self.cart.remove(product_id)? {
            return Err(MarketError::NotFound(product_id.to_string()));
        }
        Ok(())
    }

    pub fn summary(&self) -> MarketResult<CartSummary> {
        Ok(CartSummary::new(self.cart.get_all()?))
    }

    /// Empty the cart and return what was in it
    pub fn checkout(&self) -> MarketResult<CartSummary> {
        let summary = self.summary()?;
        if summary.is_empty() {
            return Err(MarketError::InvalidInput("Cart is empty".to_string()));
        }

        self.cart.clear()?;
        info!(items = summary.items.len(), total = summary.total, "checked out cart");

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProductEntry, SavedItem};
    use crate::storage::sqlite::{SqliteCartRepository, SqliteSavedItemRepository, SqliteStorage};
    use crate::storage::traits::{MockCartRepository, SavedItemRepository};

    fn setup() -> (CartService<SqliteCartRepository>, SqliteSavedItemRepository) {
        let storage = SqliteStorage::in_memory().unwrap();
        let service = CartService::new(SqliteCartRepository::new(storage.clone()));
        (service, SqliteSavedItemRepository::new(storage))
    }

    fn saved(id: &str, price: f64) -> SavedItem {
        SavedItem::from_entry(&ProductEntry::new(id, format!("Item {}", id)).with_price(price))
    }

    #[test]
    fn test_add_from_saved_moves_item() {
        let (service, saved_repo) = setup();
        saved_repo.save(&saved("p1", 12.0)).unwrap();

        let item = service.add_from_saved("p1").unwrap();
        assert_eq!(item.product_id, "p1");
        assert!(!saved_repo.exists("p1").unwrap());
        assert_eq!(service.summary().unwrap().items.len(), 1);
    }

    #[test]
    fn test_add_unsaved_is_not_found() {
        let (service, _) = setup();
        assert!(matches!(service.add_from_saved("p1"), Err(MarketError::NotFound(_))));
    }

    #[test]
    fn test_checkout_totals_and_clears() {
        let (service, saved_repo) = setup();
        saved_repo.save(&saved("p1", 12.0)).unwrap();
        saved_repo.save(&saved("p2", 3.5)).unwrap();
        service.add_from_saved("p1").unwrap();
        service.add_from_saved("p2").unwrap();

        let summary = service.checkout().unwrap();
        assert_eq!(summary.items.len(), 2);
        assert_eq!(summary.total, 15.5);
        assert!(service.summary().unwrap().is_empty());
    }

    #[test]
    fn test_checkout_empty_cart() {
        let (service, _) = setup();
        assert!(matches!(service.checkout(), Err(MarketError::InvalidInput(_))));
    }

    #[test]
    fn test_remove_missing() {
        let mut cart = MockCartRepository::new();
        cart.expect_remove().returning(|_| Ok(false));
        let service = CartService::new(cart);

        assert!(matches!(service.remove("p1"), Err(MarketError::NotFound(_))));
    }

    #[test]
    fn test_add_from_saved_propagates_storage_error() {
        let mut cart = MockCartRepository::new();
        cart.expect_move_from_saved()
            .returning(|_| Err(MarketError::InvalidInput("locked".to_string())));
        cart.expect_add().never();
        let service = CartService::new(cart);

        assert!(matches!(service.add_from_saved("p1"), Err(MarketError::InvalidInput(_))));
    }
}
