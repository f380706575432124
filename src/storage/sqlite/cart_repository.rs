use crate::domain::CartItem;
use crate::errors::MarketResult;
use crate::storage::sqlite::product_table::ProductTable;
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::CartRepository;

pub struct SqliteCartRepository {
    storage: SqliteStorage,
}

impl SqliteCartRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

impl CartRepository for SqliteCartRepository {
    fn add(&self, item: &CartItem) -> MarketResult<()> {
        let conn = self.storage.connection()?;
        ProductTable::Cart.insert(&conn, item)
    }

    fn move_from_saved(&self, product_id: &str) -> MarketResult<Option<CartItem>> {
        let mut conn = self.storage.connection()?;
        let tx = conn.transaction()?;

        let Some(item) = ProductTable::Saved.get(&tx, product_id)? else {
            return Ok(None);
        };
        ProductTable::Cart.insert(&tx, &item)?;
        ProductTable::Saved.remove(&tx, product_id)?;

        tx.commit()?;
        Ok(Some(item))
    }

    fn remove(&self, product_id: &str) -> MarketResult<bool> {
        let conn = self.storage.connection()?;
        ProductTable::Cart.remove(&conn, product_id)
    }

    fn get_all(&self) -> MarketResult<Vec<CartItem>> {
        let conn = self.storage.connection()?;
        ProductTable::Cart.get_all(&conn)
    }

    fn clear(&self) -> MarketResult<()> {
        let conn = self.storage.connection()?;
        ProductTable::Cart.clear(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductEntry;
    use crate::storage::sqlite::SqliteSavedItemRepository;
    use crate::storage::traits::SavedItemRepository;

    fn item(id: &str, price: f64) -> CartItem {
        CartItem::from_entry(&ProductEntry::new(id, format!("Item {}", id)).with_price(price))
    }

    #[test]
    fn test_add_list_clear() {
        let repo = SqliteCartRepository::new(SqliteStorage::in_memory().unwrap());
        repo.add(&item("a", 5.0)).unwrap();
        repo.add(&item("b", 7.5)).unwrap();
        repo.add(&item("a", 5.0)).unwrap();

        assert_eq!(repo.get_all().unwrap().len(), 2);
        repo.clear().unwrap();
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_move_from_saved() {
        let storage = SqliteStorage::in_memory().unwrap();
        let cart = SqliteCartRepository::new(storage.clone());
        let saved = SqliteSavedItemRepository::new(storage);
        saved.save(&item("a", 5.0)).unwrap();

        let moved = cart.move_from_saved("a").unwrap().unwrap();
        assert_eq!(moved.product_id, "a");
        assert!(!saved.exists("a").unwrap());
        assert_eq!(cart.get_all().unwrap().len(), 1);

        assert!(cart.move_from_saved("a").unwrap().is_none());
    }

    #[test]
    fn test_failed_move_leaves_both_lists_unchanged() {
        let storage = SqliteStorage::in_memory().unwrap();
        let cart = SqliteCartRepository::new(storage.clone());
        let saved = SqliteSavedItemRepository::new(storage.clone());
        saved.save(&item("a", 5.0)).unwrap();

        storage
            .connection()
            .unwrap()
            .execute_batch(
                "CREATE TRIGGER keep_saved BEFORE DELETE ON saved_items
                 BEGIN SELECT RAISE(ABORT, 'saved list is locked'); END;",
            )
            .unwrap();

        assert!(cart.move_from_saved("a").is_err());
        assert!(saved.exists("a").unwrap());
        assert!(cart.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_cart_and_saved_are_separate() {
        let storage = SqliteStorage::in_memory().unwrap();
        let cart = SqliteCartRepository::new(storage.clone());
        let saved = SqliteSavedItemRepository::new(storage);

        cart.add(&item("a", 5.0)).unwrap();
        assert!(!saved.exists("a").unwrap());
        assert!(cart.remove("a").unwrap());
        assert!(!cart.remove("a").unwrap());
    }
}
