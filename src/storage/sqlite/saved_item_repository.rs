use crate::domain::SavedItem;
use crate::errors::MarketResult;
use crate::storage::sqlite::product_table::ProductTable;
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::SavedItemRepository;

pub struct SqliteSavedItemRepository {
    storage: SqliteStorage,
}

impl SqliteSavedItemRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

impl SavedItemRepository for SqliteSavedItemRepository {
    fn save(&self, item: &SavedItem) -> MarketResult<()> {
        let conn = self.storage.connection()?;
        ProductTable::Saved.insert(&conn, item)
    }

    fn remove(&self, product_id: &str) -> MarketResult<bool> {
        let conn = self.storage.connection()?;
        ProductTable::Saved.remove(&conn, product_id)
    }

    fn get_all(&self) -> MarketResult<Vec<SavedItem>> {
        let conn = self.storage.connection()?;
        ProductTable::Saved.get_all(&conn)
    }

    fn get(&self, product_id: &str) -> MarketResult<Option<SavedItem>> {
        let conn = self.storage.connection()?;
        ProductTable::Saved.get(&conn, product_id)
    }

    fn exists(&self, product_id: &str) -> MarketResult<bool> {
        Ok(self.get(product_id)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductEntry;

    fn setup_repo() -> SqliteSavedItemRepository {
        let storage = SqliteStorage::in_memory().unwrap();
        SqliteSavedItemRepository::new(storage)
    }

    fn item(id: &str, title: &str, price: f64) -> SavedItem {
        SavedItem::from_entry(
            &ProductEntry::new(id, title)
                .with_price(price)
                .with_images(vec![format!("{}.jpg", id)]),
        )
    }

    #[test]
    fn test_save_and_get() {
        let repo = setup_repo();
        repo.save(&item("p1", "Wool Coat", 45.0)).unwrap();

        let saved = repo.get("p1").unwrap().unwrap();
        assert_eq!(saved.title, "Wool Coat");
        assert_eq!(saved.price, 45.0);
        assert_eq!(saved.image.as_deref(), Some("p1.jpg"));
    }

    #[test]
    fn test_save_twice_keeps_first() {
        let repo = setup_repo();
        repo.save(&item("p1", "Wool Coat", 45.0)).unwrap();
        repo.save(&item("p1", "Renamed", 10.0)).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Wool Coat");
    }

    #[test]
    fn test_get_all_newest_first() {
        let repo = setup_repo();
        repo.save(&item("p1", "First", 1.0)).unwrap();
        repo.save(&item("p2", "Second", 2.0)).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all[0].product_id, "p2");
        assert_eq!(all[1].product_id, "p1");
    }

    #[test]
    fn test_remove() {
        let repo = setup_repo();
        repo.save(&item("p1", "Wool Coat", 45.0)).unwrap();

        assert!(repo.remove("p1").unwrap());
        assert!(!repo.remove("p1").unwrap());
        assert!(!repo.exists("p1").unwrap());
    }

    #[test]
    fn test_get_missing() {
        let repo = setup_repo();
        assert!(repo.get("nope").unwrap().is_none());
    }
}
