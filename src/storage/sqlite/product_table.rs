//! Row mapping shared by the saved and cart tables, which have the same shape.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::domain::StoredProduct;
use crate::errors::{MarketError, MarketResult};

#[derive(Debug, Clone, Copy)]
pub(super) enum ProductTable {
    Saved,
    Cart,
}

impl ProductTable {
    fn name(self) -> &'static str {
        match self {
            ProductTable::Saved => "saved_items",
            ProductTable::Cart => "cart_items",
        }
    }

    pub(super) fn insert(self, conn: &Connection, item: &StoredProduct) -> MarketResult<()> {
        conn.execute(
            &format!(
                "INSERT OR IGNORE INTO {} (product_id, title, price, image, stored_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                self.name()
            ),
            (
                &item.product_id,
                &item.title,
                item.price,
                &item.image,
                &item.stored_at,
            ),
        )?;
        Ok(())
    }

    pub(super) fn remove(self, conn: &Connection, product_id: &str) -> MarketResult<bool> {
        let removed = conn.execute(
            &format!("DELETE FROM {} WHERE product_id = ?1", self.name()),
            [product_id],
        )?;
        Ok(removed > 0)
    }

    pub(super) fn get_all(self, conn: &Connection) -> MarketResult<Vec<StoredProduct>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT product_id, title, price, image, stored_at FROM {} ORDER BY id DESC",
            self.name()
        ))?;

        let items = stmt.query_map([], Self::from_row)?;
        items.collect::<Result<Vec<_>, _>>().map_err(MarketError::from)
    }

    pub(super) fn get(self, conn: &Connection, product_id: &str) -> MarketResult<Option<StoredProduct>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT product_id, title, price, image, stored_at FROM {} WHERE product_id = ?1",
            self.name()
        ))?;

        stmt.query_row([product_id], Self::from_row)
            .optional()
            .map_err(MarketError::from)
    }

    pub(super) fn clear(self, conn: &Connection) -> MarketResult<()> {
        conn.execute(&format!("DELETE FROM {}", self.name()), [])?;
        Ok(())
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<StoredProduct> {
        Ok(StoredProduct {
            product_id: row.get(0)?,
            title: row.get(1)?,
            price: row.get(2)?,
            image: row.get(3)?,
            stored_at: row.get(4)?,
        })
    }
}
