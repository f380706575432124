mod connection;
mod product_table;
mod saved_item_repository;
mod cart_repository;

pub use connection::SqliteStorage;
pub use saved_item_repository::SqliteSavedItemRepository;
pub use cart_repository::SqliteCartRepository;
