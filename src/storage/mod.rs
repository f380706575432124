pub mod traits;
pub mod sqlite;

pub use traits::{CartRepository, SavedItemRepository};
pub use sqlite::{SqliteCartRepository, SqliteSavedItemRepository, SqliteStorage};
