pub mod product;
pub mod saved;

pub use product::ProductEntry;
pub use saved::{CartItem, CartSummary, SavedItem, StoredProduct};
