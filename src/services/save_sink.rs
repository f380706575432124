use tracing::{debug, warn};

use crate::domain::{ProductEntry, SavedItem};
use crate::storage::traits::SavedItemRepository;

/// Receives products the user accepted in the feed.
///
/// Saving is fire-and-forget: the feed has already moved on when this runs,
/// so implementations report their own failures.
pub trait SaveSink: Send + Sync {
    fn save(&self, entry: &ProductEntry);
}

/// Persists accepted products to the saved list
pub struct SavedItemsSink<R: SavedItemRepository> {
    repository: R,
}

impl<R: SavedItemRepository> SavedItemsSink<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R: SavedItemRepository> SaveSink for SavedItemsSink<R> {
    fn save(&self, entry: &ProductEntry) {
        match self.repository.save(&SavedItem::from_entry(entry)) {
            Ok(()) => debug!(product_id = %entry.id, "saved product"),
            Err(e) => warn!(product_id = %entry.id, error = %e, "failed to save product"),
        }
    }
}
