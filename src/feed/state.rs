use std::collections::HashSet;

use tracing::debug;

use crate::domain::ProductEntry;
use crate::feed::exclusion::ExclusionPolicy;
use crate::sources::FetchParams;

/// Entries requested per fetch
pub const PAGE_SIZE: usize = 20;
/// Remaining entries at or below which a background refill starts
pub const LOOKAHEAD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Appended(usize),
    Exhausted,
    Skipped,
    FetchFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    HasNext,
    NeedsFetch,
    Exhausted,
}

/// What the presentation layer needs to re-render
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedSnapshot {
    pub current: Option<ProductEntry>,
    pub has_more: bool,
    pub loaded_count: usize,
    pub fetch_in_flight: bool,
    /// Pagination stopped on a transport failure; a retry may re-arm it
    pub last_fetch_failed: bool,
}

/// Browse state behind the feed controller.
///
/// `loaded` only grows between resets and never holds two entries with the
/// same id; `cursor` never passes `loaded.len()`.
#[derive(Debug)]
pub struct FeedState {
    loaded: Vec<ProductEntry>,
    loaded_ids: HashSet<String>,
    cursor: usize,
    has_more: bool,
    fetch_in_flight: bool,
    generation: u64,
    query: Option<String>,
    last_fetch_failed: bool,
}

impl FeedState {
    pub fn new() -> Self {
        Self {
            loaded: Vec::new(),
            loaded_ids: HashSet::new(),
            cursor: 0,
            has_more: true,
            fetch_in_flight: false,
            generation: 0,
            query: None,
            last_fetch_failed: false,
        }
    }

    /// Drop everything loaded and start a new generation for `query`
    pub fn clear(&mut self, query: Option<String>) -> u64 {
        self.loaded.clear();
        self.loaded_ids.clear();
        self.cursor = 0;
        self.has_more = true;
        self.fetch_in_flight = false;
        self.last_fetch_failed = false;
        self.query = query;
        self.generation += 1;
        self.generation
    }

    pub fn current(&self) -> Option<&ProductEntry> {
        self.loaded.get(self.cursor)
    }

    pub fn loaded(&self) -> &[ProductEntry] {
        &self.loaded
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.loaded.len() - self.cursor
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn fetch_in_flight(&self) -> bool {
        self.fetch_in_flight
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn can_fetch(&self) -> bool {
        self.has_more && !self.fetch_in_flight
    }

    pub(crate) fn set_fetch_in_flight(&mut self, in_flight: bool) {
        self.fetch_in_flight = in_flight;
    }

    /// Parameters for the next page; the offset counts unique entries loaded so far
    pub fn next_params(&self) -> FetchParams {
        FetchParams {
            offset: self.loaded_ids.len(),
            limit: PAGE_SIZE,
            query: self.query.clone(),
        }
    }

    /// Move to the next entry, stopping at the end of what is loaded
    pub fn advance_cursor(&mut self) {
        if self.cursor < self.loaded.len() {
            self.cursor += 1;
        }
    }

    /// Merge a fetched page: excluded and already-seen ids are dropped
    pub fn apply_page(&mut self, entries: Vec<ProductEntry>, exclusion: &ExclusionPolicy) -> FetchOutcome {
        self.last_fetch_failed = false;

        let returned = entries.len();
        if returned == 0 {
            self.has_more = false;
            debug!(generation = self.generation, "product source returned an empty page");
            return FetchOutcome::Exhausted;
        }

        let mut appended = 0;
        let mut excluded = 0;
        let mut duplicates = 0;

        for entry in entries {
            if exclusion.is_excluded(&entry) {
                excluded += 1;
                continue;
            }
            if !self.loaded_ids.insert(entry.id.clone()) {
                duplicates += 1;
                continue;
            }
            self.loaded.push(entry);
            appended += 1;
        }

        // Sparse pages mean the source is running dry
        if appended < PAGE_SIZE / 2 {
            self.has_more = false;
        }

        debug!(
            generation = self.generation,
            returned,
            appended,
            excluded,
            duplicates,
            has_more = self.has_more,
            "applied product page"
        );

        FetchOutcome::Appended(appended)
    }

    /// Stop paginating after a transport error until the caller re-arms
    pub fn apply_failure(&mut self) {
        self.has_more = false;
        self.last_fetch_failed = true;
    }

    /// Allow another fetch after a failure. Exhaustion reported by the
    /// source is final until the next reset.
    pub fn rearm(&mut self) -> bool {
        if !self.last_fetch_failed {
            return false;
        }
        self.last_fetch_failed = false;
        self.has_more = true;
        true
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            current: self.current().cloned(),
            has_more: self.has_more,
            loaded_count: self.loaded.len(),
            fetch_in_flight: self.fetch_in_flight,
            last_fetch_failed: self.last_fetch_failed,
        }
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}
