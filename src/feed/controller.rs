use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::ProductEntry;
use crate::feed::exclusion::ExclusionPolicy;
use crate::feed::state::{AdvanceOutcome, FeedSnapshot, FeedState, FetchOutcome, LOOKAHEAD};
use crate::feed::swipe::{self, SwipeAction, SwipeDirection};
use crate::services::SaveSink;
use crate::sources::{FetchParams, ProductSource};

/// Drives the swipe feed: decides which product is shown next and when to
/// fetch more, independently of gesture and network timing.
///
/// Cloning is cheap and every clone drives the same feed. Background refills
/// are spawned on the current Tokio runtime.
#[derive(Clone)]
pub struct FeedController {
    inner: Arc<Inner>,
}

struct Inner {
    source: Arc<dyn ProductSource>,
    sink: Arc<dyn SaveSink>,
    exclusion: ExclusionPolicy,
    state: Mutex<FeedState>,
    snapshots: watch::Sender<FeedSnapshot>,
    refill: Mutex<Option<JoinHandle<FetchOutcome>>>,
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, FeedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, snapshot: FeedSnapshot) {
        self.snapshots.send_replace(snapshot);
    }
}

/// Holds the in-flight slot for one generation. Dropping it without
/// `release` (error, panic or a dropped future) frees the slot too.
struct FetchTicket {
    inner: Arc<Inner>,
    generation: u64,
    params: FetchParams,
    released: bool,
}

impl FetchTicket {
    fn claim(inner: &Arc<Inner>, state: &mut FeedState) -> Option<Self> {
        if !state.can_fetch() {
            return None;
        }
        state.set_fetch_in_flight(true);
        Some(Self {
            inner: Arc::clone(inner),
            generation: state.generation(),
            params: state.next_params(),
            released: false,
        })
    }

    /// Must be called with the state lock held by the caller
    fn release(mut self, state: &mut FeedState) {
        if state.generation() == self.generation {
            state.set_fetch_in_flight(false);
        }
        self.released = true;
    }
}

impl Drop for FetchTicket {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let snapshot = {
            let mut state = self.inner.lock_state();
            if state.generation() != self.generation {
                return;
            }
            state.set_fetch_in_flight(false);
            state.snapshot()
        };
        self.inner.publish(snapshot);
    }
}

async fn run_fetch(ticket: FetchTicket) -> FetchOutcome {
    let result = ticket.inner.source.fetch(&ticket.params).await;
    let inner = Arc::clone(&ticket.inner);
    let generation = ticket.generation;

    let (outcome, snapshot) = {
        let mut state = inner.lock_state();

        if state.generation() != generation {
            debug!(
                stale_generation = generation,
                current_generation = state.generation(),
                "dropping product page from before reset"
            );
            ticket.release(&mut state);
            return FetchOutcome::Skipped;
        }

        let outcome = match result {
            Ok(entries) => state.apply_page(entries, &inner.exclusion),
            Err(e) => {
                warn!(
                    offset = ticket.params.offset,
                    query = ?ticket.params.query,
                    error = %e,
                    "product fetch failed"
                );
                state.apply_failure();
                FetchOutcome::FetchFailed
            }
        };
        ticket.release(&mut state);
        (outcome, state.snapshot())
    };

    inner.publish(snapshot);
    outcome
}

impl FeedController {
    pub fn new(
        source: Arc<dyn ProductSource>,
        sink: Arc<dyn SaveSink>,
        exclusion: ExclusionPolicy,
    ) -> Self {
        let state = FeedState::new();
        let (snapshots, _) = watch::channel(state.snapshot());

        Self {
            inner: Arc::new(Inner {
                source,
                sink,
                exclusion,
                state: Mutex::new(state),
                snapshots,
                refill: Mutex::new(None),
            }),
        }
    }

    /// Load the first page for `query`. Does nothing when the feed already
    /// holds, or is already fetching, results for the same query.
    pub fn initialize(&self, query: Option<String>) {
        {
            let state = self.inner.lock_state();
            let started = state.loaded_count() > 0 || state.fetch_in_flight();
            if state.generation() > 0 && started && state.query() == query.as_deref() {
                debug!(query = ?query, "feed already initialized");
                return;
            }
        }
        self.reset(query);
    }

    /// Clear the feed and fetch the first page for `query`. A fetch still
    /// running for the previous query is ignored when it lands.
    pub fn reset(&self, query: Option<String>) {
        let (ticket, snapshot) = {
            let mut state = self.inner.lock_state();
            let generation = state.clear(query);
            info!(generation, query = ?state.query(), "feed reset");
            (FetchTicket::claim(&self.inner, &mut state), state.snapshot())
        };
        self.inner.publish(snapshot);

        if let Some(ticket) = ticket {
            self.spawn_refill(ticket);
        }
    }

    /// Fetch the next page.
    ///
    /// The in-flight slot is claimed when this is called, not when the future
    /// is first polled, so a second call before the first completes returns
    /// `Skipped`. Never fails: source errors come back as `FetchFailed`.
    pub fn request_more(&self) -> impl Future<Output = FetchOutcome> + Send + 'static {
        let (ticket, snapshot) = {
            let mut state = self.inner.lock_state();
            let ticket = FetchTicket::claim(&self.inner, &mut state);
            (ticket, state.snapshot())
        };

        if ticket.is_some() {
            self.inner.publish(snapshot);
        }

        async move {
            match ticket {
                Some(ticket) => run_fetch(ticket).await,
                None => FetchOutcome::Skipped,
            }
        }
    }

    pub fn current(&self) -> Option<ProductEntry> {
        self.inner.lock_state().current().cloned()
    }

    /// Move past the current entry, starting a background refill once the
    /// unseen tail shrinks to the lookahead.
    pub fn advance(&self) -> AdvanceOutcome {
        let (outcome, ticket, snapshot) = {
            let mut state = self.inner.lock_state();
            state.advance_cursor();

            let ticket = if state.remaining() <= LOOKAHEAD {
                FetchTicket::claim(&self.inner, &mut state)
            } else {
                None
            };

            let outcome = if state.current().is_some() {
                AdvanceOutcome::HasNext
            } else if state.has_more() {
                AdvanceOutcome::NeedsFetch
            } else {
                AdvanceOutcome::Exhausted
            };

            (outcome, ticket, state.snapshot())
        };
        self.inner.publish(snapshot);

        if let Some(ticket) = ticket {
            debug!(offset = ticket.params.offset, "starting background refill");
            self.spawn_refill(ticket);
        }

        outcome
    }

    pub fn consume_swipe(&self, direction: SwipeDirection, dx: f64) -> SwipeAction {
        swipe::consume_swipe(direction, dx)
    }

    /// Carry out a swipe decision: save then advance on `Accept`, advance on
    /// `Reject`, nothing on `Cancel`.
    pub fn apply_swipe(&self, action: SwipeAction) -> Option<AdvanceOutcome> {
        match action {
            SwipeAction::Cancel => None,
            SwipeAction::Reject => Some(self.advance()),
            SwipeAction::Accept => {
                if let Some(entry) = self.current() {
                    self.inner.sink.save(&entry);
                }
                Some(self.advance())
            }
        }
    }

    /// Allow a manual retry after a failed fetch. Returns false when the
    /// feed stopped because the source ran out.
    pub fn rearm(&self) -> bool {
        let (rearmed, snapshot) = {
            let mut state = self.inner.lock_state();
            (state.rearm(), state.snapshot())
        };
        if rearmed {
            self.inner.publish(snapshot);
        }
        rearmed
    }

    /// Wait for the most recently started background fetch, if any
    pub async fn wait_for_refill(&self) -> Option<FetchOutcome> {
        let handle = self
            .inner
            .refill
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()?;

        match handle.await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!(error = %e, "background refill did not complete");
                Some(FetchOutcome::FetchFailed)
            }
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.inner.snapshots.subscribe()
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.inner.lock_state().snapshot()
    }

    pub fn has_more(&self) -> bool {
        self.inner.lock_state().has_more()
    }

    pub fn cursor(&self) -> usize {
        self.inner.lock_state().cursor()
    }

    pub fn loaded_count(&self) -> usize {
        self.inner.lock_state().loaded_count()
    }

    pub fn loaded_ids(&self) -> Vec<String> {
        self.inner
            .lock_state()
            .loaded()
            .iter()
            .map(|e| e.id.clone())
            .collect()
    }

    fn spawn_refill(&self, ticket: FetchTicket) {
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let handle = runtime.spawn(run_fetch(ticket));
                *self
                    .inner
                    .refill
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner) = Some(handle);
            }
            Err(e) => {
                warn!(error = %e, "no async runtime available, product fetch not started");
                drop(ticket);
            }
        }
    }
}
