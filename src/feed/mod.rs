pub mod controller;
pub mod exclusion;
pub mod state;
pub mod swipe;

pub use controller::FeedController;
pub use exclusion::ExclusionPolicy;
pub use state::{AdvanceOutcome, FeedSnapshot, FeedState, FetchOutcome, LOOKAHEAD, PAGE_SIZE};
pub use swipe::{consume_swipe, SwipeAction, SwipeDirection, SWIPE_THRESHOLD};
