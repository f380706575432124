/// Horizontal drag distance, in logical units, a release must exceed to count
pub const SWIPE_THRESHOLD: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    pub fn from_dx(dx: f64) -> Self {
        if dx < 0.0 {
            SwipeDirection::Left
        } else {
            SwipeDirection::Right
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeAction {
    /// Save the current entry, then move past it
    Accept,
    /// Move past the current entry without saving
    Reject,
    /// Released below the threshold; the card goes back to rest
    Cancel,
}

/// Decide what a released gesture means.
///
/// Only `dx` matters; the direction is accepted so call sites read like the
/// gesture they came from. Called once per release. It never advances the
/// feed: the caller advances after `Accept`/`Reject` and must not after `Cancel`.
pub fn consume_swipe(_direction: SwipeDirection, dx: f64) -> SwipeAction {
    if dx > SWIPE_THRESHOLD {
        SwipeAction::Reject
    } else if dx < -SWIPE_THRESHOLD {
        SwipeAction::Accept
    } else {
        SwipeAction::Cancel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_past_threshold() {
        assert_eq!(consume_swipe(SwipeDirection::Right, 81.0), SwipeAction::Reject);
        assert_eq!(consume_swipe(SwipeDirection::Left, -81.0), SwipeAction::Accept);
        assert_eq!(consume_swipe(SwipeDirection::Left, -150.0), SwipeAction::Accept);
    }

    #[test]
    fn test_boundary_is_cancel() {
        assert_eq!(consume_swipe(SwipeDirection::Right, 80.0), SwipeAction::Cancel);
        assert_eq!(consume_swipe(SwipeDirection::Left, -80.0), SwipeAction::Cancel);
        assert_eq!(consume_swipe(SwipeDirection::Right, 0.0), SwipeAction::Cancel);
    }

    #[test]
    fn test_direction_does_not_change_decision() {
        for dx in [-200.0, -81.0, -80.0, 0.0, 80.0, 81.0, 200.0] {
            assert_eq!(
                consume_swipe(SwipeDirection::Left, dx),
                consume_swipe(SwipeDirection::Right, dx),
                "dx = {}",
                dx
            );
        }
    }

    #[test]
    fn test_from_dx() {
        assert_eq!(SwipeDirection::from_dx(-1.0), SwipeDirection::Left);
        assert_eq!(SwipeDirection::from_dx(0.0), SwipeDirection::Right);
        assert_eq!(SwipeDirection::from_dx(5.0), SwipeDirection::Right);
    }
}
