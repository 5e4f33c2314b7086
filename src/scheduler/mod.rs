//! Leitner scheduling engine
//!
//! Pure, synchronous rules over in-memory cards and boxes:
//!
//! - `eligibility`: whether a card is due, and when it will be
//! - `queue`: filtering one level's cards into a shuffled review queue
//! - `transition`: pass/fail promotion and demotion plus the explicit
//!   reset, force-complete, move and favorite operations
//! - `clock`: the injectable time source
//!
//! Nothing here persists. Callers save each card right after a transition.

pub mod clock;
pub mod eligibility;
pub mod queue;
pub mod transition;

pub use clock::{Clock, FixedClock, SystemClock};
pub use eligibility::{is_reviewable, next_review_at, remaining_days};
pub use queue::{build_review_queue, build_review_queue_with_rng, reviewable_cards};
pub use transition::{
    fail, force_complete, move_to_box, pass, reset_to_first_level, toggle_favorite, Transition,
    TransitionKind,
};
