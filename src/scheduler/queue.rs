//! Review queue construction
//!
//! A queue covers a single level of a single box. Its order is shuffled and
//! carries no meaning.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::eligibility::is_reviewable;
use crate::models::{Card, Level};

/// Filter `cards` down to the ones due at `now` and shuffle them
///
/// Cards assigned to a different level than `level` are dropped. An empty
/// result means there is nothing to review.
pub fn build_review_queue(cards: Vec<Card>, level: &Level, now: DateTime<Utc>) -> Vec<Card> {
    build_review_queue_with_rng(cards, level, now, &mut rand::thread_rng())
}

/// Same as [`build_review_queue`] with a caller-supplied RNG
pub fn build_review_queue_with_rng<R>(
    cards: Vec<Card>,
    level: &Level,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<Card>
where
    R: Rng + ?Sized,
{
    let offered = cards.len();
    let mut queue: Vec<Card> = cards
        .into_iter()
        .filter(|card| card.level == level.number && is_reviewable(card, level, now))
        .collect();

    queue.shuffle(rng);

    debug!(
        level = %level.number,
        offered,
        queued = queue.len(),
        "built review queue"
    );

    queue
}

/// Filter without shuffling, keeping the input order
pub fn reviewable_cards<'a>(
    cards: &'a [Card],
    level: &'a Level,
    now: DateTime<Utc>,
) -> impl Iterator<Item = &'a Card> + 'a {
    cards
        .iter()
        .filter(move |card| card.level == level.number && is_reviewable(card, level, now))
}
