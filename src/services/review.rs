//! Review session
//!
//! Drives one pass over the due cards of a single level. Each outcome is
//! applied by the scheduler and saved immediately; there is nothing to
//! roll back when a session is abandoned.
//!
//! If a save fails the mutated card stays selected and the session refuses
//! new outcomes until the caller either retries the save or discards it.

use tracing::{debug, warn};

use crate::error::{LeitnerError, LeitnerResult};
use crate::models::{Card, LeitnerBox, LevelNumber};
use crate::scheduler::{self, Clock, Transition};
use crate::storage::CardStore;

/// Result of reporting pass or fail for the selected card
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    /// Card state before the transition
    pub before: Card,
    /// Card state after the transition, as saved
    pub after: Card,
    pub transition: Transition,
    /// Cards still waiting in the queue (excluding the next selected one)
    pub remaining: usize,
}

/// A review pass over one level of one box
pub struct ReviewSession<'s, S: CardStore + ?Sized> {
    store: &'s S,
    clock: &'s dyn Clock,
    leitner_box: LeitnerBox,
    level: LevelNumber,
    queue: Vec<Card>,
    selected: Option<Card>,
    unsaved: Option<ReviewOutcome>,
    total: usize,
    pass_count: usize,
    failed_count: usize,
}

impl<'s, S: CardStore + ?Sized> ReviewSession<'s, S> {
    /// Load the level's cards and build the queue
    ///
    /// With `shuffle` off the queue follows store order.
    pub fn start(
        store: &'s S,
        clock: &'s dyn Clock,
        leitner_box: LeitnerBox,
        level: LevelNumber,
        shuffle: bool,
    ) -> LeitnerResult<Self> {
        let level_config = leitner_box.level(level)?.clone();
        let cards = store.fetch_cards(leitner_box.id, level)?;
        let now = clock.now();

        let mut queue = if shuffle {
            scheduler::build_review_queue(cards, &level_config, now)
        } else {
            scheduler::reviewable_cards(&cards, &level_config, now)
                .cloned()
                .collect()
        };

        // Selection pops from the back
        queue.reverse();
        let total = queue.len();
        let selected = queue.pop();

        debug!(box_id = %leitner_box.id, %level, total, "review session started");

        Ok(Self {
            store,
            clock,
            leitner_box,
            level,
            queue,
            selected,
            unsaved: None,
            total,
            pass_count: 0,
            failed_count: 0,
        })
    }

    /// The card awaiting an outcome
    pub fn current(&self) -> Option<&Card> {
        self.selected.as_ref()
    }

    pub fn level(&self) -> LevelNumber {
        self.level
    }

    pub fn leitner_box(&self) -> &LeitnerBox {
        &self.leitner_box
    }

    /// Number of cards the session started with
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn pass_count(&self) -> usize {
        self.pass_count
    }

    pub fn failed_count(&self) -> usize {
        self.failed_count
    }

    /// Cards not yet reviewed, including the selected one
    pub fn remaining(&self) -> usize {
        self.queue.len() + usize::from(self.selected.is_some())
    }

    /// True once every queued card has an outcome
    pub fn is_finished(&self) -> bool {
        self.selected.is_none() && self.unsaved.is_none()
    }

    /// Whether a failed save is waiting for `retry_save` or `discard_unsaved`
    pub fn has_unsaved(&self) -> bool {
        self.unsaved.is_some()
    }

    /// Report a successful review of the selected card
    pub fn pass(&mut self) -> LeitnerResult<ReviewOutcome> {
        self.record(true)
    }

    /// Report a failed review of the selected card
    pub fn fail(&mut self) -> LeitnerResult<ReviewOutcome> {
        self.record(false)
    }

    fn record(&mut self, passed: bool) -> LeitnerResult<ReviewOutcome> {
        if self.unsaved.is_some() {
            return Err(LeitnerError::Validation(
                "Previous outcome has not been saved".into(),
            ));
        }

        let before = self
            .selected
            .take()
            .ok_or_else(|| LeitnerError::Validation("No card selected for review".into()))?;

        let mut card = before.clone();
        let now = self.clock.now();
        let applied = if passed {
            scheduler::pass(&mut card, &self.leitner_box, now)
        } else {
            scheduler::fail(&mut card, &self.leitner_box, now)
        };

        let transition = match applied {
            Ok(t) => t,
            Err(e) => {
                // Nothing changed; keep the card selected
                self.selected = Some(before);
                return Err(e);
            }
        };

        if passed {
            self.pass_count += 1;
        } else {
            self.failed_count += 1;
        }

        let outcome = ReviewOutcome {
            before,
            after: card,
            transition,
            remaining: self.queue.len(),
        };

        self.commit(outcome)
    }

    fn commit(&mut self, outcome: ReviewOutcome) -> LeitnerResult<ReviewOutcome> {
        match self.store.save(&outcome.after) {
            Ok(()) => {
                self.selected = self.queue.pop();
                Ok(outcome)
            }
            Err(e) => {
                warn!(card = %outcome.after.id, error = %e, "failed to save review outcome");
                self.selected = Some(outcome.after.clone());
                self.unsaved = Some(outcome);
                Err(match e {
                    LeitnerError::SaveFailed(_) => e,
                    other => LeitnerError::SaveFailed(other.to_string()),
                })
            }
        }
    }

    /// Try saving the pending outcome again
    pub fn retry_save(&mut self) -> LeitnerResult<ReviewOutcome> {
        let outcome = self
            .unsaved
            .take()
            .ok_or_else(|| LeitnerError::Validation("No unsaved outcome".into()))?;
        self.selected = None;
        self.commit(outcome)
    }

    /// Give up on the pending outcome and move to the next card
    ///
    /// The store never kept the failed write, so the card keeps its previous
    /// state. The counters still include the discarded outcome.
    pub fn discard_unsaved(&mut self) -> Option<Card> {
        let outcome = self.unsaved.take()?;
        self.selected = self.queue.pop();
        Some(outcome.after)
    }
}
