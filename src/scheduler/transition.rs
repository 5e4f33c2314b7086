//! Card state transitions
//!
//! Passing moves a card one level up and restarts its wait; passing at the
//! last level completes it. Failing never touches `pass_time`, and only
//! moves the card when the box sends failures back to level 1.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LeitnerError, LeitnerResult};
use crate::models::{Card, LeitnerBox, LevelNumber};

/// What caused a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Pass,
    Fail,
    Reset,
    ForceComplete,
    Move,
}

impl std::fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionKind::Pass => write!(f, "pass"),
            TransitionKind::Fail => write!(f, "fail"),
            TransitionKind::Reset => write!(f, "reset"),
            TransitionKind::ForceComplete => write!(f, "complete"),
            TransitionKind::Move => write!(f, "move"),
        }
    }
}

/// Summary of a single transition applied to a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub kind: TransitionKind,
    pub from: LevelNumber,
    pub to: LevelNumber,
    /// `completed` flag after the transition
    pub completed: bool,
}

impl Transition {
    /// Whether the card changed level
    pub fn moved(&self) -> bool {
        self.from != self.to
    }

    /// Short human-readable description, e.g. "level 3 -> 4"
    pub fn summary(&self) -> String {
        let mut text = format!("{}: level {} -> {}", self.kind, self.from, self.to);
        if self.completed {
            text.push_str(" (completed)");
        }
        text
    }
}

fn ensure_same_box(card: &Card, leitner_box: &LeitnerBox) -> LeitnerResult<()> {
    if card.box_id != leitner_box.id {
        return Err(LeitnerError::Validation(format!(
            "Card {} belongs to {}, not {}",
            card.id, card.box_id, leitner_box.id
        )));
    }
    Ok(())
}

fn ensure_active(card: &Card) -> LeitnerResult<()> {
    if card.completed {
        return Err(LeitnerError::Validation(format!(
            "Card {} is already completed",
            card.id
        )));
    }
    Ok(())
}

/// Record a successful review
pub fn pass(card: &mut Card, leitner_box: &LeitnerBox, now: DateTime<Utc>) -> LeitnerResult<Transition> {
    ensure_same_box(card, leitner_box)?;
    ensure_active(card)?;

    let from = card.level;

    // Resolve the target before mutating so a corrupt box leaves the card intact
    let to = match from.next() {
        Some(upper) => leitner_box.level(upper)?.number,
        None => from,
    };

    card.pass_time = Some(now);
    card.level = to;
    if from.is_last() {
        card.completed = true;
    }
    card.updated_at = now;

    let transition = Transition {
        kind: TransitionKind::Pass,
        from,
        to,
        completed: card.completed,
    };
    debug!(card = %card.id, box_id = %leitner_box.id, %from, %to, completed = card.completed, "card passed");
    Ok(transition)
}

/// Record a failed review
pub fn fail(card: &mut Card, leitner_box: &LeitnerBox, now: DateTime<Utc>) -> LeitnerResult<Transition> {
    ensure_same_box(card, leitner_box)?;
    ensure_active(card)?;

    let from = card.level;
    let to = if leitner_box.back_to_top_level {
        leitner_box.first_level()?.number
    } else {
        from
    };

    card.level = to;
    card.updated_at = now;

    let transition = Transition {
        kind: TransitionKind::Fail,
        from,
        to,
        completed: card.completed,
    };
    debug!(card = %card.id, box_id = %leitner_box.id, %from, %to, "card failed");
    Ok(transition)
}

/// Put a card back to the state of a freshly created one
///
/// Applies regardless of the box's failure policy or completion.
pub fn reset_to_first_level(
    card: &mut Card,
    leitner_box: &LeitnerBox,
    now: DateTime<Utc>,
) -> LeitnerResult<Transition> {
    ensure_same_box(card, leitner_box)?;

    let from = card.level;
    card.level = leitner_box.first_level()?.number;
    card.pass_time = None;
    card.completed = false;
    card.updated_at = now;

    debug!(card = %card.id, box_id = %leitner_box.id, %from, "card reset");
    Ok(Transition {
        kind: TransitionKind::Reset,
        from,
        to: card.level,
        completed: false,
    })
}

/// Mark a card completed without earning it through reviews
pub fn force_complete(
    card: &mut Card,
    leitner_box: &LeitnerBox,
    now: DateTime<Utc>,
) -> LeitnerResult<Transition> {
    ensure_same_box(card, leitner_box)?;

    let from = card.level;
    card.level = leitner_box.last_level()?.number;
    card.pass_time = Some(now);
    card.completed = true;
    card.updated_at = now;

    debug!(card = %card.id, box_id = %leitner_box.id, %from, "card force-completed");
    Ok(Transition {
        kind: TransitionKind::ForceComplete,
        from,
        to: card.level,
        completed: true,
    })
}

/// Relocate a card into another box, starting over at its first level
pub fn move_to_box(
    card: &mut Card,
    target: &LeitnerBox,
    now: DateTime<Utc>,
) -> LeitnerResult<Transition> {
    let from = card.level;
    let to = target.first_level()?.number;
    let source = card.box_id;

    card.box_id = target.id;
    card.level = to;
    card.pass_time = None;
    card.completed = false;
    card.updated_at = now;

    debug!(card = %card.id, from_box = %source, to_box = %target.id, "card moved");
    Ok(Transition {
        kind: TransitionKind::Move,
        from,
        to,
        completed: false,
    })
}

/// Flip the favorite flag; returns the new value
pub fn toggle_favorite(card: &mut Card, now: DateTime<Utc>) -> bool {
    card.favorite = !card.favorite;
    card.favorite_date = if card.favorite { Some(now) } else { None };
    card.updated_at = now;
    card.favorite
}
