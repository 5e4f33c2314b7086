//! Card service
//!
//! CRUD for cards plus the explicit user overrides of the schedule:
//! reset, force-complete, move to another box and favorite.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::audit::EntityType;
use crate::error::{LeitnerError, LeitnerResult};
use crate::models::{BoxId, Card, CardId, LeitnerBox, LevelNumber};
use crate::scheduler::{self, Transition};
use crate::storage::{CardStore, Storage};

/// Service for card management
pub struct CardService<'a> {
    storage: &'a Storage,
}

impl<'a> CardService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn require_box(&self, id: BoxId) -> LeitnerResult<LeitnerBox> {
        self.storage
            .boxes
            .get(id)?
            .ok_or_else(|| LeitnerError::box_not_found(id.to_string()))
    }

    pub fn require_card(&self, id: CardId) -> LeitnerResult<Card> {
        self.storage
            .cards
            .get(id)?
            .ok_or_else(|| LeitnerError::card_not_found(id.to_string()))
    }

    /// Add a card to a box, at level 1 unless a level is given
    ///
    /// Placing a card at the last level does not complete it; it still has
    /// to pass there once.
    pub fn add_card(
        &self,
        box_id: BoxId,
        question: &str,
        answer: Option<&str>,
        level: Option<LevelNumber>,
    ) -> LeitnerResult<Card> {
        let leitner_box = self.require_box(box_id)?;
        let level = match level {
            Some(number) => leitner_box.level(number)?.number,
            None => leitner_box.first_level()?.number,
        };

        let mut card = Card::new(box_id, question.trim()).at_level(level);
        card.answer = answer
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(String::from);

        card.validate()
            .map_err(|e| LeitnerError::Validation(e.to_string()))?;

        CardStore::save(self.storage, &card)?;

        self.storage.log_create(
            EntityType::Card,
            card.id.to_string(),
            Some(card.question.clone()),
            &card,
        )?;

        info!(card = %card.id, box_id = %box_id, level = %card.level, "added card");
        Ok(card)
    }

    pub fn get_card(&self, id: CardId) -> LeitnerResult<Option<Card>> {
        self.storage.cards.get(id)
    }

    /// Find a card by full id or short id (`crd-1a2b3c4d`)
    pub fn find_card(&self, identifier: &str) -> LeitnerResult<Option<Card>> {
        self.storage.cards.find_by_prefix(identifier)
    }

    /// Cards of a box, optionally restricted to one level
    pub fn list_cards(&self, box_id: BoxId, level: Option<LevelNumber>) -> LeitnerResult<Vec<Card>> {
        match level {
            Some(level) => self.storage.cards.get_in_level(box_id, level),
            None => self.storage.cards.get_in_box(box_id),
        }
    }

    /// Favorite cards of a box, most recently favorited first
    pub fn list_favorites(&self, box_id: BoxId) -> LeitnerResult<Vec<Card>> {
        let mut cards: Vec<Card> = self
            .storage
            .cards
            .get_in_box(box_id)?
            .into_iter()
            .filter(|c| c.favorite)
            .collect();
        cards.sort_by(|a, b| b.favorite_date.cmp(&a.favorite_date));
        Ok(cards)
    }

    /// Change the question and/or answer text
    pub fn edit_card(
        &self,
        id: CardId,
        question: Option<&str>,
        answer: Option<&str>,
        clear_answer: bool,
    ) -> LeitnerResult<Card> {
        let mut card = self.require_card(id)?;
        let before = card.clone();

        if let Some(question) = question {
            card.question = question.trim().to_string();
        }

        if clear_answer {
            card.answer = None;
        } else if let Some(answer) = answer {
            card.answer = Some(answer.trim().to_string());
        }

        card.validate()
            .map_err(|e| LeitnerError::Validation(e.to_string()))?;

        let mut changes = Vec::new();
        if before.question != card.question {
            changes.push(format!("question: {} -> {}", before.question, card.question));
        }
        if before.answer != card.answer {
            changes.push(format!("answer: {:?} -> {:?}", before.answer, card.answer));
        }
        if changes.is_empty() {
            return Ok(card);
        }

        card.updated_at = Utc::now();
        CardStore::save(self.storage, &card)?;
        self.storage.log_update(
            EntityType::Card,
            card.id.to_string(),
            Some(card.question.clone()),
            &before,
            &card,
            Some(changes.join(", ")),
        )?;

        Ok(card)
    }

    pub fn delete_card(&self, id: CardId) -> LeitnerResult<()> {
        let card = self.require_card(id)?;

        self.storage.cards.delete(id)?;
        self.storage.cards.save()?;

        self.storage.log_delete(
            EntityType::Card,
            card.id.to_string(),
            Some(card.question.clone()),
            &card,
        )
    }

    /// Flip the favorite flag
    pub fn toggle_favorite(&self, id: CardId, now: DateTime<Utc>) -> LeitnerResult<Card> {
        let mut card = self.require_card(id)?;
        let before = card.clone();

        let favorite = scheduler::toggle_favorite(&mut card, now);

        CardStore::save(self.storage, &card)?;
        self.storage.log_update(
            EntityType::Card,
            card.id.to_string(),
            Some(card.question.clone()),
            &before,
            &card,
            Some(format!("favorite: {} -> {}", before.favorite, favorite)),
        )?;

        Ok(card)
    }

    /// Send a card back to level 1 as if it were new
    pub fn reset_card(&self, id: CardId, now: DateTime<Utc>) -> LeitnerResult<(Card, Transition)> {
        self.apply(id, |card, leitner_box| {
            scheduler::reset_to_first_level(card, leitner_box, now)
        })
    }

    /// Mark a card completed at the last level
    pub fn complete_card(&self, id: CardId, now: DateTime<Utc>) -> LeitnerResult<(Card, Transition)> {
        self.apply(id, |card, leitner_box| {
            scheduler::force_complete(card, leitner_box, now)
        })
    }

    /// Move a card to level 1 of another box
    pub fn move_card(
        &self,
        id: CardId,
        target: BoxId,
        now: DateTime<Utc>,
    ) -> LeitnerResult<(Card, Transition)> {
        let target = self.require_box(target)?;
        self.apply(id, |card, _| scheduler::move_to_box(card, &target, now))
    }

    fn apply<F>(&self, id: CardId, transition: F) -> LeitnerResult<(Card, Transition)>
    where
        F: FnOnce(&mut Card, &LeitnerBox) -> LeitnerResult<Transition>,
    {
        let mut card = self.require_card(id)?;
        let leitner_box = self.require_box(card.box_id)?;
        let before = card.clone();

        let transition = transition(&mut card, &leitner_box)?;

        CardStore::save(self.storage, &card)?;
        self.storage.log_review(&before, &card, transition.summary())?;

        info!(card = %card.id, kind = %transition.kind, "applied card override");
        Ok((card, transition))
    }
}
