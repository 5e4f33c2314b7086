//! In-memory card store
//!
//! Implements the same `CardStore` contract as the JSON storage without
//! touching the filesystem. Useful when embedding the scheduler.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{LeitnerError, LeitnerResult};
use crate::models::{BoxId, Card, CardId, LevelNumber};

use super::{lock_err, CardStore};

#[derive(Debug, Default)]
pub struct MemoryStore {
    cards: RwLock<HashMap<CardId, Card>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with cards
    pub fn with_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: RwLock::new(cards.into_iter().map(|c| (c.id, c)).collect()),
        }
    }

    pub fn get(&self, id: CardId) -> LeitnerResult<Option<Card>> {
        let cards = self.cards.read().map_err(lock_err)?;
        Ok(cards.get(&id).cloned())
    }

    pub fn len(&self) -> LeitnerResult<usize> {
        let cards = self.cards.read().map_err(lock_err)?;
        Ok(cards.len())
    }

    pub fn is_empty(&self) -> LeitnerResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl CardStore for MemoryStore {
    fn fetch_cards(&self, box_id: BoxId, level: LevelNumber) -> LeitnerResult<Vec<Card>> {
        let cards = self.cards.read().map_err(lock_err)?;
        let mut list: Vec<Card> = cards
            .values()
            .filter(|c| c.box_id == box_id && c.level == level)
            .cloned()
            .collect();
        list.sort_by_key(|c| c.created_at);
        Ok(list)
    }

    fn save(&self, card: &Card) -> LeitnerResult<()> {
        let mut cards = self
            .cards
            .write()
            .map_err(|e| LeitnerError::SaveFailed(e.to_string()))?;
        cards.insert(card.id, card.clone());
        Ok(())
    }

    fn delete(&self, card_id: CardId) -> LeitnerResult<bool> {
        let mut cards = self.cards.write().map_err(lock_err)?;
        Ok(cards.remove(&card_id).is_some())
    }
}
