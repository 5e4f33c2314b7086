//! Card repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LeitnerError;
use crate::models::{BoxId, Card, CardId, LevelNumber};

use super::file_io::{read_json, write_json_atomic};
use super::lock_err;

/// Serializable card data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CardData {
    pub cards: Vec<Card>,
}

/// Repository for card persistence
pub struct CardRepository {
    path: PathBuf,
    cards: RwLock<HashMap<CardId, Card>>,
}

fn sorted(mut cards: Vec<Card>) -> Vec<Card> {
    cards.sort_by(|a, b| {
        (a.box_id, a.level, a.created_at).cmp(&(b.box_id, b.level, b.created_at))
    });
    cards
}

impl CardRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            cards: RwLock::new(HashMap::new()),
        }
    }

    /// Load cards from disk
    pub fn load(&self) -> Result<(), LeitnerError> {
        let file_data: CardData = read_json(&self.path)?;
        let mut cards = self.cards.write().map_err(lock_err)?;

        cards.clear();
        for card in file_data.cards {
            cards.insert(card.id, card);
        }

        Ok(())
    }

    /// Save cards to disk
    pub fn save(&self) -> Result<(), LeitnerError> {
        let cards = self.cards.read().map_err(lock_err)?;
        let list = sorted(cards.values().cloned().collect());
        write_json_atomic(&self.path, &CardData { cards: list })
    }

    pub fn get(&self, id: CardId) -> Result<Option<Card>, LeitnerError> {
        let cards = self.cards.read().map_err(lock_err)?;
        Ok(cards.get(&id).cloned())
    }

    /// Find a card by full id or short display prefix (e.g. `crd-1a2b3c4d`)
    ///
    /// An ambiguous prefix matches nothing.
    pub fn find_by_prefix(&self, prefix: &str) -> Result<Option<Card>, LeitnerError> {
        if let Ok(id) = prefix.parse::<CardId>() {
            return self.get(id);
        }

        let cards = self.cards.read().map_err(lock_err)?;
        let mut matches = cards.values().filter(|c| c.id.matches_prefix(prefix));
        match (matches.next(), matches.next()) {
            (Some(card), None) => Ok(Some(card.clone())),
            _ => Ok(None),
        }
    }

    pub fn get_all(&self) -> Result<Vec<Card>, LeitnerError> {
        let cards = self.cards.read().map_err(lock_err)?;
        Ok(sorted(cards.values().cloned().collect()))
    }

    pub fn get_in_box(&self, box_id: BoxId) -> Result<Vec<Card>, LeitnerError> {
        let cards = self.cards.read().map_err(lock_err)?;
        Ok(sorted(
            cards.values().filter(|c| c.box_id == box_id).cloned().collect(),
        ))
    }

    pub fn get_in_level(&self, box_id: BoxId, level: LevelNumber) -> Result<Vec<Card>, LeitnerError> {
        let cards = self.cards.read().map_err(lock_err)?;
        Ok(sorted(
            cards
                .values()
                .filter(|c| c.box_id == box_id && c.level == level)
                .cloned()
                .collect(),
        ))
    }

    pub fn upsert(&self, card: Card) -> Result<(), LeitnerError> {
        let mut cards = self.cards.write().map_err(lock_err)?;
        cards.insert(card.id, card);
        Ok(())
    }

    pub fn delete(&self, id: CardId) -> Result<bool, LeitnerError> {
        let mut cards = self.cards.write().map_err(lock_err)?;
        Ok(cards.remove(&id).is_some())
    }

    /// Remove every card of a box; returns how many were removed
    pub fn delete_in_box(&self, box_id: BoxId) -> Result<usize, LeitnerError> {
        let mut cards = self.cards.write().map_err(lock_err)?;
        let before = cards.len();
        cards.retain(|_, c| c.box_id != box_id);
        Ok(before - cards.len())
    }
}
