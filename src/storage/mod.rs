//! Storage layer for Leitner
//!
//! Provides JSON file storage with atomic writes and the `CardStore`
//! contract the review session persists through.

pub mod boxes;
pub mod cards;
pub mod file_io;
pub mod memory;

pub use boxes::BoxRepository;
pub use cards::CardRepository;
pub use file_io::{read_json, write_json_atomic};
pub use memory::MemoryStore;

use std::sync::PoisonError;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::LeitnerPaths;
use crate::error::{LeitnerError, LeitnerResult};
use crate::models::{BoxId, Card, CardId, LevelNumber};

pub(crate) fn lock_err<T>(e: PoisonError<T>) -> LeitnerError {
    LeitnerError::Storage(format!("Failed to acquire lock: {}", e))
}

/// Persistence collaborator of the scheduler
///
/// The scheduler never persists; callers save a card right after each
/// transition. A failed save does not undo the in-memory change.
pub trait CardStore {
    /// Cards currently assigned to one level of a box
    fn fetch_cards(&self, box_id: BoxId, level: LevelNumber) -> LeitnerResult<Vec<Card>>;

    /// Insert or replace a card. Failures surface as `LeitnerError::SaveFailed`.
    fn save(&self, card: &Card) -> LeitnerResult<()>;

    /// Remove a card; returns whether it existed
    fn delete(&self, card_id: CardId) -> LeitnerResult<bool>;
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: LeitnerPaths,
    pub boxes: BoxRepository,
    pub cards: CardRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: LeitnerPaths) -> Result<Self, LeitnerError> {
        paths.ensure_directories()?;

        Ok(Self {
            boxes: BoxRepository::new(paths.boxes_file()),
            cards: CardRepository::new(paths.cards_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &LeitnerPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), LeitnerError> {
        self.boxes.load()?;
        self.cards.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), LeitnerError> {
        self.boxes.save()?;
        self.cards.save()?;
        Ok(())
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> LeitnerResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        summary: Option<String>,
    ) -> LeitnerResult<()> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            summary,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> LeitnerResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    /// Record a scheduling transition of a card
    pub fn log_review(&self, before: &Card, after: &Card, summary: String) -> LeitnerResult<()> {
        self.audit.log(&AuditEntry::review(
            after.id.to_string(),
            Some(after.question.clone()),
            before,
            after,
            summary,
        ))
    }
}

impl CardStore for Storage {
    fn fetch_cards(&self, box_id: BoxId, level: LevelNumber) -> LeitnerResult<Vec<Card>> {
        self.cards.get_in_level(box_id, level)
    }

    /// Stage the card and write cards.json; on a failed write the staged
    /// entry is rolled back so a later save cannot persist it.
    fn save(&self, card: &Card) -> LeitnerResult<()> {
        let save_failed = |e: LeitnerError| LeitnerError::SaveFailed(e.to_string());

        let previous = self.cards.get(card.id).map_err(save_failed)?;
        self.cards.upsert(card.clone()).map_err(save_failed)?;

        if let Err(e) = self.cards.save() {
            match previous {
                Some(previous) => self.cards.upsert(previous).map_err(save_failed)?,
                None => {
                    self.cards.delete(card.id).map_err(save_failed)?;
                }
            }
            return Err(save_failed(e));
        }
        Ok(())
    }

    fn delete(&self, card_id: CardId) -> LeitnerResult<bool> {
        let removed = self.cards.delete(card_id)?;
        if removed {
            self.cards.save()?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LeitnerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, _storage) = create_test_storage();
        assert!(temp_dir.path().join("data").exists());
    }

    #[test]
    fn test_card_store_round_trip() {
        let (temp_dir, storage) = create_test_storage();
        let card = Card::new(BoxId::FIRST, "hola");

        CardStore::save(&storage, &card).unwrap();
        assert!(temp_dir.path().join("data").join("cards.json").exists());

        let fetched = storage.fetch_cards(BoxId::FIRST, LevelNumber::FIRST).unwrap();
        assert_eq!(fetched, vec![card.clone()]);

        assert!(CardStore::delete(&storage, card.id).unwrap());
        assert!(storage
            .fetch_cards(BoxId::FIRST, LevelNumber::FIRST)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_save_failure_is_reported_as_save_failed() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LeitnerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        // A directory where the cards file should be makes the rename fail
        std::fs::create_dir_all(temp_dir.path().join("data").join("cards.json")).unwrap();

        let err = CardStore::save(&storage, &Card::new(BoxId::FIRST, "hola")).unwrap_err();
        assert!(matches!(err, LeitnerError::SaveFailed(_)));
    }

    #[test]
    fn test_failed_save_rolls_back_staged_card() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LeitnerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths.clone()).unwrap();

        let card = Card::new(BoxId::FIRST, "hola");
        let other = Card::new(BoxId::FIRST, "adiós");
        CardStore::save(&storage, &card).unwrap();

        let cards_file = paths.cards_file();
        std::fs::remove_file(&cards_file).unwrap();
        std::fs::create_dir_all(&cards_file).unwrap();

        let mut changed = card.clone();
        changed.level = LevelNumber::new(2).unwrap();
        assert!(CardStore::save(&storage, &changed).is_err());
        assert!(CardStore::save(&storage, &other).is_err());

        // Only what was actually written stays visible
        assert_eq!(storage.cards.get(card.id).unwrap().unwrap().level, LevelNumber::FIRST);
        assert!(storage.cards.get(other.id).unwrap().is_none());

        std::fs::remove_dir(&cards_file).unwrap();
        CardStore::save(&storage, &Card::new(BoxId::FIRST, "gracias")).unwrap();

        let mut reloaded = Storage::new(paths).unwrap();
        reloaded.load_all().unwrap();
        assert_eq!(reloaded.cards.get(card.id).unwrap().unwrap().level, LevelNumber::FIRST);
        assert!(reloaded.cards.get(other.id).unwrap().is_none());
    }

    #[test]
    fn test_log_review_is_readable() {
        let (_temp, storage) = create_test_storage();
        let before = Card::new(BoxId::FIRST, "hola");
        let mut after = before.clone();
        after.level = LevelNumber::new(2).unwrap();

        storage
            .log_review(&before, &after, "pass: level 1 -> 2".into())
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entity_name.as_deref(), Some("hola"));
    }
}
