//! Box service
//!
//! Creation, lookup and configuration of boxes and their level tables.
//! Deleting a box also deletes every card in it.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::audit::EntityType;
use crate::error::{LeitnerError, LeitnerResult};
use crate::models::{BoxId, LeitnerBox, LevelNumber};
use crate::scheduler::is_reviewable;
use crate::storage::Storage;

/// Per-level card counts of a box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSummary {
    pub level: LevelNumber,
    pub days_to_recommend: u32,
    pub total: usize,
    pub reviewable: usize,
    pub completed: usize,
}

/// Service for box management
pub struct BoxService<'a> {
    storage: &'a Storage,
}

impl<'a> BoxService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a box with its 13 levels
    pub fn create_box(&self, name: &str, back_to_top_level: bool) -> LeitnerResult<LeitnerBox> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LeitnerError::Validation("Box name cannot be empty".into()));
        }

        if self.storage.boxes.get_by_name(name)?.is_some() {
            return Err(LeitnerError::Duplicate {
                entity_type: "Box",
                identifier: name.to_string(),
            });
        }

        let mut leitner_box = LeitnerBox::new(self.storage.boxes.next_id()?, name);
        leitner_box.back_to_top_level = back_to_top_level;
        leitner_box
            .validate()
            .map_err(|e| LeitnerError::Validation(e.to_string()))?;

        self.storage.boxes.upsert(leitner_box.clone())?;
        self.storage.boxes.save()?;

        self.storage.log_create(
            EntityType::Box,
            leitner_box.id.to_string(),
            Some(leitner_box.name.clone()),
            &leitner_box,
        )?;

        info!(box_id = %leitner_box.id, name = %leitner_box.name, "created box");
        Ok(leitner_box)
    }

    pub fn get_box(&self, id: BoxId) -> LeitnerResult<Option<LeitnerBox>> {
        self.storage.boxes.get(id)
    }

    /// Get a box or fail with NotFound
    pub fn require_box(&self, id: BoxId) -> LeitnerResult<LeitnerBox> {
        self.storage
            .boxes
            .get(id)?
            .ok_or_else(|| LeitnerError::box_not_found(id.to_string()))
    }

    /// Find a box by name or id string (`3` or `box-3`)
    pub fn find_box(&self, identifier: &str) -> LeitnerResult<Option<LeitnerBox>> {
        if let Some(b) = self.storage.boxes.get_by_name(identifier)? {
            return Ok(Some(b));
        }

        match identifier.parse::<BoxId>() {
            Ok(id) => self.storage.boxes.get(id),
            Err(_) => Ok(None),
        }
    }

    pub fn list_boxes(&self) -> LeitnerResult<Vec<LeitnerBox>> {
        self.storage.boxes.get_all()
    }

    pub fn rename_box(&self, id: BoxId, name: &str) -> LeitnerResult<LeitnerBox> {
        let mut leitner_box = self.require_box(id)?;
        let before = leitner_box.clone();

        let name = name.trim();
        if let Some(existing) = self.storage.boxes.get_by_name(name)? {
            if existing.id != id {
                return Err(LeitnerError::Duplicate {
                    entity_type: "Box",
                    identifier: name.to_string(),
                });
            }
        }

        leitner_box.rename(name);
        leitner_box
            .validate()
            .map_err(|e| LeitnerError::Validation(e.to_string()))?;

        self.persist_update(&before, &leitner_box, format!("name: {} -> {}", before.name, leitner_box.name))?;
        Ok(leitner_box)
    }

    /// Choose whether failed cards drop back to level 1
    pub fn set_back_to_top_level(&self, id: BoxId, enabled: bool) -> LeitnerResult<LeitnerBox> {
        let mut leitner_box = self.require_box(id)?;
        let before = leitner_box.clone();

        if before.back_to_top_level == enabled {
            return Ok(leitner_box);
        }

        leitner_box.set_back_to_top_level(enabled);
        self.persist_update(
            &before,
            &leitner_box,
            format!("back_to_top_level: {} -> {}", before.back_to_top_level, enabled),
        )?;
        Ok(leitner_box)
    }

    /// Change the review interval of one level
    pub fn set_days_to_recommend(
        &self,
        id: BoxId,
        level: LevelNumber,
        days: u32,
    ) -> LeitnerResult<LeitnerBox> {
        let mut leitner_box = self.require_box(id)?;
        let before = leitner_box.clone();
        let previous = leitner_box.level(level)?.days_to_recommend;

        leitner_box
            .level_mut(level)?
            .set_days_to_recommend(days)
            .map_err(|e| LeitnerError::Validation(e.to_string()))?;
        leitner_box.updated_at = Utc::now();

        self.persist_update(
            &before,
            &leitner_box,
            format!("level {} days: {} -> {}", level, previous, days),
        )?;
        Ok(leitner_box)
    }

    /// Delete a box and all of its cards; returns the number of cards removed
    pub fn delete_box(&self, id: BoxId) -> LeitnerResult<usize> {
        let leitner_box = self.require_box(id)?;

        let removed = self.storage.cards.delete_in_box(id)?;
        self.storage.boxes.delete(id)?;
        self.storage.save_all()?;

        self.storage.log_delete(
            EntityType::Box,
            leitner_box.id.to_string(),
            Some(leitner_box.name.clone()),
            &leitner_box,
        )?;

        info!(box_id = %id, cards = removed, "deleted box");
        Ok(removed)
    }

    /// Card counts for every level of a box
    pub fn level_summaries(&self, id: BoxId, now: DateTime<Utc>) -> LeitnerResult<Vec<LevelSummary>> {
        let leitner_box = self.require_box(id)?;
        let cards = self.storage.cards.get_in_box(id)?;

        let mut summaries = Vec::with_capacity(leitner_box.levels.len());
        for number in LevelNumber::all() {
            let level = leitner_box.level(number)?;
            let in_level: Vec<_> = cards.iter().filter(|c| c.level == number).collect();

            summaries.push(LevelSummary {
                level: number,
                days_to_recommend: level.days_to_recommend,
                total: in_level.len(),
                reviewable: in_level
                    .iter()
                    .filter(|c| is_reviewable(c, level, now))
                    .count(),
                completed: in_level.iter().filter(|c| c.completed).count(),
            });
        }

        Ok(summaries)
    }

    fn persist_update(&self, before: &LeitnerBox, after: &LeitnerBox, summary: String) -> LeitnerResult<()> {
        self.storage.boxes.upsert(after.clone())?;
        self.storage.boxes.save()?;
        self.storage.log_update(
            EntityType::Box,
            after.id.to_string(),
            Some(after.name.clone()),
            before,
            after,
            Some(summary),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LeitnerPaths;
    use crate::models::Card;
    use crate::storage::CardStore;
    use chrono::Duration;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LeitnerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_create_box() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BoxService::new(&storage);

        let b = service.create_box("  Spanish ", true).unwrap();
        assert_eq!(b.name, "Spanish");
        assert_eq!(b.id, BoxId::FIRST);
        assert!(b.back_to_top_level);
        assert_eq!(b.levels.len(), 13);
        assert_eq!(b.level(LevelNumber::LAST).unwrap().days_to_recommend, 26);
    }

    #[test]
    fn test_box_ids_are_monotonic() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BoxService::new(&storage);

        let a = service.create_box("A", false).unwrap();
        let b = service.create_box("B", false).unwrap();
        service.delete_box(a.id).unwrap();
        let c = service.create_box("C", false).unwrap();

        assert_eq!(b.id, BoxId::new(2));
        assert_eq!(c.id, BoxId::new(3));
    }

    #[test]
    fn test_create_duplicate_box() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BoxService::new(&storage);

        service.create_box("Spanish", false).unwrap();
        let result = service.create_box("spanish", false);
        assert!(matches!(result, Err(LeitnerError::Duplicate { .. })));
        assert!(service.create_box(" ", false).unwrap_err().is_validation());
    }

    #[test]
    fn test_find_box_by_name_or_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BoxService::new(&storage);
        let b = service.create_box("German", false).unwrap();

        assert_eq!(service.find_box("german").unwrap().unwrap().id, b.id);
        assert_eq!(service.find_box("box-1").unwrap().unwrap().id, b.id);
        assert_eq!(service.find_box("1").unwrap().unwrap().id, b.id);
        assert!(service.find_box("French").unwrap().is_none());
    }

    #[test]
    fn test_set_days_to_recommend() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BoxService::new(&storage);
        let b = service.create_box("Spanish", false).unwrap();
        let three = LevelNumber::new(3).unwrap();

        let updated = service.set_days_to_recommend(b.id, three, 11).unwrap();
        assert_eq!(updated.level(three).unwrap().days_to_recommend, 11);
        // other levels untouched
        assert_eq!(updated.level(LevelNumber::FIRST).unwrap().days_to_recommend, 2);

        let err = service.set_days_to_recommend(b.id, three, 0).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            service.require_box(b.id).unwrap().level(three).unwrap().days_to_recommend,
            11
        );
    }

    #[test]
    fn test_set_back_to_top_level_is_audited() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BoxService::new(&storage);
        let b = service.create_box("Spanish", false).unwrap();

        let updated = service.set_back_to_top_level(b.id, true).unwrap();
        assert!(updated.back_to_top_level);

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[1].summary.as_deref(),
            Some("back_to_top_level: false -> true")
        );
    }

    #[test]
    fn test_rename_box() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BoxService::new(&storage);
        let a = service.create_box("A", false).unwrap();
        service.create_box("B", false).unwrap();

        assert_eq!(service.rename_box(a.id, "Alpha").unwrap().name, "Alpha");
        assert!(matches!(
            service.rename_box(a.id, "b"),
            Err(LeitnerError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_delete_box_cascades_cards() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BoxService::new(&storage);
        let keep = service.create_box("Keep", false).unwrap();
        let gone = service.create_box("Gone", false).unwrap();

        CardStore::save(&storage, &Card::new(gone.id, "a")).unwrap();
        CardStore::save(&storage, &Card::new(gone.id, "b")).unwrap();
        CardStore::save(&storage, &Card::new(keep.id, "c")).unwrap();

        assert_eq!(service.delete_box(gone.id).unwrap(), 2);
        assert!(service.get_box(gone.id).unwrap().is_none());
        assert!(storage.cards.get_in_box(gone.id).unwrap().is_empty());
        assert_eq!(storage.cards.get_in_box(keep.id).unwrap().len(), 1);
        assert!(service.delete_box(gone.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_level_summaries() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BoxService::new(&storage);
        let b = service.create_box("Spanish", false).unwrap();
        let now = Utc::now();

        let fresh = Card::new(b.id, "fresh");
        let mut waiting = Card::new(b.id, "waiting");
        waiting.pass_time = Some(now - Duration::days(1));
        let mut done = Card::new(b.id, "done").at_level(LevelNumber::LAST);
        done.completed = true;

        for card in [&fresh, &waiting, &done] {
            CardStore::save(&storage, card).unwrap();
        }

        let summaries = service.level_summaries(b.id, now).unwrap();
        assert_eq!(summaries.len(), 13);
        assert_eq!(summaries[0].total, 2);
        assert_eq!(summaries[0].reviewable, 1);
        assert_eq!(summaries[12].total, 1);
        assert_eq!(summaries[12].completed, 1);
        assert_eq!(summaries[12].reviewable, 0);
    }
}
