//! Box repository for JSON storage
//!
//! Boxes and their level tables live together in boxes.json.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LeitnerError;
use crate::models::{BoxId, LeitnerBox};

use super::file_io::{read_json, write_json_atomic};
use super::lock_err;

/// Serializable box data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct BoxData {
    pub boxes: Vec<LeitnerBox>,
}

/// Repository for box persistence
pub struct BoxRepository {
    path: PathBuf,
    boxes: RwLock<HashMap<BoxId, LeitnerBox>>,
}

impl BoxRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            boxes: RwLock::new(HashMap::new()),
        }
    }

    /// Load boxes from disk
    pub fn load(&self) -> Result<(), LeitnerError> {
        let file_data: BoxData = read_json(&self.path)?;
        let mut boxes = self.boxes.write().map_err(lock_err)?;

        boxes.clear();
        for b in file_data.boxes {
            boxes.insert(b.id, b);
        }

        Ok(())
    }

    /// Save boxes to disk, ordered by id
    pub fn save(&self) -> Result<(), LeitnerError> {
        let boxes = self.boxes.read().map_err(lock_err)?;

        let mut list: Vec<_> = boxes.values().cloned().collect();
        list.sort_by_key(|b| b.id);

        write_json_atomic(&self.path, &BoxData { boxes: list })
    }

    pub fn get(&self, id: BoxId) -> Result<Option<LeitnerBox>, LeitnerError> {
        let boxes = self.boxes.read().map_err(lock_err)?;
        Ok(boxes.get(&id).cloned())
    }

    /// Get a box by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<LeitnerBox>, LeitnerError> {
        let boxes = self.boxes.read().map_err(lock_err)?;
        let name_lower = name.to_lowercase();
        Ok(boxes
            .values()
            .find(|b| b.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// All boxes ordered by id
    pub fn get_all(&self) -> Result<Vec<LeitnerBox>, LeitnerError> {
        let boxes = self.boxes.read().map_err(lock_err)?;
        let mut list: Vec<_> = boxes.values().cloned().collect();
        list.sort_by_key(|b| b.id);
        Ok(list)
    }

    /// Id for the next box: one past the highest id ever stored
    pub fn next_id(&self) -> Result<BoxId, LeitnerError> {
        let boxes = self.boxes.read().map_err(lock_err)?;
        Ok(boxes
            .keys()
            .max()
            .map(|id| id.next())
            .unwrap_or(BoxId::FIRST))
    }

    pub fn upsert(&self, leitner_box: LeitnerBox) -> Result<(), LeitnerError> {
        let mut boxes = self.boxes.write().map_err(lock_err)?;
        boxes.insert(leitner_box.id, leitner_box);
        Ok(())
    }

    pub fn delete(&self, id: BoxId) -> Result<bool, LeitnerError> {
        let mut boxes = self.boxes.write().map_err(lock_err)?;
        Ok(boxes.remove(&id).is_some())
    }

    pub fn count(&self) -> Result<usize, LeitnerError> {
        let boxes = self.boxes.read().map_err(lock_err)?;
        Ok(boxes.len())
    }
}
