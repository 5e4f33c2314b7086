//! Leitner box model
//!
//! A box owns the full table of 13 levels. Cards point back at their box by
//! id and at their level by number, so the box never holds card references.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BoxId;
use super::level::{Level, LevelNumber, LEVEL_COUNT};
use crate::error::{LeitnerError, LeitnerResult};

/// Maximum length of a box name
pub const MAX_BOX_NAME_LEN: usize = 100;

/// A named collection of levels and the cards spread among them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeitnerBox {
    /// Unique identifier, assigned in creation order
    pub id: BoxId,

    /// Box name
    pub name: String,

    /// When true a failed card drops back to level 1 instead of staying put
    #[serde(default)]
    pub back_to_top_level: bool,

    /// Level table, one entry per number 1..=13
    pub levels: Vec<Level>,

    /// When the box was created
    pub created_at: DateTime<Utc>,

    /// When the box was last modified
    pub updated_at: DateTime<Utc>,
}

impl LeitnerBox {
    /// Create a box with all 13 levels at their default intervals
    pub fn new(id: BoxId, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            back_to_top_level: false,
            levels: LevelNumber::all().map(Level::new).collect(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Look up a level by number
    ///
    /// A missing level means the stored level table is corrupt.
    pub fn level(&self, number: LevelNumber) -> LeitnerResult<&Level> {
        self.levels
            .iter()
            .find(|l| l.number == number)
            .ok_or(LeitnerError::LevelNotFound {
                box_id: self.id,
                level: number,
            })
    }

    pub fn level_mut(&mut self, number: LevelNumber) -> LeitnerResult<&mut Level> {
        let box_id = self.id;
        self.levels
            .iter_mut()
            .find(|l| l.number == number)
            .ok_or(LeitnerError::LevelNotFound {
                box_id,
                level: number,
            })
    }

    /// Entry level of the box
    pub fn first_level(&self) -> LeitnerResult<&Level> {
        self.level(LevelNumber::FIRST)
    }

    /// Completion level of the box
    pub fn last_level(&self) -> LeitnerResult<&Level> {
        self.level(LevelNumber::LAST)
    }

    /// Change the failure policy
    pub fn set_back_to_top_level(&mut self, enabled: bool) {
        self.back_to_top_level = enabled;
        self.updated_at = Utc::now();
    }

    /// Rename the box
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    /// Validate the box and its level table
    pub fn validate(&self) -> Result<(), BoxValidationError> {
        if self.name.trim().is_empty() {
            return Err(BoxValidationError::EmptyName);
        }

        let name_len = self.name.chars().count();
        if name_len > MAX_BOX_NAME_LEN {
            return Err(BoxValidationError::NameTooLong(name_len));
        }

        if self.levels.len() != usize::from(LEVEL_COUNT) {
            return Err(BoxValidationError::LevelCount(self.levels.len()));
        }

        for number in LevelNumber::all() {
            let matching = self.levels.iter().filter(|l| l.number == number).count();
            match matching {
                0 => return Err(BoxValidationError::MissingLevel(number)),
                1 => {}
                _ => return Err(BoxValidationError::DuplicateLevel(number)),
            }
        }

        if let Some(level) = self.levels.iter().find(|l| l.validate().is_err()) {
            return Err(BoxValidationError::ZeroInterval(level.number));
        }

        Ok(())
    }
}

impl fmt::Display for LeitnerBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for boxes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoxValidationError {
    EmptyName,
    NameTooLong(usize),
    LevelCount(usize),
    MissingLevel(LevelNumber),
    DuplicateLevel(LevelNumber),
    ZeroInterval(LevelNumber),
}

impl fmt::Display for BoxValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Box name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Box name too long ({} chars, max {})", len, MAX_BOX_NAME_LEN)
            }
            Self::LevelCount(n) => {
                write!(f, "Box must have exactly {} levels, found {}", LEVEL_COUNT, n)
            }
            Self::MissingLevel(n) => write!(f, "Level {} is missing", n),
            Self::DuplicateLevel(n) => write!(f, "Level {} appears more than once", n),
            Self::ZeroInterval(n) => write!(f, "Level {} has a zero-day interval", n),
        }
    }
}

impl std::error::Error for BoxValidationError {}
