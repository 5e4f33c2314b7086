//! Level model
//!
//! A box is split into 13 ordered levels. Each level carries its own review
//! interval; level 13 is the terminal tier where cards get completed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of levels in every box
pub const LEVEL_COUNT: u8 = 13;

/// Position of a level inside its box, always within 1..=13
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LevelNumber(u8);

impl LevelNumber {
    /// Entry level of every box
    pub const FIRST: LevelNumber = LevelNumber(1);

    /// Terminal level; passing here completes a card
    pub const LAST: LevelNumber = LevelNumber(LEVEL_COUNT);

    /// Create a level number, rejecting anything outside 1..=13
    pub fn new(value: u8) -> Result<Self, LevelValidationError> {
        if (1..=LEVEL_COUNT).contains(&value) {
            Ok(Self(value))
        } else {
            Err(LevelValidationError::NumberOutOfRange(value))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Whether this is the completion tier
    pub fn is_last(&self) -> bool {
        self.0 == LEVEL_COUNT
    }

    /// The level above this one, `None` at the top
    pub fn next(&self) -> Option<Self> {
        if self.is_last() {
            None
        } else {
            Some(Self(self.0 + 1))
        }
    }

    /// All level numbers in ascending order
    pub fn all() -> impl Iterator<Item = LevelNumber> {
        (1..=LEVEL_COUNT).map(LevelNumber)
    }
}

impl TryFrom<u8> for LevelNumber {
    type Error = LevelValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LevelNumber> for u8 {
    fn from(level: LevelNumber) -> Self {
        level.0
    }
}

impl fmt::Display for LevelNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One tier of a box with its review interval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Position within the box
    pub number: LevelNumber,

    /// Days a card waits after a pass before it can be reviewed again
    pub days_to_recommend: u32,
}

impl Level {
    /// Create a level with the default interval (level N waits 2N days)
    pub fn new(number: LevelNumber) -> Self {
        Self {
            number,
            days_to_recommend: default_days_to_recommend(number),
        }
    }

    /// Change the review interval
    pub fn set_days_to_recommend(&mut self, days: u32) -> Result<(), LevelValidationError> {
        if days == 0 {
            return Err(LevelValidationError::ZeroInterval);
        }
        self.days_to_recommend = days;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), LevelValidationError> {
        if self.days_to_recommend == 0 {
            return Err(LevelValidationError::ZeroInterval);
        }
        Ok(())
    }
}

/// Interval a freshly created level starts with
pub fn default_days_to_recommend(number: LevelNumber) -> u32 {
    u32::from(number.value()) * 2
}

/// Validation errors for levels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelValidationError {
    NumberOutOfRange(u8),
    ZeroInterval,
}

impl fmt::Display for LevelValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NumberOutOfRange(n) => {
                write!(f, "Level number {} out of range (1-{})", n, LEVEL_COUNT)
            }
            Self::ZeroInterval => write!(f, "Days to recommend must be at least 1"),
        }
    }
}

impl std::error::Error for LevelValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_number_range() {
        assert!(LevelNumber::new(0).is_err());
        assert!(LevelNumber::new(1).is_ok());
        assert!(LevelNumber::new(13).is_ok());
        assert_eq!(
            LevelNumber::new(14),
            Err(LevelValidationError::NumberOutOfRange(14))
        );
    }

    #[test]
    fn test_level_number_next() {
        assert_eq!(LevelNumber::FIRST.next(), LevelNumber::new(2).ok());
        assert_eq!(LevelNumber::LAST.next(), None);
        assert!(LevelNumber::LAST.is_last());
    }

    #[test]
    fn test_all_levels() {
        let all: Vec<u8> = LevelNumber::all().map(|l| l.value()).collect();
        assert_eq!(all, (1..=13).collect::<Vec<u8>>());
    }

    #[test]
    fn test_default_interval_doubles() {
        assert_eq!(Level::new(LevelNumber::FIRST).days_to_recommend, 2);
        assert_eq!(Level::new(LevelNumber::new(5).unwrap()).days_to_recommend, 10);
        assert_eq!(Level::new(LevelNumber::LAST).days_to_recommend, 26);
    }

    #[test]
    fn test_set_days_to_recommend() {
        let mut level = Level::new(LevelNumber::new(3).unwrap());
        level.set_days_to_recommend(30).unwrap();
        assert_eq!(level.days_to_recommend, 30);

        assert_eq!(
            level.set_days_to_recommend(0),
            Err(LevelValidationError::ZeroInterval)
        );
        assert_eq!(level.days_to_recommend, 30);
    }

    #[test]
    fn test_level_number_rejected_on_deserialize() {
        assert!(serde_json::from_str::<LevelNumber>("14").is_err());
        assert_eq!(
            serde_json::from_str::<LevelNumber>("4").unwrap(),
            LevelNumber::new(4).unwrap()
        );
    }
}
