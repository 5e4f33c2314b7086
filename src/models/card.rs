//! Card model
//!
//! A card is the unit the scheduler moves between levels. Tags are carried
//! as opaque metadata and never looked at by the scheduler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BoxId, CardId};
use super::level::LevelNumber;

/// Maximum length of a question
pub const MAX_QUESTION_LEN: usize = 1000;

/// A question/answer pair scheduled inside one box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier
    pub id: CardId,

    /// Box this card belongs to
    pub box_id: BoxId,

    /// Level the card currently sits at
    pub level: LevelNumber,

    /// Prompt shown during review
    pub question: String,

    /// Expected answer or description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,

    /// Set once the card passes at the last level
    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub favorite: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite_date: Option<DateTime<Utc>>,

    /// Last successful review, `None` if never passed
    #[serde(default)]
    pub pass_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// When the card was created
    pub created_at: DateTime<Utc>,

    /// When the card was last modified
    pub updated_at: DateTime<Utc>,
}

impl Card {
    /// Create a card at level 1 of a box
    pub fn new(box_id: BoxId, question: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CardId::new(),
            box_id,
            level: LevelNumber::FIRST,
            question: question.into(),
            answer: None,
            completed: false,
            favorite: false,
            favorite_date: None,
            pass_time: None,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a card with an answer
    pub fn with_answer(
        box_id: BoxId,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        let mut card = Self::new(box_id, question);
        card.answer = Some(answer.into());
        card
    }

    /// Place the card directly at a level (used on insertion)
    pub fn at_level(mut self, level: LevelNumber) -> Self {
        self.level = level;
        self
    }

    /// Whether the card has never been passed
    pub fn is_new(&self) -> bool {
        self.pass_time.is_none()
    }

    /// Validate the card
    pub fn validate(&self) -> Result<(), CardValidationError> {
        if self.question.trim().is_empty() {
            return Err(CardValidationError::EmptyQuestion);
        }

        let question_len = self.question.chars().count();
        if question_len > MAX_QUESTION_LEN {
            return Err(CardValidationError::QuestionTooLong(question_len));
        }

        if self.completed && !self.level.is_last() {
            return Err(CardValidationError::CompletedBelowLastLevel(self.level));
        }

        Ok(())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.question)
    }
}

/// Validation errors for cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardValidationError {
    EmptyQuestion,
    QuestionTooLong(usize),
    CompletedBelowLastLevel(LevelNumber),
}

impl fmt::Display for CardValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyQuestion => write!(f, "Question cannot be empty"),
            Self::QuestionTooLong(len) => write!(
                f,
                "Question too long ({} chars, max {})",
                len, MAX_QUESTION_LEN
            ),
            Self::CompletedBelowLastLevel(level) => {
                write!(f, "Card marked completed at level {}", level)
            }
        }
    }
}

impl std::error::Error for CardValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card() {
        let card = Card::new(BoxId::FIRST, "hola");
        assert_eq!(card.level, LevelNumber::FIRST);
        assert!(card.is_new());
        assert!(!card.completed);
        assert!(!card.favorite);
        assert!(card.answer.is_none());
    }

    #[test]
    fn test_with_answer_at_level() {
        let level = LevelNumber::new(6).unwrap();
        let card = Card::with_answer(BoxId::FIRST, "hola", "hello").at_level(level);
        assert_eq!(card.answer.as_deref(), Some("hello"));
        assert_eq!(card.level, level);
    }

    #[test]
    fn test_validation() {
        let mut card = Card::new(BoxId::FIRST, "hola");
        assert!(card.validate().is_ok());

        card.question = "   ".into();
        assert_eq!(card.validate(), Err(CardValidationError::EmptyQuestion));

        card.question = "hola".into();
        card.completed = true;
        assert_eq!(
            card.validate(),
            Err(CardValidationError::CompletedBelowLastLevel(LevelNumber::FIRST))
        );

        card.level = LevelNumber::LAST;
        assert!(card.validate().is_ok());
    }

    #[test]
    fn test_question_length_counts_characters() {
        let mut card = Card::new(BoxId::FIRST, "س".repeat(MAX_QUESTION_LEN));
        assert!(card.validate().is_ok());

        card.question.push('س');
        assert_eq!(
            card.validate(),
            Err(CardValidationError::QuestionTooLong(MAX_QUESTION_LEN + 1))
        );
    }

    #[test]
    fn test_deserialize_minimal() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "box_id": 1,
            "level": 3,
            "question": "hola",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.level.value(), 3);
        assert!(card.pass_time.is_none());
        assert!(card.tags.is_empty());
    }
}
