//! Custom error types for Leitner
//!
//! This module defines the error hierarchy for the library using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::{BoxId, LevelNumber};

/// The main error type for Leitner operations
#[derive(Error, Debug)]
pub enum LeitnerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// A box is missing one of its levels 1..=13.
    ///
    /// The level table of a box is created atomically, so this only happens
    /// when stored data has been corrupted. Callers must not retry.
    #[error("Level {level} missing from box {box_id}")]
    LevelNotFound { box_id: BoxId, level: LevelNumber },

    /// The persistence collaborator failed to save a card
    #[error("Save failed: {0}")]
    SaveFailed(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LeitnerError {
    /// Create a "not found" error for boxes
    pub fn box_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Box",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for cards
    pub fn card_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Card",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error reports a corrupted level table
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::LevelNotFound { .. })
    }
}

impl From<std::io::Error> for LeitnerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LeitnerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Leitner operations
pub type LeitnerResult<T> = Result<T, LeitnerError>;
