//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod card;
pub mod leitner_box;
pub mod review;

pub use card::{handle_card_command, CardCommands};
pub use leitner_box::{handle_box_command, BoxCommands, FailPolicy};
pub use review::{handle_review_command, run_review};

use crate::error::{LeitnerError, LeitnerResult};
use crate::models::{LeitnerBox, LevelNumber};
use crate::services::BoxService;
use crate::storage::Storage;

/// Look up a box by name or id, failing with NotFound
pub(crate) fn resolve_box(storage: &Storage, identifier: &str) -> LeitnerResult<LeitnerBox> {
    BoxService::new(storage)
        .find_box(identifier)?
        .ok_or_else(|| LeitnerError::box_not_found(identifier))
}

pub(crate) fn parse_level(value: u8) -> LeitnerResult<LevelNumber> {
    LevelNumber::new(value).map_err(|e| LeitnerError::Validation(e.to_string()))
}
