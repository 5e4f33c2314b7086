//! Core data models for Leitner
//!
//! This module contains the data structures of the scheduling domain:
//! boxes, their level tables, and the cards distributed among them.

pub mod card;
pub mod ids;
pub mod leitner_box;
pub mod level;

pub use card::{Card, CardValidationError};
pub use ids::{BoxId, CardId};
pub use leitner_box::{BoxValidationError, LeitnerBox};
pub use level::{Level, LevelNumber, LevelValidationError, LEVEL_COUNT};
