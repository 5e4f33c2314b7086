//! Service layer for Leitner
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, auditing, and cross-entity operations such as
//! deleting a box together with its cards.

pub mod card;
pub mod leitner_box;
pub mod review;

pub use card::CardService;
pub use leitner_box::{BoxService, LevelSummary};
pub use review::{ReviewOutcome, ReviewSession};
