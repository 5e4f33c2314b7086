//! Leitner - spaced repetition flashcards on the command line
//!
//! This library provides the scheduling engine and persistence behind the
//! `leitner` binary. Cards live in boxes of 13 levels; passing a review
//! moves a card up one level, failing it keeps it in place or sends it
//! back to level 1 depending on the box. Level N waits 2N days before a
//! card is due again.
//!
//! # Architecture
//!
//! - `scheduler`: eligibility, review queues and level transitions
//! - `models`: boxes, levels and cards
//! - `storage`: JSON file storage and the `CardStore` contract
//! - `services`: business logic and review sessions
//! - `audit`: audit logging system
//! - `config`: configuration and path management
//! - `cli` / `display`: command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use leitner::config::{paths::LeitnerPaths, settings::Settings};
//! use leitner::storage::Storage;
//!
//! let paths = LeitnerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod services;
pub mod storage;

pub use error::{LeitnerError, LeitnerResult};
