//! Configuration module for Leitner
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::LeitnerPaths;
pub use settings::Settings;
