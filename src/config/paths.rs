//! Path management for Leitner
//!
//! ## Path Resolution Order
//!
//! 1. `LEITNER_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory (`~/.config/leitner` on Linux,
//!    `~/Library/Application Support/leitner` on macOS, `%APPDATA%\leitner`
//!    on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::LeitnerError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "LEITNER_DATA_DIR";

/// Manages all paths used by Leitner
#[derive(Debug, Clone)]
pub struct LeitnerPaths {
    /// Base directory for all Leitner data
    base_dir: PathBuf,
}

impl LeitnerPaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, LeitnerError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create LeitnerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to boxes.json (boxes and their level tables)
    pub fn boxes_file(&self) -> PathBuf {
        self.data_dir().join("boxes.json")
    }

    /// Get the path to cards.json
    pub fn cards_file(&self) -> PathBuf {
        self.data_dir().join("cards.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), LeitnerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LeitnerError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| LeitnerError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if Leitner has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, LeitnerError> {
    ProjectDirs::from("", "", "leitner")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| LeitnerError::Config("Could not determine home directory".into()))
}
