//! Append-only JSONL audit log

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{LeitnerError, LeitnerResult};

use super::entry::AuditEntry;

/// Writes audit entries, one JSON object per line
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry and flush it
    pub fn log(&self, entry: &AuditEntry) -> LeitnerResult<()> {
        let line = serde_json::to_string(entry)
            .map_err(|e| LeitnerError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| LeitnerError::Io(format!("Failed to open audit log: {}", e)))?;

        writeln!(file, "{}", line)
            .and_then(|_| file.flush())
            .map_err(|e| LeitnerError::Io(format!("Failed to write audit entry: {}", e)))
    }

    /// Read every entry, oldest first
    pub fn read_all(&self) -> LeitnerResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| LeitnerError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                LeitnerError::Io(format!("Failed to read audit log line {}: {}", index + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry = serde_json::from_str(&line).map_err(|e| {
                LeitnerError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    index + 1,
                    e
                ))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// The most recent `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> LeitnerResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    /// Entries about one entity, oldest first
    pub fn entries_for(&self, entity_id: &str) -> LeitnerResult<Vec<AuditEntry>> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|e| e.entity_id == entity_id)
            .collect())
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}
