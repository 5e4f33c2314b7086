//! Audit logging system for Leitner
//!
//! Records every create, update and delete of boxes and cards, and every
//! scheduling transition, in an append-only JSONL log.
//!
//! - `AuditEntry`: one logged operation with optional before/after values
//! - `AuditLogger`: appends entries to the log file and reads them back

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
