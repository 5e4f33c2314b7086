//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
    /// A scheduling transition (pass, fail, reset, complete, move)
    Review,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Review => write!(f, "REVIEW"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Box,
    Card,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Box => write!(f, "Box"),
            EntityType::Card => write!(f, "Card"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    /// Display form of the affected entity's id
    pub entity_id: String,

    /// Box name or card question
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Entity state before the operation (updates, deletes, reviews)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Entity state after the operation (creates, updates, reviews)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl AuditEntry {
    fn build(
        operation: Operation,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            entity_name,
            before: None,
            after: None,
            summary: None,
        }
    }

    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        let mut entry = Self::build(Operation::Create, entity_type, entity_id.into(), entity_name);
        entry.after = serde_json::to_value(entity).ok();
        entry
    }

    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        summary: Option<String>,
    ) -> Self {
        let mut entry = Self::build(Operation::Update, entity_type, entity_id.into(), entity_name);
        entry.before = serde_json::to_value(before).ok();
        entry.after = serde_json::to_value(after).ok();
        entry.summary = summary;
        entry
    }

    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        let mut entry = Self::build(Operation::Delete, entity_type, entity_id.into(), entity_name);
        entry.before = serde_json::to_value(entity).ok();
        entry
    }

    /// Record a scheduling transition of a card
    pub fn review<T: Serialize>(
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        summary: impl Into<String>,
    ) -> Self {
        let mut entry = Self::build(Operation::Review, EntityType::Card, entity_id.into(), entity_name);
        entry.before = serde_json::to_value(before).ok();
        entry.after = serde_json::to_value(after).ok();
        entry.summary = Some(summary.into());
        entry
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(summary) = &self.summary {
            output.push_str(&format!("\n  {}", summary));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Review.to_string(), "REVIEW");
    }

    #[test]
    fn test_create_entry() {
        let data = json!({"name": "Spanish"});
        let entry = AuditEntry::create(EntityType::Box, "box-1", Some("Spanish".into()), &data);

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.entity_type, EntityType::Box);
        assert!(entry.before.is_none());
        assert!(entry.after.is_some());
    }

    #[test]
    fn test_review_entry() {
        let before = json!({"level": 3});
        let after = json!({"level": 4});
        let entry = AuditEntry::review("crd-1234abcd", None, &before, &after, "pass: level 3 -> 4");

        assert_eq!(entry.operation, Operation::Review);
        assert_eq!(entry.entity_type, EntityType::Card);
        assert_eq!(entry.after, Some(after));
        assert_eq!(entry.summary.as_deref(), Some("pass: level 3 -> 4"));
    }

    #[test]
    fn test_delete_entry() {
        let entry = AuditEntry::delete(EntityType::Card, "crd-1", None, &json!({"q": "hola"}));
        assert_eq!(entry.operation, Operation::Delete);
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::update(
            EntityType::Box,
            "box-2",
            Some("German".into()),
            &json!({"back_to_top_level": false}),
            &json!({"back_to_top_level": true}),
            Some("back_to_top_level: false -> true".into()),
        );

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("UPDATE Box box-2 (German)"));
        assert!(formatted.contains("back_to_top_level: false -> true"));
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::create(EntityType::Card, "crd-1", None, &json!({}));
        let text = serde_json::to_string(&entry).unwrap();
        assert!(text.contains("\"operation\":\"create\""));
        let back: AuditEntry = serde_json::from_str(&text).unwrap();
        assert_eq!(back.entity_type, EntityType::Card);
    }
}
