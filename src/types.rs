//! Core types for the todo record store.
//!
//! This module defines the fundamental types used throughout the crate:
//! - [`TodoId`]: Unique identifier of a record within a partition
//! - [`VersionTag`]: Opaque optimistic-concurrency token
//! - [`Versioned`]: A record paired with the version it was read at
//! - [`TodoRecord`]: The persisted entity
//! - [`TableRecord`]: What the store adapter requires of a row type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Partition key shared by all todo records.
///
/// The service keeps every record in one logical collection; the partition
/// exists so the store contract stays honest about scan scope.
pub const TODO_PARTITION: &str = "TODO";

/// Unique identifier for a todo record.
///
/// Generated once at creation (UUID v4), immutable for the record's lifetime,
/// and used as the row key within the partition.
///
/// # Examples
///
/// ```ignore
/// use tasktable::TodoId;
///
/// let id1 = TodoId::new();
/// let id2 = TodoId::new();
/// assert_ne!(id1, id2); // Each TodoId is unique
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Create a new random TodoId using UUID v4
    pub fn new() -> Self {
        TodoId(Uuid::new_v4())
    }

    /// Parse a TodoId from its hyphenated string form.
    ///
    /// Route parameters arrive as strings; a malformed id is a validation
    /// failure, not a lookup miss.
    pub fn parse_str(input: &str) -> Result<Self> {
        Uuid::parse_str(input)
            .map(TodoId)
            .map_err(|_| Error::Validation(format!("malformed todo id: {input}")))
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque optimistic-concurrency token.
///
/// The store mints a fresh tag on every successful write. Callers hold the
/// tag from their most recent read and hand it back to `replace`/`delete`;
/// a stale tag means the record changed in between and the write fails.
/// Nothing outside a store backend should construct a meaningful value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionTag(u64);

impl VersionTag {
    /// Wrap a raw counter value. Store backends mint tags; everyone else
    /// treats them as equality-only.
    pub fn from_raw(raw: u64) -> Self {
        VersionTag(raw)
    }
}

impl std::fmt::Display for VersionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record paired with the version tag it was read at.
///
/// Reads and scans yield this so the caller holds the token needed for a
/// subsequent conditional write on the same record.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    /// The record as stored
    pub record: T,
    /// Version tag current at read time
    pub version: VersionTag,
}

/// The persisted todo entity.
///
/// Constructed only by the service's create operation and mutated only by its
/// update operation; everything else reads. Serializes with the wire casing
/// hosts expect (`partitionKey`, `rowKey`, `createdTime`, `taskDescription`,
/// `isCompleted`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoRecord {
    /// Partition the record lives in (`"TODO"` for every record)
    pub partition_key: String,
    /// Unique row key within the partition, assigned at creation
    pub row_key: TodoId,
    /// Creation instant (UTC), never changed afterwards
    pub created_time: DateTime<Utc>,
    /// The task text; never empty after a successful create
    pub task_description: String,
    /// Completion flag, false at creation
    pub is_completed: bool,
}

/// Row type requirements for the store adapter.
///
/// The adapter is polymorphic over any record that can name its partition and
/// row key. Composition over a narrow capability set; row types do not
/// inherit from any table machinery.
pub trait TableRecord: Clone + Send + Sync + 'static {
    /// Partition this record belongs to
    fn partition_key(&self) -> &str;
    /// Row key identifying the record within its partition
    fn row_key(&self) -> String;
}

impl TableRecord for TodoRecord {
    fn partition_key(&self) -> &str {
        &self.partition_key
    }

    fn row_key(&self) -> String {
        self.row_key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== TodoId Tests =====

    #[test]
    fn test_todo_id_uniqueness() {
        let id1 = TodoId::new();
        let id2 = TodoId::new();
        assert_ne!(id1, id2, "Each TodoId should be unique");
    }

    #[test]
    fn test_todo_id_parse_roundtrip() {
        let id = TodoId::new();
        let parsed = TodoId::parse_str(&id.to_string()).unwrap();
        assert_eq!(id, parsed, "TodoId should roundtrip through its string form");
    }

    #[test]
    fn test_todo_id_parse_rejects_garbage() {
        let err = TodoId::parse_str("not-a-uuid").unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_todo_id_serde_transparent() {
        let id = TodoId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""), "TodoId should serialize as a bare string");
    }

    // ===== TodoRecord Tests =====

    fn sample_record() -> TodoRecord {
        TodoRecord {
            partition_key: TODO_PARTITION.to_string(),
            row_key: TodoId::new(),
            created_time: Utc::now(),
            task_description: "water the plants".to_string(),
            is_completed: false,
        }
    }

    #[test]
    fn test_record_wire_casing() {
        let record = sample_record();
        let json = serde_json::to_value(&record).unwrap();
        for field in [
            "partitionKey",
            "rowKey",
            "createdTime",
            "taskDescription",
            "isCompleted",
        ] {
            assert!(json.get(field).is_some(), "missing wire field {field}");
        }
    }

    #[test]
    fn test_record_serde_roundtrip() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let back: TodoRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn test_table_record_keys() {
        let record = sample_record();
        assert_eq!(record.partition_key(), TODO_PARTITION);
        assert_eq!(TableRecord::row_key(&record), record.row_key.to_string());
    }
}
