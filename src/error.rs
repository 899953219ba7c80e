//! Unified error types for tasktable.
//!
//! This module provides a clean error type that covers every failure path
//! of the service and the record store adapter.

use thiserror::Error;

use crate::types::VersionTag;

/// All tasktable errors.
///
/// This is the canonical error type for all service and store operations.
/// Client-outcome failures (validation, not-found) are usually folded into a
/// failure [`Response`](crate::Response) by the service; the variants here
/// surface when a store operation itself fails.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or incomplete input (e.g. missing task description)
    #[error("validation error: {0}")]
    Validation(String),

    /// Referenced row does not exist in the partition
    #[error("not found: {0}")]
    NotFound(String),

    /// Duplicate row key on insert
    #[error("conflict: row key {0} already exists")]
    Conflict(String),

    /// Stale version tag on replace/delete (the record changed since it was read)
    #[error("concurrency conflict on {row_key}: expected version {expected}, found {actual}")]
    Concurrency {
        /// Row key of the contended record
        row_key: String,
        /// Version the caller held from its last read
        expected: VersionTag,
        /// Version currently stored
        actual: VersionTag,
    },

    /// Underlying storage call failed (network, timeout)
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for tasktable operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is retryable.
    ///
    /// Retryable errors (concurrency conflicts) may succeed on retry with a
    /// fresh read. Retrying is a caller policy; nothing in this crate retries
    /// internally.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Concurrency { .. })
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this is a duplicate-insert conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict(_))
    }

    /// Check if this is a client error (bad input or missing record).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::NotFound(_))
    }
}

// Convert from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concurrency_is_the_only_retryable_error() {
        let err = Error::Concurrency {
            row_key: "abc".to_string(),
            expected: VersionTag::from_raw(1),
            actual: VersionTag::from_raw(2),
        };
        assert!(err.is_retryable());

        assert!(!Error::Validation("x".into()).is_retryable());
        assert!(!Error::NotFound("x".into()).is_retryable());
        assert!(!Error::Conflict("x".into()).is_retryable());
        assert!(!Error::StoreUnavailable("x".into()).is_retryable());
    }

    #[test]
    fn client_error_classification() {
        assert!(Error::Validation("x".into()).is_client_error());
        assert!(Error::NotFound("x".into()).is_client_error());
        assert!(!Error::StoreUnavailable("x".into()).is_client_error());
    }

    #[test]
    fn concurrency_message_names_both_versions() {
        let err = Error::Concurrency {
            row_key: "k1".to_string(),
            expected: VersionTag::from_raw(3),
            actual: VersionTag::from_raw(7),
        };
        let msg = err.to_string();
        assert!(msg.contains("k1"));
        assert!(msg.contains('3'));
        assert!(msg.contains('7'));
    }
}
