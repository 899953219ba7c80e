//! In-memory partitioned table.
//!
//! Reference backend for [`TableStore`] and the test double for anything
//! driving the service.
//!
//! # Design
//!
//! - DashMap keyed by partition: writers to different partitions never contend
//! - FxHashMap within a partition shard: O(1) row lookups
//! - One global `AtomicU64` mints version tags, monotone across partitions
//!
//! A `MemoryTable` handle is cheap to clone (shared interior), the way a
//! connection-pool handle is.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use futures::stream::{self, StreamExt};
use rustc_hash::FxHashMap;

use super::{RecordStream, TableStore};
use crate::error::{Error, Result};
use crate::types::{TableRecord, VersionTag, Versioned};

/// Rows of a single partition.
#[derive(Debug)]
struct PartitionShard<R> {
    rows: FxHashMap<String, Versioned<R>>,
}

impl<R> Default for PartitionShard<R> {
    fn default() -> Self {
        Self {
            rows: FxHashMap::default(),
        }
    }
}

#[derive(Debug)]
struct Inner<R> {
    partitions: DashMap<String, PartitionShard<R>>,
    /// Global version counter for minted tags
    version: AtomicU64,
}

/// In-memory [`TableStore`] backend.
///
/// # Example
///
/// ```ignore
/// use tasktable::prelude::*;
///
/// let table = MemoryTable::new();
/// let service = TodoService::new(table.clone());
/// ```
#[derive(Debug)]
pub struct MemoryTable<R> {
    inner: Arc<Inner<R>>,
}

impl<R> Clone for MemoryTable<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R> MemoryTable<R> {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                partitions: DashMap::new(),
                version: AtomicU64::new(0),
            }),
        }
    }

    /// Total number of records across all partitions.
    pub fn len(&self) -> usize {
        self.inner
            .partitions
            .iter()
            .map(|shard| shard.value().rows.len())
            .sum()
    }

    /// Check if the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn next_version(&self) -> VersionTag {
        VersionTag::from_raw(self.inner.version.fetch_add(1, Ordering::AcqRel) + 1)
    }
}

impl<R> Default for MemoryTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl<R: TableRecord> TableStore<R> for MemoryTable<R> {
    async fn insert(&self, record: &R) -> Result<VersionTag> {
        let mut shard = self
            .inner
            .partitions
            .entry(record.partition_key().to_string())
            .or_default();

        let row_key = record.row_key();
        if shard.rows.contains_key(&row_key) {
            return Err(Error::Conflict(row_key));
        }

        let version = self.next_version();
        shard.rows.insert(
            row_key,
            Versioned {
                record: record.clone(),
                version,
            },
        );
        Ok(version)
    }

    async fn retrieve(&self, partition_key: &str, row_key: &str) -> Result<Option<Versioned<R>>> {
        Ok(self
            .inner
            .partitions
            .get(partition_key)
            .and_then(|shard| shard.rows.get(row_key).cloned()))
    }

    async fn replace(&self, record: &R, expected: VersionTag) -> Result<VersionTag> {
        let row_key = record.row_key();
        let mut shard = self
            .inner
            .partitions
            .get_mut(record.partition_key())
            .ok_or_else(|| Error::NotFound(row_key.clone()))?;

        let stored = shard
            .rows
            .get_mut(&row_key)
            .ok_or_else(|| Error::NotFound(row_key.clone()))?;
        if stored.version != expected {
            return Err(Error::Concurrency {
                row_key,
                expected,
                actual: stored.version,
            });
        }

        let version = self.next_version();
        *stored = Versioned {
            record: record.clone(),
            version,
        };
        Ok(version)
    }

    async fn delete(&self, record: &R, expected: VersionTag) -> Result<()> {
        let row_key = record.row_key();
        let mut shard = self
            .inner
            .partitions
            .get_mut(record.partition_key())
            .ok_or_else(|| Error::NotFound(row_key.clone()))?;

        let stored = shard
            .rows
            .get(&row_key)
            .ok_or_else(|| Error::NotFound(row_key.clone()))?;
        if stored.version != expected {
            return Err(Error::Concurrency {
                row_key,
                expected,
                actual: stored.version,
            });
        }

        shard.rows.remove(&row_key);
        Ok(())
    }

    async fn scan_partition(&self, partition_key: &str) -> Result<RecordStream<R>> {
        // Snapshot the shard at call time; the stream itself holds no locks.
        let snapshot: Vec<Versioned<R>> = self
            .inner
            .partitions
            .get(partition_key)
            .map(|shard| shard.rows.values().cloned().collect())
            .unwrap_or_default();

        Ok(stream::iter(snapshot.into_iter().map(Ok)).boxed())
    }
}
