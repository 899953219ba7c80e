//! Record store adapter.
//!
//! [`TableStore`] abstracts over any partitioned key-value table with
//! optimistic concurrency. The service talks to storage exclusively through
//! this trait; backends (an in-memory table here, a cloud table elsewhere)
//! implement it without the service knowing which one it got.
//!
//! ## Concurrency contract
//!
//! Every read yields a [`Versioned`] record carrying the tag current at read
//! time. Conditional writes (`replace`, `delete`) take that tag as an
//! explicit input and fail with [`Error::Concurrency`](crate::Error) when the
//! stored tag no longer matches, so the last writer holding a stale tag fails
//! rather than silently clobbering. `insert` performs no version check; it
//! fails only on a duplicate row key.

mod memory;

pub use memory::MemoryTable;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::Result;
use crate::types::{TableRecord, VersionTag, Versioned};

/// Lazy, finite, non-restartable sequence of records from a partition scan.
///
/// Order is whatever stable order the backend yields; no application-level
/// sorting is guaranteed.
pub type RecordStream<R> = BoxStream<'static, Result<Versioned<R>>>;

/// Adapter over a partitioned key-value table with optimistic concurrency.
///
/// All implementations must be `Send + Sync` so a store handle can be shared
/// across async tasks.
#[async_trait]
pub trait TableStore<R: TableRecord>: Send + Sync {
    /// Write a new record unconditionally.
    ///
    /// No prior-version check is performed. Fails with
    /// [`Error::Conflict`](crate::Error) if the row key already exists in the
    /// partition.
    async fn insert(&self, record: &R) -> Result<VersionTag>;

    /// Point lookup by `(partition_key, row_key)`.
    ///
    /// An absent record is `Ok(None)`, not an error.
    async fn retrieve(&self, partition_key: &str, row_key: &str) -> Result<Option<Versioned<R>>>;

    /// Replace a record, conditional on its version.
    ///
    /// Fails with [`Error::Concurrency`](crate::Error) if the stored version
    /// no longer matches `expected`, and with
    /// [`Error::NotFound`](crate::Error) if the row vanished entirely.
    /// Returns the tag minted for the new revision.
    async fn replace(&self, record: &R, expected: VersionTag) -> Result<VersionTag>;

    /// Delete a record, conditional on its version.
    ///
    /// Same concurrency contract as [`replace`](TableStore::replace).
    async fn delete(&self, record: &R, expected: VersionTag) -> Result<()>;

    /// Scan every record in a partition.
    ///
    /// The returned stream is lazy and can only be consumed once. An unknown
    /// partition yields an empty stream.
    async fn scan_partition(&self, partition_key: &str) -> Result<RecordStream<R>>;
}
