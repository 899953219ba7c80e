//! # tasktable
//!
//! Todo service over a partitioned key-value table with optimistic
//! concurrency.
//!
//! The crate covers the record lifecycle and the persistence contract:
//! how a todo item is identified, how concurrent updates are reconciled
//! against a versioned record store, and how retrieval works over a single
//! logical partition. Transport (HTTP routing, scheduled triggers, hosting)
//! stays outside; a host decodes requests into commands, calls
//! [`TodoService`], and serializes the [`Response`] envelope back out.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tasktable::prelude::*;
//!
//! let service = TodoService::new(MemoryTable::new());
//!
//! // Create
//! let created = service.create(CreateTodo {
//!     task_description: Some("water the plants".into()),
//! }).await?;
//!
//! // Read back
//! let ResponseBody::Record(record) = created.result.unwrap() else { unreachable!() };
//! let fetched = service.get_by_id(record.row_key).await?;
//! assert!(fetched.success);
//! ```
//!
//! ## Concurrency
//!
//! Every read yields the record together with an opaque [`VersionTag`];
//! conditional writes hand that tag back and fail with a retryable conflict
//! if the record changed in between. The tag is the sole concurrency-control
//! mechanism - no locks are held across operations and nothing retries
//! internally.

#![warn(missing_docs)]

mod contract;
mod error;
mod service;
mod store;
mod types;

pub mod prelude;

// Re-export main entry points
pub use service::TodoService;
pub use error::{Error, Result};

// Re-export the store seam
pub use store::{MemoryTable, RecordStream, TableStore};

// Re-export contract and record types
pub use contract::{CreateTodo, Response, ResponseBody, UpdateTodo};
pub use types::{TableRecord, TodoId, TodoRecord, VersionTag, Versioned, TODO_PARTITION};
