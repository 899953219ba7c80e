//! Todo service - the record lifecycle lives here.
//!
//! [`TodoService`] owns validation, id generation, merge-on-update semantics,
//! and not-found handling. It is the only component that constructs or
//! mutates a [`TodoRecord`]; everything below it is the store adapter and
//! everything above it is transport.
//!
//! ## Outcome model
//!
//! Client outcomes (bad input, missing record) come back as a failure
//! [`Response`] with `success = false`. Infrastructure failures (duplicate
//! insert, stale version, unreachable store) propagate as [`Err`] so the host
//! can translate or retry them; see
//! [`Error::is_retryable`](crate::Error::is_retryable).

use chrono::Utc;
use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::contract::{CreateTodo, Response, ResponseBody, UpdateTodo};
use crate::error::Result;
use crate::store::TableStore;
use crate::types::{TodoId, TodoRecord, Versioned, TODO_PARTITION};

/// Stateless todo service over a [`TableStore`].
///
/// Each operation is an independent unit of work: it reads and writes through
/// the store handle and returns, holding no state between calls. The handle
/// itself is the only thing shared, so a service value can be kept for the
/// process lifetime or rebuilt per request, whichever the host prefers.
///
/// # Example
///
/// ```ignore
/// use tasktable::prelude::*;
///
/// let service = TodoService::new(MemoryTable::new());
/// let response = service.create(CreateTodo {
///     task_description: Some("water the plants".into()),
/// }).await?;
/// assert!(response.success);
/// ```
#[derive(Debug, Clone)]
pub struct TodoService<S> {
    store: S,
    partition: String,
}

impl<S> TodoService<S>
where
    S: TableStore<TodoRecord>,
{
    /// Create a service over the default `"TODO"` partition.
    pub fn new(store: S) -> Self {
        Self::with_partition(store, TODO_PARTITION)
    }

    /// Create a service over a custom partition.
    pub fn with_partition(store: S, partition: impl Into<String>) -> Self {
        Self {
            store,
            partition: partition.into(),
        }
    }

    /// Partition this service reads and writes.
    pub fn partition(&self) -> &str {
        &self.partition
    }

    /// Create a new todo.
    ///
    /// An empty or absent description is a validation failure: no storage
    /// write happens and the response carries `success = false`. Otherwise a
    /// record is built with a fresh id, the current UTC instant, and
    /// `is_completed = false`, and inserted without a version check.
    pub async fn create(&self, command: CreateTodo) -> Result<Response> {
        let Some(description) = command.task_description.filter(|d| !d.is_empty()) else {
            debug!("create rejected: no task description");
            return Ok(Response::failure("The request must have a TaskDescription."));
        };

        let record = TodoRecord {
            partition_key: self.partition.clone(),
            row_key: TodoId::new(),
            created_time: Utc::now(),
            task_description: description,
            is_completed: false,
        };
        self.store.insert(&record).await?;

        info!(id = %record.row_key, "new todo stored in table");
        Ok(Response::success(
            "New todo stored in table",
            ResponseBody::Record(record),
        ))
    }

    /// Update an existing todo.
    ///
    /// `is_completed` is overwritten unconditionally. The description is a
    /// partial merge: an empty or absent incoming value leaves the stored
    /// description unchanged, it never clears it. (Whether "set to empty"
    /// should instead clear the text is an open product question; this is the
    /// behavior callers currently rely on.)
    ///
    /// The merged record is written with the version captured at retrieval,
    /// so a concurrent writer makes this call fail with a retryable
    /// concurrency conflict instead of silently losing one of the updates.
    pub async fn update(&self, id: TodoId, command: UpdateTodo) -> Result<Response> {
        let Some(found) = self.store.retrieve(&self.partition, &id.to_string()).await? else {
            debug!(%id, "update rejected: todo not found");
            return Ok(Response::failure("Todo not found."));
        };

        let Versioned {
            mut record,
            version,
        } = found;
        record.is_completed = command.is_completed;
        if let Some(description) = command.task_description.filter(|d| !d.is_empty()) {
            record.task_description = description;
        }
        self.store.replace(&record, version).await?;

        info!(%id, "todo updated in table");
        Ok(Response::success(
            format!("Todo: {id}, updated in table."),
            ResponseBody::Record(record),
        ))
    }

    /// Retrieve every record in the partition, one segment, no filtering.
    pub async fn get_all(&self) -> Result<Response> {
        let mut stream = self.store.scan_partition(&self.partition).await?;
        let mut records = Vec::new();
        while let Some(item) = stream.next().await {
            records.push(item?.record);
        }

        info!(count = records.len(), "retrieved all todos");
        Ok(Response::success(
            "Retrieved all todos",
            ResponseBody::Records(records),
        ))
    }

    /// Retrieve a single todo by id.
    pub async fn get_by_id(&self, id: TodoId) -> Result<Response> {
        let Some(found) = self.store.retrieve(&self.partition, &id.to_string()).await? else {
            debug!(%id, "todo not found");
            return Ok(Response::failure("Todo not found."));
        };

        info!(%id, "todo retrieved");
        Ok(Response::success(
            format!("Todo: {id}, retrieved."),
            ResponseBody::Record(found.record),
        ))
    }

    /// Delete a todo by id.
    ///
    /// Returns the record's last known state on success. The delete is
    /// version-checked against the retrieval, like update.
    pub async fn delete(&self, id: TodoId) -> Result<Response> {
        let Some(found) = self.store.retrieve(&self.partition, &id.to_string()).await? else {
            debug!(%id, "delete rejected: todo not found");
            return Ok(Response::failure("Todo not found."));
        };

        self.store.delete(&found.record, found.version).await?;

        info!(%id, "todo deleted");
        Ok(Response::success(
            format!("Todo: {id}, deleted."),
            ResponseBody::Record(found.record),
        ))
    }

    /// Delete every completed record in the partition.
    ///
    /// Meant for a scheduled collaborator. Each delete is version-checked
    /// individually; a record that was modified or removed between the scan
    /// and its delete is skipped, since it may no longer be completed. Any
    /// other store failure aborts the sweep. Returns the number of records
    /// removed.
    pub async fn delete_where_completed(&self) -> Result<usize> {
        info!("deleting completed todos");

        let mut stream = self.store.scan_partition(&self.partition).await?;
        let mut removed = 0usize;
        while let Some(item) = stream.next().await {
            let Versioned { record, version } = item?;
            if !record.is_completed {
                continue;
            }
            match self.store.delete(&record, version).await {
                Ok(()) => removed += 1,
                Err(err) if err.is_retryable() || err.is_not_found() => {
                    warn!(id = %record.row_key, error = %err, "skipping todo modified during sweep");
                }
                Err(err) => return Err(err),
            }
        }

        info!(removed, "completed todo sweep finished");
        Ok(removed)
    }
}
