//! Convenient imports for hosts driving the service.
//!
//! ```ignore
//! use tasktable::prelude::*;
//! ```

pub use crate::contract::{CreateTodo, Response, ResponseBody, UpdateTodo};
pub use crate::error::{Error, Result};
pub use crate::service::TodoService;
pub use crate::store::{MemoryTable, TableStore};
pub use crate::types::{TodoId, TodoRecord, VersionTag, Versioned, TODO_PARTITION};
