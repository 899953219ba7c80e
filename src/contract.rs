//! Request/response contract.
//!
//! Inbound command payloads and the outbound envelope. Transport decoding
//! (HTTP bodies, route parameters, timer ticks) is the host's job; these
//! types are the shapes it decodes into and serializes out of.

use serde::{Deserialize, Serialize};

use crate::types::TodoRecord;

/// Payload for the create operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    /// Task text; required non-empty, enforced by the service
    #[serde(default)]
    pub task_description: Option<String>,
}

/// Payload for the update operation.
///
/// The target id arrives separately as a route parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    /// Replacement task text; empty or absent means "leave unchanged"
    #[serde(default)]
    pub task_description: Option<String>,
    /// New completion flag, always applied
    #[serde(default)]
    pub is_completed: bool,
}

/// Outcome envelope wrapping every outward-facing result.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable outcome description
    pub message: String,
    /// The affected record or records, absent on failure
    pub result: Option<ResponseBody>,
}

/// Record payload carried by a successful [`Response`].
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    /// A single affected record
    Record(TodoRecord),
    /// A record collection (get-all)
    Records(Vec<TodoRecord>),
}

impl Response {
    /// Successful outcome carrying the affected record(s).
    pub fn success(message: impl Into<String>, result: ResponseBody) -> Self {
        Self {
            success: true,
            message: message.into(),
            result: Some(result),
        }
    }

    /// Failed outcome; no record payload.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            result: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_payload_tolerates_missing_description() {
        let cmd: CreateTodo = serde_json::from_str("{}").unwrap();
        assert!(cmd.task_description.is_none());

        let cmd: CreateTodo =
            serde_json::from_str(r#"{"taskDescription":"buy milk"}"#).unwrap();
        assert_eq!(cmd.task_description.as_deref(), Some("buy milk"));
    }

    #[test]
    fn update_payload_defaults() {
        let cmd: UpdateTodo = serde_json::from_str("{}").unwrap();
        assert!(cmd.task_description.is_none());
        assert!(!cmd.is_completed);

        let cmd: UpdateTodo =
            serde_json::from_str(r#"{"isCompleted":true,"taskDescription":""}"#).unwrap();
        assert!(cmd.is_completed);
        assert_eq!(cmd.task_description.as_deref(), Some(""));
    }

    #[test]
    fn failure_envelope_has_null_result() {
        let json = serde_json::to_value(Response::failure("Todo not found.")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Todo not found.");
        assert!(json["result"].is_null());
    }
}
