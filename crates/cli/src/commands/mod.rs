pub mod bulk_status;
pub mod finalize;
pub mod list;
pub mod show;
pub mod submit;
pub mod update;

use serde::Serialize;
use serde_json::Value;

use expedite_core::errors::DomainError;
use expedite_store::StoreError;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data: None,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn success_with_data(command: &str, message: impl Into<String>, data: Value) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data: Some(data),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }
}

/// Maps the recoverable ruleset failures onto exit codes: 5 for a missing
/// record, 3 for everything the operator can correct and resubmit.
pub(crate) fn domain_failure(command: &str, error: &DomainError) -> CommandResult {
    match error {
        DomainError::NotFound(_) => CommandResult::failure(command, "not_found", error.to_string(), 5),
        _ => CommandResult::failure(command, "validation", error.to_string(), 3),
    }
}

pub(crate) fn store_failure(command: &str, error: &StoreError) -> CommandResult {
    CommandResult::failure(command, "store", error.to_string(), 4)
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
