use serde_json::{Value, json};
use thiserror::Error;

use crate::contracts::types::InputIssue;

pub(crate) const INPUT_HELP_COMMAND: &str = "salesboard check --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `salesboard {cmd} --help` for usage."),
            None => "Run `salesboard --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn invalid_input_format(message: &str, source: &str, received_format: &str) -> Self {
        Self::new(
            "invalid_input_format",
            message,
            vec![
                "Provide a JSON array of records or a CSV file with a header row.".to_string(),
                format!("Run `{INPUT_HELP_COMMAND}` to review the accepted fields."),
            ],
        )
        .with_data(json!({
            "source": source,
            "received_format": received_format,
            "supported_formats": ["json_array", "csv"],
        }))
    }

    pub fn input_schema_mismatch(
        source: &str,
        required_headers: Vec<String>,
        actual_headers: Vec<String>,
    ) -> Self {
        Self::new(
            "input_schema_mismatch",
            &format!("CSV headers for {source} are missing required columns."),
            vec![
                "Include every required header; extra headers are ignored.".to_string(),
                format!("Run `{INPUT_HELP_COMMAND}` to review the accepted fields."),
            ],
        )
        .with_data(json!({
            "source": source,
            "required_headers": required_headers,
            "actual_headers": actual_headers,
        }))
    }

    pub fn validation_failed(issues: Vec<InputIssue>) -> Self {
        let issue_count = issues.len();
        Self::new(
            "validation_failed",
            &format!("Input failed validation: {issue_count} field(s) need fixes."),
            vec![
                "Fix the listed issues in your source files.".to_string(),
                "Rerun `salesboard check` until it reports no issues.".to_string(),
            ],
        )
        .with_data(json!({
            "issues": issues,
        }))
    }

    pub fn invalid_date(record_kind: &str, record_id: Option<&str>, value: &str) -> Self {
        let subject = match record_id {
            Some(id) => format!("{record_kind} `{id}`"),
            None => format!("a {record_kind} without id"),
        };
        Self::new(
            "invalid_date",
            &format!("Could not read the date `{value}` on {subject}."),
            vec![
                "Use `YYYY-MM-DD` or an RFC 3339 timestamp such as `2024-01-10T15:04:05Z`."
                    .to_string(),
            ],
        )
        .with_data(json!({
            "record_kind": record_kind,
            "record_id": record_id,
            "value": value,
        }))
    }

    pub fn invalid_config(key: &str, value: &str, expected: &str) -> Self {
        Self::new(
            "invalid_config",
            &format!("Configuration value `{value}` for `{key}` is invalid: expected {expected}."),
            vec![format!("Set `{key}` to {expected}, or unset it to use the default.")],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn is_internal(&self) -> bool {
        self.code.starts_with("internal_")
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::ClientError;

    #[test]
    fn invalid_date_names_record_and_value() {
        let error = ClientError::invalid_date("sale", Some("s_1"), "not-a-date");
        assert_eq!(error.code, "invalid_date");
        assert!(error.message.contains("sale `s_1`"));
        assert!(error.message.contains("not-a-date"));
        assert!(error.data.is_some());
    }

    #[test]
    fn command_hint_points_at_subcommand_help() {
        let error = ClientError::invalid_argument_for_command("bad flag", Some("monthly"));
        assert_eq!(error.recovery_steps.len(), 1);
        assert!(error.recovery_steps[0].contains("salesboard monthly --help"));
        assert!(!error.is_internal());
        assert!(ClientError::internal_serialization("boom").is_internal());
    }
}
