use salesboard_client::ClientError;
use serde_json::Value;

pub fn render_error(error: &ClientError) -> String {
    let mut lines = vec![
        "Something went wrong, but it's easy to fix.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
    ];

    let issues = error
        .data
        .as_ref()
        .and_then(|data| data.get("issues"))
        .and_then(Value::as_array);
    if let Some(issues) = issues
        && !issues.is_empty()
    {
        lines.push(String::new());
        lines.push("Issues:".to_string());
        for issue in issues {
            lines.push(format!(
                "  {} row {}, {}: {}",
                issue.get("source").and_then(Value::as_str).unwrap_or("input"),
                issue.get("row").and_then(Value::as_i64).unwrap_or(0),
                issue.get("field").and_then(Value::as_str).unwrap_or("?"),
                issue.get("message").and_then(Value::as_str).unwrap_or(""),
            ));
        }
    }

    lines.push(String::new());
    lines.push("What to do next:".to_string());
    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use salesboard_client::ClientError;
    use salesboard_client::contracts::types::InputIssue;

    use super::render_error;

    #[test]
    fn renders_standard_error_layout() {
        let error = ClientError::invalid_argument_with_recovery(
            "bad input",
            vec!["run salesboard --help".to_string()],
        );

        let rendered = render_error(&error);
        assert!(rendered.starts_with("Something went wrong, but it's easy to fix."));
        assert!(rendered.contains("  Error:    invalid_argument"));
        assert!(rendered.contains("  Details:  bad input"));
        assert!(rendered.contains("What to do next:"));
        assert!(rendered.contains("  1. run salesboard --help"));
    }

    #[test]
    fn lists_validation_issues() {
        let error = ClientError::validation_failed(vec![InputIssue {
            source: "expenses".to_string(),
            row: 4,
            field: "price".to_string(),
            message: "price must be greater than 0; got 0".to_string(),
        }]);

        let rendered = render_error(&error);
        assert!(rendered.contains("  Error:    validation_failed"));
        assert!(rendered.contains("  expenses row 4, price: price must be greater than 0; got 0"));
    }
}
