use std::io;

use salesboard_client::contracts::envelope::failure_from_error;
use salesboard_client::{ClientError, SuccessEnvelope};
use serde::Serialize;
use serde_json::{Value, json};

const JSON_VERSION: &str = "v1";

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    let value = match success.command.as_str() {
        "monthly" | "check" => versioned(&success.data),
        _ => {
            return Err(io::Error::other(format!(
                "JSON output is not supported for command `{}`",
                success.command
            )));
        }
    };

    serialize_json_pretty(&value)
}

/// Error payload; `data` carries structured context such as validation issues.
pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    let failure = failure_from_error(error);
    let mut payload = json!({
        "error": {
            "code": failure.error.code,
            "message": failure.error.message,
            "recovery_steps": failure.error.recovery_steps,
        }
    });
    if let Some(data) = failure.data {
        payload["error"]["data"] = data;
    }
    serialize_json_pretty(&payload)
}

fn versioned(data: &Value) -> Value {
    json!({
        "ok": true,
        "version": JSON_VERSION,
        "data": data.clone()
    })
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use salesboard_client::{ClientError, SuccessEnvelope};
    use serde_json::{Value, json};

    use super::{render_error_json, render_success_json};

    fn success(command: &str, data: Value) -> SuccessEnvelope {
        SuccessEnvelope {
            ok: true,
            command: command.to_string(),
            version: "0.1.0".to_string(),
            data,
        }
    }

    #[test]
    fn monthly_json_wraps_data_with_version() {
        let payload = success("monthly", json!({"months_with_sales": []}));

        let rendered = render_success_json(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(value["ok"], Value::Bool(true));
                assert_eq!(value["version"], "v1");
                assert_eq!(value["data"]["months_with_sales"], json!([]));
            }
        }
    }

    #[test]
    fn unknown_commands_are_rejected() {
        let payload = success("import", json!({}));
        assert!(render_success_json(&payload).is_err());
    }

    #[test]
    fn error_json_uses_universal_shape() {
        let error = ClientError::invalid_date("expense", Some("e_1"), "tomorrow");
        let rendered = render_error_json(&error);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(value["error"]["code"], "invalid_date");
                assert!(value["error"]["recovery_steps"].is_array());
                assert_eq!(value["error"]["data"]["record_id"], "e_1");
                assert!(value.get("ok").is_none());
            }
        }
    }
}
