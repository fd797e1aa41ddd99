use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

const ISSUE_COLUMNS: [Column<'static>; 4] = [
    Column {
        name: "Source",
        align: Align::Left,
    },
    Column {
        name: "Row",
        align: Align::Right,
    },
    Column {
        name: "Field",
        align: Align::Left,
    },
    Column {
        name: "Problem",
        align: Align::Left,
    },
];

pub fn render_check(data: &Value) -> io::Result<String> {
    let issues = data
        .get("issues")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("check output requires issues"))?;

    let mut lines = vec!["Input check".to_string()];
    lines.extend(format::key_value_rows(
        &[
            ("Sales:", source_line(data.get("sales_source"))),
            ("Expenses:", source_line(data.get("expenses_source"))),
        ],
        2,
    ));
    lines.push(String::new());

    if issues.is_empty() {
        lines.push("No issues found. Run `salesboard monthly` with the same sources.".to_string());
        return Ok(lines.join("\n"));
    }

    let rows = issues
        .iter()
        .map(|issue| {
            vec![
                text_field(issue, "source"),
                issue
                    .get("row")
                    .and_then(Value::as_i64)
                    .map(|row| row.to_string())
                    .unwrap_or_default(),
                text_field(issue, "field"),
                text_field(issue, "message"),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let noun = if issues.len() == 1 { "issue" } else { "issues" };
    lines.push(format!("Found {} {noun}:", issues.len()));
    lines.extend(format::render_table_or_blocks(
        &ISSUE_COLUMNS,
        &rows,
        2,
        format::terminal_width(),
        "Issue",
    ));
    lines.push(String::new());
    lines.push("What to do next:".to_string());
    lines.push("  1. Fix the listed rows in your source files.".to_string());
    lines.push("  2. Rerun `salesboard check` until it reports no issues.".to_string());

    Ok(lines.join("\n"))
}

fn source_line(source: Option<&Value>) -> String {
    let Some(summary) = source else {
        return "not provided".to_string();
    };
    let kind = summary
        .get("source_kind")
        .and_then(Value::as_str)
        .unwrap_or("none");
    if kind == "none" {
        return "not provided".to_string();
    }

    let origin = summary
        .get("source_ref")
        .and_then(Value::as_str)
        .unwrap_or(kind);
    let format = summary
        .get("format")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    let read = summary.get("rows_read").and_then(Value::as_i64).unwrap_or(0);
    let valid = summary
        .get("rows_valid")
        .and_then(Value::as_i64)
        .unwrap_or(0);
    format!("{origin} ({format}), {valid} of {read} rows valid")
}

fn text_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}
