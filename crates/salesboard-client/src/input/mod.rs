pub(crate) mod parse;
pub(crate) mod source;
pub(crate) mod validate;

use tracing::debug;

use crate::contracts::types::{InputIssue, SourceSummary};
use crate::error::INPUT_HELP_COMMAND;
use crate::input::validate::ValidatedRows;
use crate::records::{Expense, Sale};
use crate::{ClientError, ClientResult};

pub(crate) use source::ensure_single_stdin;

/// Field layout of one record source.
#[derive(Debug)]
pub(crate) struct RecordSchema {
    pub(crate) source: &'static str,
    pub(crate) required_headers: &'static [&'static str],
    pub(crate) optional_headers: &'static [&'static str],
    /// API spellings accepted in place of a header, as `(header, alias)`.
    pub(crate) header_aliases: &'static [(&'static str, &'static str)],
}

impl RecordSchema {
    pub(crate) fn all_headers(&self) -> Vec<String> {
        self.required_headers
            .iter()
            .chain(self.optional_headers)
            .map(|header| header.to_string())
            .collect()
    }

    pub(crate) fn has_header(&self, headers: &[String], header: &str) -> bool {
        headers.iter().any(|candidate| {
            candidate == header
                || self
                    .header_aliases
                    .iter()
                    .any(|(canonical, alias)| *canonical == header && candidate == alias)
        })
    }
}

pub(crate) const SALES_SCHEMA: RecordSchema = RecordSchema {
    source: "sales",
    required_headers: &["date", "total_price"],
    optional_headers: &["id", "city", "client_name"],
    header_aliases: &[("id", "_id"), ("total_price", "totalPrice")],
};

pub(crate) const EXPENSES_SCHEMA: RecordSchema = RecordSchema {
    source: "expenses",
    required_headers: &["type", "price", "created_at"],
    optional_headers: &["id", "name", "currency", "description"],
    header_aliases: &[("id", "_id"), ("created_at", "createdAt")],
};

#[derive(Debug, Clone)]
pub(crate) struct LoadedSource<T> {
    pub(crate) summary: SourceSummary,
    pub(crate) validated: ValidatedRows<T>,
}

impl<T> LoadedSource<T> {
    pub(crate) fn issues(&self) -> &[InputIssue] {
        &self.validated.issues
    }
}

pub(crate) fn load_sales(
    path: Option<&str>,
    stdin_override: Option<String>,
) -> ClientResult<LoadedSource<Sale>> {
    load(&SALES_SCHEMA, path, stdin_override, validate::validate_sales)
}

pub(crate) fn load_expenses(
    path: Option<&str>,
    stdin_override: Option<String>,
) -> ClientResult<LoadedSource<Expense>> {
    load(
        &EXPENSES_SCHEMA,
        path,
        stdin_override,
        validate::validate_expenses,
    )
}

fn load<T>(
    schema: &RecordSchema,
    path: Option<&str>,
    stdin_override: Option<String>,
    validate_rows: fn(&str, Vec<parse::RawRow>) -> ValidatedRows<T>,
) -> ClientResult<LoadedSource<T>> {
    let resolved = source::resolve_source(schema.source, path, stdin_override)?;
    if resolved.source_kind == source::SourceKind::Omitted {
        return Ok(LoadedSource {
            summary: SourceSummary {
                source_kind: resolved.source_kind.as_str().to_string(),
                source_ref: None,
                format: None,
                rows_read: 0,
                rows_valid: 0,
            },
            validated: ValidatedRows {
                records: Vec::new(),
                row_numbers: Vec::new(),
                issues: Vec::new(),
            },
        });
    }

    let parsed = parse::parse_source(schema, &resolved.content)?;
    let rows_read = parsed.rows.len() as i64;
    let validated = validate_rows(schema.source, parsed.rows);
    debug!(
        source = schema.source,
        format = parsed.format.as_str(),
        rows_read,
        rows_valid = validated.records.len(),
        "loaded input source"
    );

    Ok(LoadedSource {
        summary: SourceSummary {
            source_kind: resolved.source_kind.as_str().to_string(),
            source_ref: resolved.source_ref,
            format: Some(parsed.format.as_str().to_string()),
            rows_read,
            rows_valid: validated.records.len() as i64,
        },
        validated,
    })
}

pub(crate) fn invalid_input_error(message: &str) -> ClientError {
    ClientError::invalid_argument_with_recovery(
        message,
        vec![
            "Provide a JSON array or CSV input via a file path or `-` for stdin.".to_string(),
            format!("Run `{INPUT_HELP_COMMAND}` to confirm the accepted fields."),
        ],
    )
}
