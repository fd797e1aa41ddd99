use serde_json::{Map, Value};
use tracing::warn;

use crate::contracts::types::InputIssue;
use crate::input::parse::RawRow;
use crate::monthly::parse_record_date;
use crate::records::{ClientSnapshot, Expense, ExpenseType, Sale, SaleLineItem};

/// Records that passed the required-field checks, plus issues for the rest.
#[derive(Debug, Clone)]
pub(crate) struct ValidatedRows<T> {
    pub(crate) records: Vec<T>,
    /// Input row number of each entry in `records`.
    pub(crate) row_numbers: Vec<i64>,
    pub(crate) issues: Vec<InputIssue>,
}

pub(crate) fn validate_sales(source: &str, rows: Vec<RawRow>) -> ValidatedRows<Sale> {
    validate_rows(source, rows, validate_sale)
}

pub(crate) fn validate_expenses(source: &str, rows: Vec<RawRow>) -> ValidatedRows<Expense> {
    validate_rows(source, rows, validate_expense)
}

fn validate_rows<T, F>(source: &str, rows: Vec<RawRow>, validate_row: F) -> ValidatedRows<T>
where
    F: Fn(&mut RowIssues<'_>, &Map<String, Value>) -> Option<T>,
{
    let mut records = Vec::with_capacity(rows.len());
    let mut row_numbers = Vec::with_capacity(rows.len());
    let mut issues = Vec::new();

    for raw in rows {
        let mut row_issues = RowIssues {
            source,
            row: raw.row,
            issues: Vec::new(),
        };
        let record = validate_row(&mut row_issues, &raw.fields);
        match record {
            Some(value) if row_issues.issues.is_empty() => {
                records.push(value);
                row_numbers.push(raw.row);
            }
            _ => {
                warn!(source = source, row = raw.row, "skipping input row that failed validation");
                issues.extend(row_issues.issues);
            }
        }
    }

    ValidatedRows {
        records,
        row_numbers,
        issues,
    }
}

/// Lists record dates the month grouping cannot read.
pub(crate) fn sale_date_issues(source: &str, validated: &ValidatedRows<Sale>) -> Vec<InputIssue> {
    validated
        .records
        .iter()
        .zip(&validated.row_numbers)
        .filter(|(sale, _)| parse_record_date(&sale.date).is_none())
        .map(|(sale, row)| unreadable_date_issue(source, *row, "date", &sale.date))
        .collect()
}

pub(crate) fn expense_date_issues(
    source: &str,
    validated: &ValidatedRows<Expense>,
) -> Vec<InputIssue> {
    validated
        .records
        .iter()
        .zip(&validated.row_numbers)
        .filter(|(expense, _)| parse_record_date(&expense.created_at).is_none())
        .map(|(expense, row)| {
            unreadable_date_issue(source, *row, "created_at", &expense.created_at)
        })
        .collect()
}

fn unreadable_date_issue(source: &str, row: i64, field: &str, value: &str) -> InputIssue {
    InputIssue {
        source: source.to_string(),
        row,
        field: field.to_string(),
        message: format!("{field} must be YYYY-MM-DD or an RFC 3339 timestamp; got \"{value}\""),
    }
}

struct RowIssues<'a> {
    source: &'a str,
    row: i64,
    issues: Vec<InputIssue>,
}

impl RowIssues<'_> {
    fn push(&mut self, field: &str, message: String) {
        self.issues.push(InputIssue {
            source: self.source.to_string(),
            row: self.row,
            field: field.to_string(),
            message,
        });
    }

    fn required_text(
        &mut self,
        fields: &Map<String, Value>,
        field: &str,
        aliases: &[&str],
    ) -> Option<String> {
        let value = read_text(fields, field, aliases);
        if value.is_none() {
            self.push(field, format!("{field} must be present and non-empty."));
        }
        value
    }

    fn required_number(
        &mut self,
        fields: &Map<String, Value>,
        field: &str,
        aliases: &[&str],
    ) -> Option<f64> {
        let candidate = self.required_text(fields, field, aliases)?;
        match candidate.parse::<f64>() {
            Ok(number) if number.is_finite() => Some(number),
            _ => {
                self.push(field, format!("{field} must be numeric; got \"{candidate}\""));
                None
            }
        }
    }
}

fn validate_sale(issues: &mut RowIssues<'_>, fields: &Map<String, Value>) -> Option<Sale> {
    let date = issues.required_text(fields, "date", &[]);
    let total_price = issues.required_number(fields, "total_price", &["totalPrice"]);

    let items = match fields.get("items") {
        None | Some(Value::Null) => Vec::new(),
        Some(value) => match serde_json::from_value::<Vec<SaleLineItem>>(value.clone()) {
            Ok(items) => items,
            Err(error) => {
                issues.push("items", format!("items must be a list of sale items: {error}"));
                Vec::new()
            }
        },
    };

    let client = match fields.get("client") {
        None | Some(Value::Null) => read_text(fields, "client_name", &[]).map(client_named),
        Some(value) => match serde_json::from_value::<ClientSnapshot>(value.clone()) {
            Ok(client) => Some(client),
            Err(error) => {
                issues.push("client", format!("client must be an object: {error}"));
                None
            }
        },
    };

    Some(Sale {
        id: read_text(fields, "id", &["_id"]),
        total_price: total_price?,
        date: date?,
        city: read_text(fields, "city", &[]),
        items,
        client,
    })
}

fn validate_expense(issues: &mut RowIssues<'_>, fields: &Map<String, Value>) -> Option<Expense> {
    let kind = issues
        .required_text(fields, "type", &[])
        .map(|tag| ExpenseType::from_tag(&tag));
    // Only `other` expenses may carry a zero or negative price.
    let price = issues
        .required_number(fields, "price", &[])
        .and_then(|price| {
            if price > 0.0 || kind == Some(ExpenseType::Other) {
                return Some(price);
            }
            issues.push("price", format!("price must be greater than 0; got {price}"));
            None
        });
    let created_at = issues.required_text(fields, "created_at", &["createdAt"]);
    let name = read_text(fields, "name", &[]);

    if kind == Some(ExpenseType::Other) && name.is_none() {
        issues.push(
            "name",
            "name must be present when the expense type is `other`.".to_string(),
        );
    }

    Some(Expense {
        id: read_text(fields, "id", &["_id"]),
        name: name.unwrap_or_default(),
        kind: kind?,
        price: price?,
        currency: read_text(fields, "currency", &[]),
        created_at: created_at?,
        description: read_text(fields, "description", &[]),
    })
}

fn client_named(name: String) -> ClientSnapshot {
    ClientSnapshot {
        id: None,
        name,
        instagram_account: None,
        address: None,
        city: None,
        phone: None,
        country: None,
    }
}

fn read_text(fields: &Map<String, Value>, field: &str, aliases: &[&str]) -> Option<String> {
    std::iter::once(field)
        .chain(aliases.iter().copied())
        .find_map(|name| match fields.get(name)? {
            Value::String(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Value::Number(number) => Some(number.to_string()),
            Value::Null => None,
            other => Some(other.to_string()),
        })
}
