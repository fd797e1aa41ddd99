#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use salesboard_client::commands::check::{self, CheckRunOptions};
use salesboard_client::commands::monthly::{self, MonthlyRunOptions};
use salesboard_client::records::{Expense, ExpenseType, Sale};
use salesboard_client::{AggregationConfig, ClientResult, SuccessEnvelope};
use serde_json::Value;
use tempfile::{Builder, TempDir};

pub fn sale(id: &str, date: &str, total_price: f64) -> Sale {
    Sale {
        id: Some(id.to_string()),
        total_price,
        date: date.to_string(),
        city: None,
        items: Vec::new(),
        client: None,
    }
}

pub fn expense(id: &str, created_at: &str, price: f64, currency: Option<&str>) -> Expense {
    Expense {
        id: Some(id.to_string()),
        name: format!("expense {id}"),
        kind: ExpenseType::Other,
        price,
        currency: currency.map(str::to_string),
        created_at: created_at.to_string(),
        description: None,
    }
}

pub fn fixture_dir(prefix: &str) -> std::io::Result<TempDir> {
    Builder::new().prefix(prefix).tempdir()
}

pub fn write_fixture(base: &Path, name: &str, body: &str) -> std::io::Result<PathBuf> {
    let path = base.join(name);
    fs::write(&path, body)?;
    Ok(path)
}

pub fn write_fixture_json(base: &Path, name: &str, rows: &Value) -> std::io::Result<PathBuf> {
    let body = serde_json::to_string_pretty(rows).map_err(std::io::Error::other)?;
    write_fixture(base, name, &body)
}

/// Runs `monthly` with the default COP/English config so the environment
/// cannot leak into assertions.
pub fn run_monthly(
    sales_path: Option<&Path>,
    expenses_path: Option<&Path>,
    order: Option<&str>,
) -> ClientResult<SuccessEnvelope> {
    monthly::run_with_options(MonthlyRunOptions {
        sales_path: sales_path.map(|path| path.display().to_string()),
        expenses_path: expenses_path.map(|path| path.display().to_string()),
        order: order.map(str::to_string),
        config: Some(AggregationConfig::default()),
        ..MonthlyRunOptions::default()
    })
}

pub fn run_check(
    sales_path: Option<&Path>,
    expenses_path: Option<&Path>,
) -> ClientResult<SuccessEnvelope> {
    check::run_with_options(CheckRunOptions {
        sales_path: sales_path.map(|path| path.display().to_string()),
        expenses_path: expenses_path.map(|path| path.display().to_string()),
        stdin_override: None,
    })
}

pub fn payload(result: ClientResult<SuccessEnvelope>) -> Value {
    assert!(result.is_ok(), "command failed: {:?}", result.as_ref().err());
    if let Ok(success) = result {
        return success.data;
    }
    Value::Null
}

pub fn month_labels(rows: &Value) -> Vec<String> {
    rows.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["month"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
