use serde::Serialize;

use crate::monthly::{MonthlyExpensesSummary, MonthlySalesSummary};

/// One field of one input row that failed the required-field checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputIssue {
    pub source: String,
    pub row: i64,
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceSummary {
    pub source_kind: String,
    pub source_ref: Option<String>,
    pub format: Option<String>,
    pub rows_read: i64,
    pub rows_valid: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyData {
    pub base_currency: String,
    pub month_locale: String,
    pub order: String,
    pub sales_source: SourceSummary,
    pub expenses_source: SourceSummary,
    pub months_with_sales: Vec<MonthlySalesSummary>,
    pub months_without_sales: Vec<MonthlyExpensesSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckData {
    pub sales_source: SourceSummary,
    pub expenses_source: SourceSummary,
    pub issues: Vec<InputIssue>,
}
