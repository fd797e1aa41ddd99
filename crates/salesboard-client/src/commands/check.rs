use crate::ClientResult;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::CheckData;
use crate::input::validate::{expense_date_issues, sale_date_issues};
use crate::input::{EXPENSES_SCHEMA, SALES_SCHEMA, ensure_single_stdin, load_expenses, load_sales};

#[derive(Debug, Default)]
pub struct CheckRunOptions {
    pub sales_path: Option<String>,
    pub expenses_path: Option<String>,
    pub stdin_override: Option<String>,
}

pub fn run(
    sales_path: Option<String>,
    expenses_path: Option<String>,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(CheckRunOptions {
        sales_path,
        expenses_path,
        stdin_override: None,
    })
}

/// Validates both sources without aggregating them. Field problems are
/// reported as issues in the payload rather than as an error.
#[doc(hidden)]
pub fn run_with_options(options: CheckRunOptions) -> ClientResult<SuccessEnvelope> {
    let sales_path = options.sales_path.as_deref();
    let expenses_path = options.expenses_path.as_deref();
    ensure_single_stdin(&[sales_path, expenses_path])?;

    let sales = load_sales(sales_path, options.stdin_override.clone())?;
    let expenses = load_expenses(expenses_path, options.stdin_override)?;

    let mut issues = sales.issues().to_vec();
    issues.extend(sale_date_issues(SALES_SCHEMA.source, &sales.validated));
    issues.extend(expenses.issues().iter().cloned());
    issues.extend(expense_date_issues(
        EXPENSES_SCHEMA.source,
        &expenses.validated,
    ));

    let data = CheckData {
        sales_source: sales.summary,
        expenses_source: expenses.summary,
        issues,
    };

    success("check", data)
}
