use tracing::info;

use crate::config::AggregationConfig;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{InputIssue, MonthlyData};
use crate::input::{ensure_single_stdin, load_expenses, load_sales};
use crate::monthly::{MonthOrder, aggregate};
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct MonthlyRunOptions {
    pub sales_path: Option<String>,
    pub expenses_path: Option<String>,
    pub base_currency: Option<String>,
    pub locale: Option<String>,
    pub order: Option<String>,
    pub stdin_override: Option<String>,
    /// Starting configuration; read from the environment when absent.
    pub config: Option<AggregationConfig>,
}

pub fn run(
    sales_path: Option<String>,
    expenses_path: Option<String>,
    base_currency: Option<String>,
    locale: Option<String>,
    order: Option<String>,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(MonthlyRunOptions {
        sales_path,
        expenses_path,
        base_currency,
        locale,
        order,
        stdin_override: None,
        config: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: MonthlyRunOptions) -> ClientResult<SuccessEnvelope> {
    let base_config = match options.config {
        Some(config) => config,
        None => AggregationConfig::from_env()?,
    };
    let config = base_config
        .with_overrides(options.base_currency.as_deref(), options.locale.as_deref())?;
    let order = parse_order(options.order.as_deref())?;

    let sales_path = options.sales_path.as_deref();
    let expenses_path = options.expenses_path.as_deref();
    ensure_single_stdin(&[sales_path, expenses_path])?;

    let sales = load_sales(sales_path, options.stdin_override.clone())?;
    let expenses = load_expenses(expenses_path, options.stdin_override)?;

    let issues = sales
        .issues()
        .iter()
        .chain(expenses.issues())
        .cloned()
        .collect::<Vec<InputIssue>>();
    if !issues.is_empty() {
        return Err(ClientError::validation_failed(issues));
    }

    let mut aggregation = aggregate(
        &sales.validated.records,
        &expenses.validated.records,
        &config,
    )?;
    aggregation.apply_order(order);

    info!(
        months_with_sales = aggregation.months_with_sales.len(),
        months_without_sales = aggregation.months_without_sales.len(),
        order = order.as_str(),
        "monthly report ready"
    );

    let data = MonthlyData {
        base_currency: config.base_currency,
        month_locale: config.month_locale.as_str().to_string(),
        order: order.as_str().to_string(),
        sales_source: sales.summary,
        expenses_source: expenses.summary,
        months_with_sales: aggregation.months_with_sales,
        months_without_sales: aggregation.months_without_sales,
    };

    success("monthly", data)
}

fn parse_order(value: Option<&str>) -> ClientResult<MonthOrder> {
    let Some(raw) = value else {
        return Ok(MonthOrder::default());
    };
    MonthOrder::parse(raw).ok_or_else(|| {
        ClientError::invalid_argument_for_command(
            &format!("Unknown sort order `{raw}`. Use `desc` or `appearance`."),
            Some("monthly"),
        )
    })
}
