use std::io;

use salesboard_client::MonthLocale;
use salesboard_client::money::{SignDisplay, format_money, format_money_with};
use salesboard_client::monthly::localize_label;
use salesboard_client::records::ExpenseType;
use serde_json::Value;

use super::format::{self, Align, Column};

const SALE_COLUMNS: [Column<'static>; 4] = [
    Column {
        name: "Date",
        align: Align::Left,
    },
    Column {
        name: "Client",
        align: Align::Left,
    },
    Column {
        name: "City",
        align: Align::Left,
    },
    Column {
        name: "Total",
        align: Align::Right,
    },
];

const EXPENSE_COLUMNS: [Column<'static>; 4] = [
    Column {
        name: "Date",
        align: Align::Left,
    },
    Column {
        name: "Expense",
        align: Align::Left,
    },
    Column {
        name: "Type",
        align: Align::Left,
    },
    Column {
        name: "Amount",
        align: Align::Right,
    },
];

struct CardContext<'a> {
    base_currency: &'a str,
    locale: MonthLocale,
    width: usize,
}

pub fn render_monthly(data: &Value) -> io::Result<String> {
    let base_currency = get_str(data, "base_currency")
        .ok_or_else(|| io::Error::other("monthly output requires base_currency"))?;
    let months_with_sales = get_array(data, "months_with_sales")
        .ok_or_else(|| io::Error::other("monthly output requires months_with_sales"))?;
    let months_without_sales = get_array(data, "months_without_sales")
        .ok_or_else(|| io::Error::other("monthly output requires months_without_sales"))?;

    let context = CardContext {
        base_currency,
        locale: get_str(data, "month_locale")
            .and_then(MonthLocale::parse)
            .unwrap_or_default(),
        width: format::terminal_width(),
    };

    let mut lines = vec!["Monthly sales report".to_string()];
    lines.extend(format::key_value_rows(
        &[
            ("Base currency:", base_currency.to_string()),
            ("Month order:", get_str(data, "order").unwrap_or("appearance").to_string()),
            ("Sales rows:", source_rows(data.get("sales_source"))),
            ("Expense rows:", source_rows(data.get("expenses_source"))),
        ],
        2,
    ));

    if months_with_sales.is_empty() && months_without_sales.is_empty() {
        lines.push(String::new());
        lines.push("No sales or expenses to report.".to_string());
        return Ok(lines.join("\n"));
    }

    if !months_with_sales.is_empty() {
        lines.push(String::new());
        lines.push("Months with sales:".to_string());
        for month in months_with_sales {
            lines.push(String::new());
            lines.extend(render_sales_card(month, &context));
        }
    }

    if !months_without_sales.is_empty() {
        lines.push(String::new());
        lines.push("Months with expenses but no sales:".to_string());
        for month in months_without_sales {
            lines.push(String::new());
            lines.extend(render_expenses_card(month, &context));
        }
    }

    Ok(lines.join("\n"))
}

fn render_sales_card(month: &Value, context: &CardContext<'_>) -> Vec<String> {
    let mut lines = vec![month_heading(month, context.locale)];
    let uniform = month
        .get("all_base_currency")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    match get_f64(month, "revenue") {
        Some(revenue) if uniform && revenue != 0.0 => {
            lines.push(headline(revenue, context.base_currency));
        }
        _ => lines.extend(currency_totals(month, context.base_currency)),
    }

    let sales = get_array(month, "sales").map(Vec::as_slice).unwrap_or(&[]);
    lines.push(format!("  {}", sale_count(sales.len())));

    let revenue_without_expenses = get_f64(month, "revenue_without_expenses").unwrap_or(0.0);
    if revenue_without_expenses == 0.0 {
        lines.push("  No sales recorded this month.".to_string());
    } else {
        lines.push(format!(
            "  {} excluding expenses.",
            format_money(
                revenue_without_expenses,
                context.base_currency,
                context.base_currency
            )
        ));
    }

    let sale_rows = sales
        .iter()
        .map(|sale| sale_row(sale, context.base_currency))
        .collect::<Vec<Vec<String>>>();
    if !sale_rows.is_empty() {
        lines.push("  Sales:".to_string());
        lines.extend(format::render_table_or_blocks(
            &SALE_COLUMNS,
            &sale_rows,
            4,
            context.width,
            "Sale",
        ));
    }

    lines.extend(expense_section(month, context, uniform));
    lines
}

fn render_expenses_card(month: &Value, context: &CardContext<'_>) -> Vec<String> {
    let mut lines = vec![month_heading(month, context.locale)];
    let uniform = month
        .get("all_base_currency")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    match get_f64(month, "expenses") {
        Some(deduction) if uniform => lines.push(headline(deduction, context.base_currency)),
        _ => lines.extend(currency_totals(month, context.base_currency)),
    }

    lines.push("  No sales recorded this month.".to_string());
    lines.extend(expense_section(month, context, uniform));
    lines
}

fn expense_section(month: &Value, context: &CardContext<'_>, uniform: bool) -> Vec<String> {
    let expenses = get_array(month, "all_expenses")
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    if expenses.is_empty() {
        return Vec::new();
    }

    let rows = expenses
        .iter()
        .map(|expense| expense_row(expense, context.base_currency))
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec!["  Expenses:".to_string()];
    lines.extend(format::render_table_or_blocks(
        &EXPENSE_COLUMNS,
        &rows,
        4,
        context.width,
        "Expense",
    ));

    if uniform {
        let spent = expenses
            .iter()
            .filter_map(|expense| get_f64(expense, "price"))
            .sum::<f64>();
        lines.push(format!(
            "  Expense sum: {}",
            format_money(spent, context.base_currency, context.base_currency)
        ));
    } else {
        lines.push("  Different currencies.".to_string());
    }
    lines
}

fn month_heading(month: &Value, locale: MonthLocale) -> String {
    let label = get_str(month, "month").unwrap_or("Unknown month");
    localize_label(label, locale)
}

fn headline(amount: f64, base_currency: &str) -> String {
    let title = if amount < 0.0 { "Loss" } else { "Profit" };
    format!(
        "  {title}: {}",
        format_money_with(amount, base_currency, base_currency, SignDisplay::Always)
    )
}

fn currency_totals(month: &Value, base_currency: &str) -> Vec<String> {
    let groups = get_array(month, "sorted_expenses")
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    if groups.is_empty() {
        return Vec::new();
    }

    let mut lines = vec!["  Expenses by currency:".to_string()];
    for group in groups {
        let currency = get_str(group, "currency_key").unwrap_or(base_currency);
        let total = get_f64(group, "total").unwrap_or(0.0);
        lines.push(format!(
            "    {}",
            format_money(total, currency, base_currency)
        ));
    }
    lines
}

fn sale_count(count: usize) -> String {
    if count == 1 {
        "1 sale".to_string()
    } else {
        format!("{count} sales")
    }
}

fn sale_row(sale: &Value, base_currency: &str) -> Vec<String> {
    let client = sale
        .get("client")
        .and_then(|client| get_str(client, "name"))
        .unwrap_or("-");
    vec![
        date_only(get_str(sale, "date").unwrap_or("")),
        client.to_string(),
        get_str(sale, "city").unwrap_or("-").to_string(),
        format_money(
            get_f64(sale, "total_price").unwrap_or(0.0),
            base_currency,
            base_currency,
        ),
    ]
}

fn expense_row(expense: &Value, base_currency: &str) -> Vec<String> {
    let kind = ExpenseType::from_tag(get_str(expense, "type").unwrap_or(""));
    let name = get_str(expense, "name")
        .filter(|name| !name.is_empty())
        .unwrap_or(kind.display_name());
    let currency = get_str(expense, "currency").unwrap_or(base_currency);
    vec![
        date_only(get_str(expense, "created_at").unwrap_or("")),
        name.to_string(),
        kind.display_name().to_string(),
        format_money(
            get_f64(expense, "price").unwrap_or(0.0),
            currency,
            base_currency,
        ),
    ]
}

fn source_rows(source: Option<&Value>) -> String {
    let Some(summary) = source else {
        return "none".to_string();
    };
    match get_str(summary, "source_kind") {
        Some("none") | None => "none".to_string(),
        Some(kind) => {
            let rows = summary
                .get("rows_valid")
                .and_then(Value::as_i64)
                .unwrap_or(0);
            let origin = get_str(summary, "source_ref").unwrap_or(kind);
            format!("{rows} ({origin})")
        }
    }
}

// Timestamps display as their calendar date.
fn date_only(value: &str) -> String {
    value.get(..10).unwrap_or(value).to_string()
}

fn get_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

fn get_f64(value: &Value, key: &str) -> Option<f64> {
    value.get(key).and_then(Value::as_f64)
}

fn get_array<'a>(value: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    value.get(key).and_then(Value::as_array)
}
