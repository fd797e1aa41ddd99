use std::collections::HashMap;

use serde::Serialize;

use crate::config::AggregationConfig;
use crate::monthly::key::MonthKey;
use crate::records::{Expense, Sale};
use crate::{ClientError, ClientResult};

/// Expenses of one currency inside a monthly bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyGroup {
    pub currency_key: String,
    pub items: Vec<Expense>,
    pub total: f64,
}

/// A month with at least one sale, plus the expenses recorded that month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySalesSummary {
    pub month: MonthKey,
    pub sales: Vec<Sale>,
    pub revenue_without_expenses: f64,
    pub all_expenses: Vec<Expense>,
    /// True when every attached expense is in the base currency.
    pub all_base_currency: bool,
    pub sorted_expenses: Vec<CurrencyGroup>,
    /// Sum of attached expenses. Absent when currencies are mixed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expenses: Option<f64>,
    /// `revenue_without_expenses - expenses`. Absent when currencies are mixed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<f64>,
}

/// A month where expenses were recorded but nothing was sold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyExpensesSummary {
    pub month: MonthKey,
    pub all_expenses: Vec<Expense>,
    pub all_base_currency: bool,
    pub sorted_expenses: Vec<CurrencyGroup>,
    /// Negated expense sum (a deduction). Absent when currencies are mixed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expenses: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlyAggregation {
    pub months_with_sales: Vec<MonthlySalesSummary>,
    pub months_without_sales: Vec<MonthlyExpensesSummary>,
}

struct SalesBucket<'a> {
    month: MonthKey,
    sales: Vec<&'a Sale>,
    revenue: f64,
    expenses: Vec<&'a Expense>,
}

struct ExpensesBucket<'a> {
    month: MonthKey,
    expenses: Vec<&'a Expense>,
}

/// Partitions sales and expenses into calendar-month buckets.
///
/// Buckets keep the order in which their month first appears in the input.
/// Every sale lands in exactly one sales bucket. Every expense lands either in
/// the sales bucket of its month or, when nothing sold that month, in an
/// expenses-only bucket. A record whose date cannot be read fails the whole
/// call with `invalid_date`.
pub fn aggregate(
    sales: &[Sale],
    expenses: &[Expense],
    config: &AggregationConfig,
) -> ClientResult<MonthlyAggregation> {
    let base_currency = config.base_currency.as_str();

    let expense_months = expenses
        .iter()
        .map(expense_month)
        .collect::<ClientResult<Vec<MonthKey>>>()?;

    let mut expenses_by_month: HashMap<MonthKey, Vec<&Expense>> = HashMap::new();
    for (expense, month) in expenses.iter().zip(&expense_months) {
        expenses_by_month.entry(*month).or_default().push(expense);
    }

    let mut sales_index: HashMap<MonthKey, usize> = HashMap::new();
    let mut sales_buckets: Vec<SalesBucket<'_>> = Vec::new();
    for sale in sales {
        let month = sale_month(sale)?;
        let index = *sales_index.entry(month).or_insert_with(|| {
            tracing::debug!(%month, "opening sales bucket");
            sales_buckets.push(SalesBucket {
                month,
                sales: Vec::new(),
                revenue: 0.0,
                expenses: expenses_by_month.get(&month).cloned().unwrap_or_default(),
            });
            sales_buckets.len() - 1
        });
        if let Some(bucket) = sales_buckets.get_mut(index) {
            bucket.sales.push(sale);
            bucket.revenue += sale.total_price;
        }
    }

    let mut orphan_index: HashMap<MonthKey, usize> = HashMap::new();
    let mut orphan_buckets: Vec<ExpensesBucket<'_>> = Vec::new();
    for (expense, month) in expenses.iter().zip(&expense_months) {
        if sales_index.contains_key(month) {
            continue;
        }
        let index = *orphan_index.entry(*month).or_insert_with(|| {
            tracing::debug!(month = %month, "opening expenses-only bucket");
            orphan_buckets.push(ExpensesBucket {
                month: *month,
                expenses: Vec::new(),
            });
            orphan_buckets.len() - 1
        });
        if let Some(bucket) = orphan_buckets.get_mut(index) {
            bucket.expenses.push(expense);
        }
    }

    let aggregation = MonthlyAggregation {
        months_with_sales: sales_buckets
            .into_iter()
            .map(|bucket| finish_sales_bucket(bucket, base_currency))
            .collect(),
        months_without_sales: orphan_buckets
            .into_iter()
            .map(|bucket| finish_expenses_bucket(bucket, base_currency))
            .collect(),
    };

    tracing::debug!(
        sales = sales.len(),
        expenses = expenses.len(),
        months_with_sales = aggregation.months_with_sales.len(),
        months_without_sales = aggregation.months_without_sales.len(),
        "aggregated monthly buckets"
    );

    Ok(aggregation)
}

fn sale_month(sale: &Sale) -> ClientResult<MonthKey> {
    MonthKey::from_record_date(&sale.date).ok_or_else(|| {
        tracing::warn!(sale_id = ?sale.id, date = %sale.date, "sale date is not readable");
        ClientError::invalid_date("sale", sale.id.as_deref(), &sale.date)
    })
}

fn expense_month(expense: &Expense) -> ClientResult<MonthKey> {
    MonthKey::from_record_date(&expense.created_at).ok_or_else(|| {
        tracing::warn!(
            expense_id = ?expense.id,
            created_at = %expense.created_at,
            "expense date is not readable"
        );
        ClientError::invalid_date("expense", expense.id.as_deref(), &expense.created_at)
    })
}

fn finish_sales_bucket(bucket: SalesBucket<'_>, base_currency: &str) -> MonthlySalesSummary {
    let all_base_currency = all_in_currency(&bucket.expenses, base_currency);
    let sorted_expenses = group_by_currency(&bucket.expenses, base_currency);
    let (expenses, revenue) = if all_base_currency {
        let spent = sum_prices(&bucket.expenses);
        (Some(spent), Some(bucket.revenue - spent))
    } else {
        (None, None)
    };

    MonthlySalesSummary {
        month: bucket.month,
        sales: bucket.sales.into_iter().cloned().collect(),
        revenue_without_expenses: bucket.revenue,
        all_expenses: bucket.expenses.into_iter().cloned().collect(),
        all_base_currency,
        sorted_expenses,
        expenses,
        revenue,
    }
}

fn finish_expenses_bucket(
    bucket: ExpensesBucket<'_>,
    base_currency: &str,
) -> MonthlyExpensesSummary {
    let all_base_currency = all_in_currency(&bucket.expenses, base_currency);
    let sorted_expenses = group_by_currency(&bucket.expenses, base_currency);
    let expenses = all_base_currency.then(|| as_deduction(sum_prices(&bucket.expenses)));

    MonthlyExpensesSummary {
        month: bucket.month,
        all_expenses: bucket.expenses.into_iter().cloned().collect(),
        all_base_currency,
        sorted_expenses,
        expenses,
    }
}

/// True when no expense names a currency other than `base_currency`.
pub fn all_in_currency(expenses: &[&Expense], base_currency: &str) -> bool {
    expenses.iter().all(|expense| {
        expense
            .currency
            .as_deref()
            .is_none_or(|currency| currency == base_currency)
    })
}

/// Groups expenses by currency in first-seen order. Missing currencies count
/// as `base_currency`.
pub fn group_by_currency(expenses: &[&Expense], base_currency: &str) -> Vec<CurrencyGroup> {
    let mut index_by_currency: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<CurrencyGroup> = Vec::new();

    for expense in expenses {
        let currency = expense.currency_or(base_currency);
        let index = *index_by_currency.entry(currency).or_insert_with(|| {
            groups.push(CurrencyGroup {
                currency_key: currency.to_string(),
                items: Vec::new(),
                total: 0.0,
            });
            groups.len() - 1
        });
        if let Some(group) = groups.get_mut(index) {
            group.items.push((*expense).clone());
            group.total += expense.price;
        }
    }

    groups
}

fn sum_prices(expenses: &[&Expense]) -> f64 {
    expenses.iter().map(|expense| expense.price).sum()
}

// Keeps an empty month at 0.0 rather than -0.0.
fn as_deduction(total: f64) -> f64 {
    if total == 0.0 { 0.0 } else { -total }
}
