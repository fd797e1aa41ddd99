//! Monthly aggregation of sales and expenses.

pub mod aggregate;
pub mod key;
pub mod sort;

pub use aggregate::{
    CurrencyGroup, MonthlyAggregation, MonthlyExpensesSummary, MonthlySalesSummary, aggregate,
};
pub use key::{MonthKey, localize_label, parse_record_date};
pub use sort::{MonthLabeled, MonthOrder, sort_by_month_descending};
