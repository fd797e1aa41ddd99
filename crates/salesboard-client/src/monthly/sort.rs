use std::borrow::Cow;
use std::cmp::Reverse;

use crate::monthly::aggregate::{MonthlyAggregation, MonthlyExpensesSummary, MonthlySalesSummary};
use crate::monthly::key::MonthKey;

/// Anything displayed under a `"<MonthName> <Year>"` heading.
pub trait MonthLabeled {
    fn month_label(&self) -> Cow<'_, str>;
}

impl MonthLabeled for MonthlySalesSummary {
    fn month_label(&self) -> Cow<'_, str> {
        Cow::Owned(self.month.label())
    }
}

impl MonthLabeled for MonthlyExpensesSummary {
    fn month_label(&self) -> Cow<'_, str> {
        Cow::Owned(self.month.label())
    }
}

impl MonthLabeled for String {
    fn month_label(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl MonthLabeled for &str {
    fn month_label(&self) -> Cow<'_, str> {
        Cow::Borrowed(*self)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MonthOrder {
    /// Order in which each month first appears in the input.
    #[default]
    Appearance,
    /// Latest month first.
    Descending,
}

impl MonthOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "appearance" => Some(Self::Appearance),
            "desc" | "descending" => Some(Self::Descending),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Appearance => "appearance",
            Self::Descending => "desc",
        }
    }
}

/// Reorders items so later calendar months come first.
///
/// Years compare numerically and months by calendar position, never
/// alphabetically. The sort is stable, and labels that do not parse are moved
/// after every readable one.
pub fn sort_by_month_descending<T: MonthLabeled>(items: &mut [T]) {
    items.sort_by_cached_key(|item| {
        let key = MonthKey::parse_label(&item.month_label());
        (key.is_none(), key.map(Reverse))
    });
}

impl MonthlyAggregation {
    pub fn sort_by_month_descending(&mut self) {
        sort_by_month_descending(&mut self.months_with_sales);
        sort_by_month_descending(&mut self.months_without_sales);
    }

    pub fn apply_order(&mut self, order: MonthOrder) {
        if order == MonthOrder::Descending {
            self.sort_by_month_descending();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MonthOrder, sort_by_month_descending};
    use crate::monthly::aggregate::MonthlyExpensesSummary;
    use crate::monthly::key::MonthKey;

    fn deduction(year: i32, month: u32, amount: f64) -> Option<MonthlyExpensesSummary> {
        Some(MonthlyExpensesSummary {
            month: MonthKey::new(year, month)?,
            all_expenses: Vec::new(),
            all_base_currency: true,
            sorted_expenses: Vec::new(),
            expenses: Some(amount),
        })
    }

    #[test]
    fn later_years_and_months_come_first() {
        let mut labels = vec![
            "March 2023".to_string(),
            "January 2024".to_string(),
            "December 2023".to_string(),
            "April 2023".to_string(),
        ];
        sort_by_month_descending(&mut labels);
        assert_eq!(
            labels,
            vec!["January 2024", "December 2023", "April 2023", "March 2023"]
        );
    }

    #[test]
    fn months_use_calendar_order_not_alphabetical() {
        let mut labels = vec!["April 2024", "February 2024", "August 2024"];
        sort_by_month_descending(&mut labels);
        assert_eq!(labels, vec!["August 2024", "April 2024", "February 2024"]);
    }

    #[test]
    fn unreadable_labels_trail_in_input_order() {
        let mut labels = vec!["Unknown", "May 2024", "???", "June 2024"];
        sort_by_month_descending(&mut labels);
        assert_eq!(labels, vec!["June 2024", "May 2024", "Unknown", "???"]);
    }

    #[test]
    fn same_month_keeps_input_order() {
        let summaries = [
            deduction(2024, 5, -1.0),
            deduction(2024, 6, -2.0),
            deduction(2024, 5, -3.0),
            deduction(2024, 5, -4.0),
        ]
        .into_iter()
        .collect::<Option<Vec<_>>>();
        assert!(summaries.is_some());
        let Some(mut summaries) = summaries else {
            return;
        };

        sort_by_month_descending(&mut summaries);
        let amounts = summaries
            .iter()
            .map(|summary| summary.expenses)
            .collect::<Vec<_>>();
        assert_eq!(
            amounts,
            vec![Some(-2.0), Some(-1.0), Some(-3.0), Some(-4.0)]
        );
    }

    #[test]
    fn order_names_parse() {
        assert_eq!(MonthOrder::parse("desc"), Some(MonthOrder::Descending));
        assert_eq!(MonthOrder::parse("appearance"), Some(MonthOrder::Appearance));
        assert_eq!(MonthOrder::parse("calendar"), None);
    }
}
