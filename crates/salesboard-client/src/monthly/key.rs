use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

use crate::config::MonthLocale;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const SPANISH_MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Calendar month bucket identity. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            return Some(Self { year, month });
        }
        None
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn from_record_date(value: &str) -> Option<Self> {
        parse_record_date(value).map(Self::from_date)
    }

    pub fn month_name(self) -> &'static str {
        month_name_at(&MONTH_NAMES, self.month)
    }

    /// `"<MonthName> <Year>"`, e.g. `"January 2024"`.
    pub fn label(self) -> String {
        self.to_string()
    }

    pub fn localized_label(self, locale: MonthLocale) -> String {
        match locale {
            MonthLocale::English => self.label(),
            MonthLocale::Spanish => format!(
                "{} {:04}",
                month_name_at(&SPANISH_MONTH_NAMES, self.month),
                self.year
            ),
        }
    }

    pub fn parse_label(label: &str) -> Option<Self> {
        let mut parts = label.split_whitespace();
        let name = parts.next()?;
        let year = parts.next()?.parse::<i32>().ok()?;
        if parts.next().is_some() {
            return None;
        }
        let index = MONTH_NAMES.iter().position(|candidate| *candidate == name)?;
        Self::new(year, u32::try_from(index).ok()? + 1)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:04}", self.month_name(), self.year)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Rewrites an English month label for display. Labels that do not parse are
/// returned unchanged.
pub fn localize_label(label: &str, locale: MonthLocale) -> String {
    match MonthKey::parse_label(label) {
        Some(key) => key.localized_label(locale),
        None => label.to_string(),
    }
}

/// Reads the calendar date of a record timestamp.
///
/// Accepts RFC 3339 timestamps (the date is taken in the timestamp's own
/// offset), naive `YYYY-MM-DDTHH:MM:SS[.fff]` timestamps and plain
/// `YYYY-MM-DD` dates.
pub fn parse_record_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(timestamp.date());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

fn month_name_at(names: &[&'static str; 12], month: u32) -> &'static str {
    let index = usize::try_from(month.saturating_sub(1)).unwrap_or(0);
    names.get(index).copied().unwrap_or(names[0])
}
