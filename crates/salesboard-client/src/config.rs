use serde::Serialize;

use crate::{ClientError, ClientResult};

pub const DEFAULT_BASE_CURRENCY: &str = "COP";
pub const BASE_CURRENCY_ENV: &str = "SALESBOARD_BASE_CURRENCY";
pub const LOCALE_ENV: &str = "SALESBOARD_LOCALE";

/// Language used for month labels in rendered output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthLocale {
    #[default]
    English,
    Spanish,
}

impl MonthLocale {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "english" => Some(Self::English),
            "es" | "es-co" | "spanish" => Some(Self::Spanish),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Spanish => "es",
        }
    }
}

/// Settings the aggregation engine and its renderers run with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationConfig {
    /// Currency assumed for sales and for expenses without a currency.
    pub base_currency: String,
    pub month_locale: MonthLocale,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            base_currency: DEFAULT_BASE_CURRENCY.to_string(),
            month_locale: MonthLocale::default(),
        }
    }
}

impl AggregationConfig {
    pub fn with_base_currency(base_currency: &str) -> ClientResult<Self> {
        Ok(Self {
            base_currency: normalize_currency_code(base_currency, "base_currency")?,
            month_locale: MonthLocale::default(),
        })
    }

    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(BASE_CURRENCY_ENV).filter(|value| !value.trim().is_empty()) {
            config.base_currency = normalize_currency_code(&value, BASE_CURRENCY_ENV)?;
        }
        if let Some(value) = lookup(LOCALE_ENV).filter(|value| !value.trim().is_empty()) {
            config.month_locale = parse_locale(&value, LOCALE_ENV)?;
        }
        Ok(config)
    }

    /// Applies explicit overrides (typically CLI flags) on top of this config.
    pub fn with_overrides(
        mut self,
        base_currency: Option<&str>,
        month_locale: Option<&str>,
    ) -> ClientResult<Self> {
        if let Some(value) = base_currency {
            self.base_currency = normalize_currency_code(value, "--base-currency")?;
        }
        if let Some(value) = month_locale {
            self.month_locale = parse_locale(value, "--locale")?;
        }
        Ok(self)
    }
}

fn normalize_currency_code(value: &str, key: &str) -> ClientResult<String> {
    let trimmed = value.trim();
    if trimmed.len() != 3 || !trimmed.bytes().all(|byte| byte.is_ascii_alphabetic()) {
        return Err(ClientError::invalid_config(
            key,
            value,
            "a 3-letter currency code such as COP or USD",
        ));
    }
    Ok(trimmed.to_ascii_uppercase())
}

fn parse_locale(value: &str, key: &str) -> ClientResult<MonthLocale> {
    MonthLocale::parse(value)
        .ok_or_else(|| ClientError::invalid_config(key, value, "`en` or `es`"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{AggregationConfig, BASE_CURRENCY_ENV, LOCALE_ENV, MonthLocale};

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<String, String>>();
        move |key| values.get(key).cloned()
    }

    #[test]
    fn defaults_to_cop_and_english() {
        let config = AggregationConfig::from_lookup(lookup_from(&[]));
        assert!(config.is_ok());
        if let Ok(value) = config {
            assert_eq!(value.base_currency, "COP");
            assert_eq!(value.month_locale, MonthLocale::English);
        }
    }

    #[test]
    fn environment_values_are_normalized() {
        let config = AggregationConfig::from_lookup(lookup_from(&[
            (BASE_CURRENCY_ENV, " usd "),
            (LOCALE_ENV, "ES"),
        ]));
        assert!(config.is_ok());
        if let Ok(value) = config {
            assert_eq!(value.base_currency, "USD");
            assert_eq!(value.month_locale, MonthLocale::Spanish);
        }
    }

    #[test]
    fn overrides_win_over_environment() {
        let config = AggregationConfig::from_lookup(lookup_from(&[(BASE_CURRENCY_ENV, "USD")]))
            .and_then(|config| config.with_overrides(Some("eur"), Some("en")));
        assert!(config.is_ok());
        if let Ok(value) = config {
            assert_eq!(value.base_currency, "EUR");
        }
    }

    #[test]
    fn rejects_malformed_currency_codes() {
        let config = AggregationConfig::with_base_currency("pesos");
        assert!(config.is_err());
        if let Err(error) = config {
            assert_eq!(error.code, "invalid_config");
        }

        let locale = AggregationConfig::default().with_overrides(None, Some("fr"));
        assert!(locale.is_err());
    }
}
