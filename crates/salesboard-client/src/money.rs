//! Money rendering in the Colombian style the panel uses (`$45.000`).

// Currencies shown without fraction digits.
const WHOLE_UNIT_CURRENCIES: [&str; 4] = ["COP", "CLP", "JPY", "KRW"];

const GROUPING_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignDisplay {
    /// Only negative amounts carry a sign.
    #[default]
    Negative,
    /// Positive amounts are prefixed with `+` as well.
    Always,
}

/// Formats `amount` in `currency`.
///
/// The base currency renders with a bare `$`, every other currency with its
/// code (`USD 10,50`).
pub fn format_money(amount: f64, currency: &str, base_currency: &str) -> String {
    format_money_with(amount, currency, base_currency, SignDisplay::Negative)
}

pub fn format_money_with(
    amount: f64,
    currency: &str,
    base_currency: &str,
    sign_display: SignDisplay,
) -> String {
    let fraction_digits = fraction_digits_for(currency);
    let scale = 10u64.pow(fraction_digits);
    // Saturating cast; amounts in this panel are far below u64::MAX.
    let scaled = (amount.abs() * scale as f64).round() as u64;
    let whole = scaled / scale;
    let fraction = scaled % scale;

    let sign = if scaled == 0 {
        ""
    } else if amount < 0.0 {
        "-"
    } else if sign_display == SignDisplay::Always {
        "+"
    } else {
        ""
    };

    let prefix = if currency == base_currency {
        "$".to_string()
    } else {
        format!("{currency} ")
    };

    let mut rendered = format!("{sign}{prefix}{}", group_thousands(whole));
    if fraction_digits > 0 {
        rendered.push(DECIMAL_SEPARATOR);
        rendered.push_str(&format!(
            "{fraction:0width$}",
            width = fraction_digits as usize
        ));
    }
    rendered
}

fn fraction_digits_for(currency: &str) -> u32 {
    if WHOLE_UNIT_CURRENCIES.contains(&currency) {
        0
    } else {
        2
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(GROUPING_SEPARATOR);
        }
        grouped.push(digit);
    }
    grouped
}
