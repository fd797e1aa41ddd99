use clap::{Parser, Subcommand};

pub fn parse_sort_order(value: &str) -> Result<String, String> {
    match value {
        "desc" | "appearance" => Ok(value.to_string()),
        _ => Err("sort must be one of: desc, appearance".to_string()),
    }
}

pub fn parse_locale(value: &str) -> Result<String, String> {
    match value {
        "en" | "es" => Ok(value.to_string()),
        _ => Err("locale must be one of: en, es".to_string()),
    }
}

/// Extended help shown after `salesboard monthly --help` and `salesboard check --help`.
pub const INPUT_AFTER_HELP: &str = "\
Input sources:
  Accepted formats:
    JSON - one top-level array of record objects
    CSV  - one header row with the field names below

  Pass a file path, or `-` to read one of the two sources from stdin.
  An omitted source counts as having no records.
  Example: cat sales.json | salesboard monthly --sales - --expenses expenses.csv

Sales fields:
  date (required)          YYYY-MM-DD or an RFC 3339 timestamp
  total_price (required)   Number, in the base currency
  id, city, client_name    Optional (JSON may also carry `items` and `client`)

  CSV header: id,date,total_price,city,client_name (totalPrice and _id also work)

Expense fields:
  type (required)          instagram_ad, facebook_ad or other
  price (required)         Number; greater than 0 unless type is `other`
  created_at (required)    YYYY-MM-DD or an RFC 3339 timestamp
  name                     Required when type is `other`
  currency                 3-letter code; omitted means the base currency
  id, description          Optional

  CSV header: id,name,type,price,currency,created_at,description (createdAt and _id also work)

Configuration:
  SALESBOARD_BASE_CURRENCY   Base currency code (default COP)
  SALESBOARD_LOCALE          Month label language: en or es (default en)
  SALESBOARD_LOG             Log filter for stderr diagnostics (default warn)
";

#[derive(Debug, Parser)]
#[command(
    name = "salesboard",
    version,
    about = "monthly sales and expense dashboard",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Group sales and expenses into monthly profit/loss buckets
    #[command(after_long_help = INPUT_AFTER_HELP)]
    Monthly {
        /// Path to a JSON or CSV file of sales (use `-` for stdin)
        #[arg(long)]
        sales: Option<String>,
        /// Path to a JSON or CSV file of expenses (use `-` for stdin)
        #[arg(long)]
        expenses: Option<String>,
        /// Currency assumed for sales and for expenses without a currency
        #[arg(long)]
        base_currency: Option<String>,
        /// Month order: `appearance` (input order) or `desc` (latest first)
        #[arg(long, value_parser = parse_sort_order)]
        sort: Option<String>,
        /// Month label language for text output: en or es
        #[arg(long, value_parser = parse_locale)]
        locale: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Validate sales and expense sources without aggregating them
    #[command(after_long_help = INPUT_AFTER_HELP)]
    Check {
        /// Path to a JSON or CSV file of sales (use `-` for stdin)
        #[arg(long)]
        sales: Option<String>,
        /// Path to a JSON or CSV file of expenses (use `-` for stdin)
        #[arg(long)]
        expenses: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
