use salesboard_client::commands;
use salesboard_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Monthly {
            sales,
            expenses,
            base_currency,
            sort,
            locale,
            json: _,
        } => commands::monthly::run(
            sales.clone(),
            expenses.clone(),
            base_currency.clone(),
            locale.clone(),
            sort.clone(),
        ),
        Commands::Check {
            sales, expenses, ..
        } => commands::check::run(sales.clone(), expenses.clone()),
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::parse_from;

    use super::dispatch;

    #[test]
    fn commands_without_sources_report_empty_results() {
        let cases: [(&[&str], &str); 2] = [
            (&["salesboard", "monthly", "--base-currency", "COP", "--locale", "en"], "monthly"),
            (&["salesboard", "check"], "check"),
        ];

        for (args, expected_command) in cases {
            let parsed = parse_from(args);
            assert!(parsed.is_ok());
            if let Ok(cli) = parsed {
                let response = dispatch(&cli);
                assert!(response.is_ok());
                if let Ok(success) = response {
                    assert_eq!(success.command, expected_command);
                }
            }
        }
    }

    #[test]
    fn unreadable_source_paths_fail() {
        let parsed = parse_from(["salesboard", "check", "--sales", "/no/such/sales.json"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            let response = dispatch(&cli);
            assert!(response.is_err());
            if let Err(error) = response {
                assert_eq!(error.code, "invalid_argument");
            }
        }
    }
}
