use std::io;

use anyhow::Result;
use clap::Parser;

use crate::application::reporting::OutputFormat;
use crate::application::{LedgerConfig, LedgerService};
use crate::domain::AccountNumber;

pub mod logging;
mod session;

pub use session::*;

/// Tally - interactive in-memory banking ledger
#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(about = "An interactive in-memory banking ledger: accounts, deposits, withdrawals and transfers")]
#[command(version)]
pub struct Cli {
    /// Exclusive upper bound on account numbers
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(i64).range(1..))]
    pub max_accounts: AccountNumber,

    /// Maximum number of transactions to keep (unbounded if omitted)
    #[arg(long)]
    pub max_transactions: Option<usize>,

    /// Output format for listings and reports
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v warn, -vv info, -vvv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn config(&self) -> LedgerConfig {
        LedgerConfig {
            max_accounts: self.max_accounts,
            max_transactions: self.max_transactions,
        }
    }

    /// Run the interactive menu on stdin/stdout until the user exits.
    pub fn run(self) -> Result<()> {
        logging::init(self.verbose);

        let service = LedgerService::new(self.config());
        let mut session = Session::new(service, io::stdin().lock(), io::stdout().lock())
            .with_format(self.format);
        session.run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["tally"]).unwrap();
        assert_eq!(cli.config(), LedgerConfig::default());
        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_all_options() {
        let cli = Cli::try_parse_from([
            "tally",
            "--max-accounts",
            "500",
            "--max-transactions",
            "1000",
            "--format",
            "json",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.max_accounts, 500);
        assert_eq!(cli.max_transactions, Some(1000));
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
    }

    #[rstest]
    #[case::zero_accounts(&["tally", "--max-accounts", "0"])]
    #[case::negative_accounts(&["tally", "--max-accounts", "-4"])]
    #[case::bad_format(&["tally", "--format", "xml"])]
    #[case::bad_capacity(&["tally", "--max-transactions", "lots"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(Cli::try_parse_from(args).is_err());
    }
}
