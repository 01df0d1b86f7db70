// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use tally::application::LedgerService;
use tally::cli::Session;
use tally::domain::Cents;

/// Ledger with the default limits and nothing in it.
pub fn test_service() -> LedgerService {
    LedgerService::default()
}

/// Test fixture: Standard account setup
pub struct StandardAccounts;

impl StandardAccounts {
    /// Create account 1 "Alice" and account 2 "Bob"
    pub fn create_basic(service: &mut LedgerService) -> Result<()> {
        service.create_account(1, "Alice")?;
        service.create_account(2, "Bob")?;
        Ok(())
    }

    /// Basic accounts with Alice funded
    pub fn create_funded(service: &mut LedgerService, amount: Cents) -> Result<()> {
        Self::create_basic(service)?;
        service.deposit(1, amount)?;
        Ok(())
    }
}

/// Drive an interactive session with `script` as stdin and return the
/// resulting ledger and everything printed.
pub fn run_session(service: LedgerService, script: &str) -> Result<(LedgerService, String)> {
    let mut session = Session::new(service, script.as_bytes(), Vec::new());
    session.run()?;
    let (service, output) = session.into_parts();
    Ok((service, String::from_utf8(output)?))
}

/// Stored balances of every account, in ascending account order.
pub fn balances(service: &LedgerService) -> Vec<(i64, Cents)> {
    service
        .accounts()
        .iter()
        .map(|a| (a.number, a.balance))
        .collect()
}
