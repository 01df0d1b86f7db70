//! Read-only views over the ledger: account listing, transaction history and
//! the balance report. Table views are lazy line iterators; cloning one
//! restarts it from the top.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

use crate::domain::{format_cents, Account, AccountNumber, Cents, Transaction, TransactionKind};
use crate::storage::{AccountStore, TransactionLog};

pub const ACCOUNT_LIST_HEADER: &str = "--- Account List ---";
pub const TRANSACTION_HISTORY_HEADER: &str = "--- Transaction History ---";
pub const REPORT_HEADER: &str = "--- Account Balance Report ---";
pub const REPORT_BANNER: &str = "***********************************";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountRow {
    pub number: AccountNumber,
    pub name: String,
    pub balance: Cents,
}

impl From<&Account> for AccountRow {
    fn from(account: &Account) -> Self {
        Self {
            number: account.number,
            name: account.name.clone(),
            balance: account.balance,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionRow {
    pub sequence: u64,
    pub account: AccountNumber,
    pub kind: TransactionKind,
    pub amount: Cents,
    pub recorded_at: DateTime<Utc>,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        Self {
            sequence: t.sequence,
            account: t.account,
            kind: t.kind,
            amount: t.amount,
            recorded_at: t.recorded_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BalanceReport {
    pub generated_at: DateTime<Utc>,
    pub accounts: Vec<AccountRow>,
    /// Sum of all balances. Widened so many large accounts cannot overflow it.
    pub total_balance: i128,
}

pub fn account_line(account: &Account) -> String {
    format!(
        "Account Number: {}, Name: {}, Balance: {}",
        account.number,
        account.name,
        format_cents(account.balance)
    )
}

pub fn transaction_line(transaction: &Transaction) -> String {
    format!(
        "Account Number: {}, Type: {}, Amount: {}",
        transaction.account,
        transaction.kind.code(),
        format_cents(transaction.amount)
    )
}

/// Occupied accounts in ascending number order, preceded by the list header.
pub fn display_accounts(accounts: &AccountStore) -> impl Iterator<Item = String> + Clone + '_ {
    [String::new(), ACCOUNT_LIST_HEADER.to_string()]
        .into_iter()
        .chain(accounts.iter().map(account_line))
}

/// The whole log in insertion order, preceded by the history header.
pub fn display_transactions(log: &TransactionLog) -> impl Iterator<Item = String> + Clone + '_ {
    [String::new(), TRANSACTION_HISTORY_HEADER.to_string()]
        .into_iter()
        .chain(log.iter().map(transaction_line))
}

/// The account listing framed by banner lines.
pub fn generate_report(accounts: &AccountStore) -> impl Iterator<Item = String> + Clone + '_ {
    let opening = [
        String::new(),
        REPORT_BANNER.to_string(),
        String::new(),
        REPORT_HEADER.to_string(),
    ];
    let closing = [String::new(), REPORT_BANNER.to_string()];

    opening
        .into_iter()
        .chain(display_accounts(accounts))
        .chain(closing)
}

pub fn accounts_json(accounts: &AccountStore) -> serde_json::Result<String> {
    let rows: Vec<AccountRow> = accounts.iter().map(AccountRow::from).collect();
    serde_json::to_string_pretty(&rows)
}

pub fn transactions_json(log: &TransactionLog) -> serde_json::Result<String> {
    let rows: Vec<TransactionRow> = log.iter().map(TransactionRow::from).collect();
    serde_json::to_string_pretty(&rows)
}

pub fn report_json(accounts: &AccountStore) -> serde_json::Result<String> {
    let rows: Vec<AccountRow> = accounts.iter().map(AccountRow::from).collect();
    let total_balance = rows.iter().map(|row| i128::from(row.balance)).sum();
    let report = BalanceReport {
        generated_at: Utc::now(),
        accounts: rows,
        total_balance,
    };
    serde_json::to_string_pretty(&report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> AccountStore {
        let mut store = AccountStore::default();
        store.create(2, "Bob").unwrap();
        store.create(1, "Alice").unwrap();
        store
    }

    #[test]
    fn test_display_accounts_lines() {
        let store = sample_store();
        let lines: Vec<String> = display_accounts(&store).collect();

        assert_eq!(
            lines,
            vec![
                "",
                ACCOUNT_LIST_HEADER,
                "Account Number: 1, Name: Alice, Balance: 0.00",
                "Account Number: 2, Name: Bob, Balance: 0.00",
            ]
        );
    }

    #[test]
    fn test_display_accounts_is_restartable() {
        let store = sample_store();
        let view = display_accounts(&store);

        let first: Vec<String> = view.clone().collect();
        let second: Vec<String> = view.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_display_transactions_uses_codes() {
        let mut log = TransactionLog::new();
        log.append(1, TransactionKind::Deposit, 10000).unwrap();
        log.append(1, TransactionKind::Withdrawal, 4000).unwrap();

        let lines: Vec<String> = display_transactions(&log).skip(2).collect();
        assert_eq!(
            lines,
            vec![
                "Account Number: 1, Type: D, Amount: 100.00",
                "Account Number: 1, Type: W, Amount: 40.00",
            ]
        );
    }

    #[test]
    fn test_report_is_framed_by_banners() {
        let store = sample_store();
        let lines: Vec<String> = generate_report(&store).collect();

        assert_eq!(lines[1], REPORT_BANNER);
        assert_eq!(lines[3], REPORT_HEADER);
        assert_eq!(lines[5], ACCOUNT_LIST_HEADER);
        assert_eq!(lines.last().map(String::as_str), Some(REPORT_BANNER));
        assert_eq!(REPORT_BANNER.len(), 35);
    }

    #[test]
    fn test_accounts_json() {
        let store = sample_store();
        let json: serde_json::Value = serde_json::from_str(&accounts_json(&store).unwrap()).unwrap();

        assert_eq!(json[0]["number"], 1);
        assert_eq!(json[0]["name"], "Alice");
        assert_eq!(json[1]["balance"], 0);
    }

    #[test]
    fn test_report_json_totals_balances() {
        let mut store = sample_store();
        store.find_mut(1).unwrap().balance = 2500;
        store.find_mut(2).unwrap().balance = 1075;

        let json: serde_json::Value = serde_json::from_str(&report_json(&store).unwrap()).unwrap();

        assert_eq!(json["total_balance"], 3575);
        assert_eq!(json["accounts"].as_array().map(Vec::len), Some(2));
        assert!(json.get("generated_at").is_some());
    }

    #[test]
    fn test_report_json_total_does_not_overflow() {
        let mut store = sample_store();
        store.find_mut(1).unwrap().balance = Cents::MAX;
        store.find_mut(2).unwrap().balance = Cents::MAX;

        let json = report_json(&store).unwrap();

        let expected = i128::from(Cents::MAX) * 2;
        assert!(json.contains(&format!("\"total_balance\": {}", expected)));
    }
}
