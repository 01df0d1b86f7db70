use std::collections::BTreeMap;

use serde::Serialize;

use super::{Account, AccountNumber, Cents, Transaction};

/// Replay the balance of a single account from the log, starting at zero.
pub fn replay_balance(account: AccountNumber, transactions: &[Transaction]) -> Cents {
    transactions
        .iter()
        .filter(|t| t.account == account)
        .fold(0, |balance, t| balance + t.signed_amount())
}

/// Replay every account touched by the log, starting from all-zero balances.
pub fn replay_all_balances(transactions: &[Transaction]) -> BTreeMap<AccountNumber, Cents> {
    let mut balances: BTreeMap<AccountNumber, Cents> = BTreeMap::new();

    for transaction in transactions {
        *balances.entry(transaction.account).or_insert(0) += transaction.signed_amount();
    }

    balances
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceMismatch {
    pub account: AccountNumber,
    pub stored: Cents,
    pub replayed: Cents,
}

/// Outcome of comparing stored balances against a replay of the log.
#[derive(Debug, Clone, Serialize)]
pub struct IntegrityReport {
    pub account_count: usize,
    pub transaction_count: usize,
    pub has_sequence_gaps: bool,
    pub mismatches: Vec<BalanceMismatch>,
    /// Accounts that appear in the log but not in the store
    pub unknown_accounts: Vec<AccountNumber>,
    pub issues: Vec<String>,
}

impl IntegrityReport {
    pub fn is_healthy(&self) -> bool {
        self.issues.is_empty()
    }
}

pub fn build_integrity_report<'a>(
    accounts: impl IntoIterator<Item = &'a Account>,
    transactions: &[Transaction],
) -> IntegrityReport {
    let mut replayed = replay_all_balances(transactions);
    let mut mismatches = Vec::new();
    let mut account_count = 0;

    for account in accounts {
        account_count += 1;
        let expected = replayed.remove(&account.number).unwrap_or(0);
        if expected != account.balance {
            mismatches.push(BalanceMismatch {
                account: account.number,
                stored: account.balance,
                replayed: expected,
            });
        }
    }

    // Whatever is left was logged against an account the store doesn't know.
    let unknown_accounts: Vec<AccountNumber> = replayed.into_keys().collect();

    let has_sequence_gaps = transactions
        .iter()
        .zip(1u64..)
        .any(|(t, expected)| t.sequence != expected);

    let mut issues = Vec::new();
    for m in &mismatches {
        issues.push(format!(
            "Account {} balance is {} cents but the log replays to {} cents",
            m.account, m.stored, m.replayed
        ));
    }
    for number in &unknown_accounts {
        issues.push(format!("Log references unknown account {}", number));
    }
    if has_sequence_gaps {
        issues.push("Transaction sequence has gaps".to_string());
    }

    IntegrityReport {
        account_count,
        transaction_count: transactions.len(),
        has_sequence_gaps,
        mismatches,
        unknown_accounts,
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransactionKind::{self, Deposit, Withdrawal};

    fn entry(sequence: u64, account: AccountNumber, kind: TransactionKind, amount: Cents) -> Transaction {
        Transaction::new(sequence, account, kind, amount)
    }

    fn account_with(number: AccountNumber, balance: Cents) -> Account {
        let mut account = Account::new(number, format!("holder-{}", number));
        account.balance = balance;
        account
    }

    #[test]
    fn test_replay_balance_empty() {
        assert_eq!(replay_balance(1, &[]), 0);
    }

    #[test]
    fn test_replay_balance_mixed() {
        let log = vec![
            entry(1, 1, Deposit, 10000),
            entry(2, 1, Withdrawal, 4000),
            entry(3, 2, Deposit, 4000),
            entry(4, 2, Withdrawal, 3000),
        ];

        assert_eq!(replay_balance(1, &log), 6000);
        assert_eq!(replay_balance(2, &log), 1000);
        assert_eq!(replay_balance(3, &log), 0);
    }

    #[test]
    fn test_replay_all_balances() {
        let log = vec![entry(1, 5, Deposit, 700), entry(2, 9, Deposit, 300)];
        let balances = replay_all_balances(&log);

        assert_eq!(balances.get(&5), Some(&700));
        assert_eq!(balances.get(&9), Some(&300));
        assert_eq!(balances.len(), 2);
    }

    #[test]
    fn test_integrity_report_healthy() {
        let accounts = vec![account_with(1, 6000), account_with(2, 0)];
        let log = vec![entry(1, 1, Deposit, 10000), entry(2, 1, Withdrawal, 4000)];

        let report = build_integrity_report(&accounts, &log);

        assert!(report.is_healthy(), "issues: {:?}", report.issues);
        assert_eq!(report.account_count, 2);
        assert_eq!(report.transaction_count, 2);
    }

    #[test]
    fn test_integrity_report_detects_mismatch_and_unknown_account() {
        let accounts = vec![account_with(1, 500)];
        let log = vec![entry(1, 1, Deposit, 400), entry(3, 8, Deposit, 100)];

        let report = build_integrity_report(&accounts, &log);

        assert!(!report.is_healthy());
        assert_eq!(
            report.mismatches,
            vec![BalanceMismatch { account: 1, stored: 500, replayed: 400 }]
        );
        assert_eq!(report.unknown_accounts, vec![8]);
        assert!(report.has_sequence_gaps);
        assert_eq!(report.issues.len(), 3);
    }
}
