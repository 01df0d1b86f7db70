use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{AccountNumber, Cents};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money credited to the account
    Deposit,
    /// Money debited from the account
    Withdrawal,
}

impl TransactionKind {
    /// Single-letter code used in the transaction listing.
    pub fn code(&self) -> char {
        match self {
            TransactionKind::Deposit => 'D',
            TransactionKind::Withdrawal => 'W',
        }
    }

    /// Signed effect of `amount` on the account balance.
    pub fn signed(&self, amount: Cents) -> Cents {
        match self {
            TransactionKind::Deposit => amount,
            TransactionKind::Withdrawal => -amount,
        }
    }
}

/// A historical record of one balance change.
/// Transactions are immutable once appended to the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    /// Position in the log, starting at 1
    pub sequence: u64,
    /// Affected account (a plain number, not a live reference)
    pub account: AccountNumber,
    pub kind: TransactionKind,
    /// Amount in cents (always positive)
    pub amount: Cents,
    pub recorded_at: DateTime<Utc>,
}

impl Transaction {
    /// Sequence number must be assigned by the log.
    pub fn new(sequence: u64, account: AccountNumber, kind: TransactionKind, amount: Cents) -> Self {
        debug_assert!(amount > 0, "transaction amount must be positive");
        Self {
            sequence,
            account,
            kind,
            amount,
            recorded_at: Utc::now(),
        }
    }

    pub fn signed_amount(&self) -> Cents {
        self.kind.signed(self.amount)
    }
}
