use thiserror::Error;

use crate::domain::{AccountNumber, Cents, format_cents};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Account not found: {0}")]
    AccountNotFound(AccountNumber),

    #[error("Account already exists: {0}")]
    AccountAlreadyExists(AccountNumber),

    #[error("Account number {number} is out of range (must be at least 0 and below {max})")]
    OutOfRange {
        number: AccountNumber,
        max: AccountNumber,
    },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error(
        "Insufficient funds in account {account}: balance {}, requested {}",
        money(.balance),
        money(.requested)
    )]
    InsufficientFunds {
        account: AccountNumber,
        balance: Cents,
        requested: Cents,
    },

    #[error("Invalid account holder name: {0}")]
    InvalidName(String),

    #[error("Transaction log is full ({capacity} entries)")]
    LogCapacityExceeded { capacity: usize },

    #[error("Balance of account {0} would overflow")]
    BalanceOverflow(AccountNumber),
}

fn money(cents: &Cents) -> String {
    format_cents(*cents)
}

impl AppError {
    /// True for every rejection of the amount itself: non-positive, or more
    /// than the account holds.
    pub fn is_invalid_amount(&self) -> bool {
        matches!(
            self,
            AppError::InvalidAmount(_) | AppError::InsufficientFunds { .. }
        )
    }
}
