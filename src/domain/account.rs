use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Cents;

/// Account numbers are entered by the user and double as the store key.
pub type AccountNumber = i64;

/// Longest holder name accepted at account creation.
pub const MAX_NAME_LEN: usize = 49;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub number: AccountNumber,
    pub name: String,
    /// Current balance in cents. Never negative.
    pub balance: Cents,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Open an account with a zero balance.
    pub fn new(number: AccountNumber, name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
            balance: 0,
            created_at: Utc::now(),
        }
    }

    /// True when `amount` can be taken out without going below zero.
    pub fn can_cover(&self, amount: Cents) -> bool {
        amount <= self.balance
    }
}

/// Check a holder name: non-blank and at most [`MAX_NAME_LEN`] characters.
pub fn validate_name(name: &str) -> Result<&str, &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("name must not be empty");
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err("name is longer than 49 characters");
    }
    Ok(name)
}
