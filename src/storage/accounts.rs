use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::application::AppError;
use crate::domain::{Account, AccountNumber, validate_name};

/// Default exclusive upper bound on account numbers.
pub const DEFAULT_MAX_ACCOUNTS: AccountNumber = 100;

/// In-memory table of accounts keyed by account number.
///
/// Numbers must lie in `[0, max_accounts)`. Iteration is in ascending
/// account-number order.
#[derive(Debug, Clone)]
pub struct AccountStore {
    accounts: BTreeMap<AccountNumber, Account>,
    max_accounts: AccountNumber,
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ACCOUNTS)
    }
}

impl AccountStore {
    pub fn new(max_accounts: AccountNumber) -> Self {
        Self {
            accounts: BTreeMap::new(),
            max_accounts,
        }
    }

    pub fn in_range(&self, number: AccountNumber) -> bool {
        (0..self.max_accounts).contains(&number)
    }

    /// Open a new account with a zero balance.
    pub fn create(&mut self, number: AccountNumber, name: &str) -> Result<&Account, AppError> {
        if !self.in_range(number) {
            return Err(AppError::OutOfRange {
                number,
                max: self.max_accounts,
            });
        }
        let name = validate_name(name).map_err(|reason| AppError::InvalidName(reason.to_string()))?;

        match self.accounts.entry(number) {
            Entry::Occupied(_) => Err(AppError::AccountAlreadyExists(number)),
            Entry::Vacant(slot) => Ok(slot.insert(Account::new(number, name))),
        }
    }

    /// Look up an account. Out-of-range numbers are simply absent.
    pub fn find(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.get(&number)
    }

    pub(crate) fn find_mut(&mut self, number: AccountNumber) -> Option<&mut Account> {
        self.accounts.get_mut(&number)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Account> + Clone + '_ {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
