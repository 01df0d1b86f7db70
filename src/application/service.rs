use tracing::{info, warn};

use crate::domain::{
    build_integrity_report, format_cents, Account, AccountNumber, Cents, IntegrityReport,
    Transaction, TransactionKind,
};
use crate::storage::{AccountStore, TransactionLog, DEFAULT_MAX_ACCOUNTS};

use super::AppError;

/// Limits applied to a fresh ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Account numbers must lie in `[0, max_accounts)`.
    pub max_accounts: AccountNumber,
    /// Bound on the transaction log; `None` grows without limit.
    pub max_transactions: Option<usize>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_accounts: DEFAULT_MAX_ACCOUNTS,
            max_transactions: None,
        }
    }
}

/// Application service providing the ledger operations.
/// Owns the account table and the transaction log; every client (the
/// interactive session, tests) goes through it.
#[derive(Debug, Clone, Default)]
pub struct LedgerService {
    accounts: AccountStore,
    log: TransactionLog,
}

/// Result of a deposit or withdrawal
#[derive(Debug, Clone)]
pub struct Receipt {
    pub transaction: Transaction,
    /// Account balance after the operation
    pub balance: Cents,
}

/// Result of a transfer
#[derive(Debug, Clone)]
pub struct TransferReceipt {
    pub withdrawal: Transaction,
    pub deposit: Transaction,
    pub from_balance: Cents,
    pub to_balance: Cents,
}

impl TransferReceipt {
    pub fn amount(&self) -> Cents {
        self.withdrawal.amount
    }
}

impl LedgerService {
    pub fn new(config: LedgerConfig) -> Self {
        let log = match config.max_transactions {
            Some(capacity) => TransactionLog::bounded(capacity),
            None => TransactionLog::new(),
        };
        Self::with_stores(AccountStore::new(config.max_accounts), log)
    }

    /// Build a service around existing stores.
    pub fn with_stores(accounts: AccountStore, log: TransactionLog) -> Self {
        Self { accounts, log }
    }

    // ========================
    // Account operations
    // ========================

    /// Open a new account with a zero balance.
    pub fn create_account(&mut self, number: AccountNumber, name: &str) -> Result<Account, AppError> {
        let result = self.accounts.create(number, name).cloned();
        match &result {
            Ok(account) => info!(account = number, name = %account.name, "account created"),
            Err(err) => warn!(account = number, error = %err, "account creation rejected"),
        }
        result
    }

    pub fn account(&self, number: AccountNumber) -> Result<&Account, AppError> {
        self.accounts
            .find(number)
            .ok_or(AppError::AccountNotFound(number))
    }

    pub fn accounts(&self) -> &AccountStore {
        &self.accounts
    }

    pub fn transactions(&self) -> &TransactionLog {
        &self.log
    }

    // ========================
    // Balance operations
    // ========================

    /// Credit `amount` to an account and log a deposit.
    pub fn deposit(&mut self, number: AccountNumber, amount: Cents) -> Result<Receipt, AppError> {
        let result = self.apply_deposit(number, amount);
        log_outcome("deposit", number, amount, &result);
        result
    }

    /// Debit `amount` from an account and log a withdrawal.
    pub fn withdraw(&mut self, number: AccountNumber, amount: Cents) -> Result<Receipt, AppError> {
        let result = self.apply_withdrawal(number, amount);
        log_outcome("withdrawal", number, amount, &result);
        result
    }

    /// Move `amount` between two accounts, logging a withdrawal on `from`
    /// followed by a deposit on `to`.
    ///
    /// Every check runs before the first mutation, so a rejected transfer
    /// leaves both balances and the log untouched.
    pub fn transfer(
        &mut self,
        from: AccountNumber,
        to: AccountNumber,
        amount: Cents,
    ) -> Result<TransferReceipt, AppError> {
        let result = self.apply_transfer(from, to, amount);
        match &result {
            Ok(receipt) => info!(
                from,
                to,
                amount = %format_cents(amount),
                from_balance = %format_cents(receipt.from_balance),
                to_balance = %format_cents(receipt.to_balance),
                "transfer recorded"
            ),
            Err(err) => warn!(from, to, amount = %format_cents(amount), error = %err, "transfer rejected"),
        }
        result
    }

    fn apply_deposit(&mut self, number: AccountNumber, amount: Cents) -> Result<Receipt, AppError> {
        let account = self.account(number)?;
        ensure_positive(amount)?;
        let balance = account
            .balance
            .checked_add(amount)
            .ok_or(AppError::BalanceOverflow(number))?;
        self.log.ensure_room(1)?;

        self.set_balance(number, balance)?;
        let transaction = self.log.append(number, TransactionKind::Deposit, amount)?.clone();
        Ok(Receipt { transaction, balance })
    }

    fn apply_withdrawal(&mut self, number: AccountNumber, amount: Cents) -> Result<Receipt, AppError> {
        let account = self.account(number)?;
        ensure_positive(amount)?;
        ensure_covered(account, amount)?;
        let balance = account.balance - amount;
        self.log.ensure_room(1)?;

        self.set_balance(number, balance)?;
        let transaction = self.log.append(number, TransactionKind::Withdrawal, amount)?.clone();
        Ok(Receipt { transaction, balance })
    }

    fn apply_transfer(
        &mut self,
        from: AccountNumber,
        to: AccountNumber,
        amount: Cents,
    ) -> Result<TransferReceipt, AppError> {
        let source = self.account(from)?;
        let target = self.account(to)?;
        ensure_positive(amount)?;
        ensure_covered(source, amount)?;

        let from_balance = source.balance - amount;
        // A self-transfer nets to zero; only a real credit can overflow.
        let to_balance = if from == to {
            source.balance
        } else {
            target
                .balance
                .checked_add(amount)
                .ok_or(AppError::BalanceOverflow(to))?
        };
        self.log.ensure_room(2)?;

        self.set_balance(from, from_balance)?;
        self.set_balance(to, to_balance)?;
        let withdrawal = self.log.append(from, TransactionKind::Withdrawal, amount)?.clone();
        let deposit = self.log.append(to, TransactionKind::Deposit, amount)?.clone();

        Ok(TransferReceipt {
            withdrawal,
            deposit,
            from_balance: if from == to { to_balance } else { from_balance },
            to_balance,
        })
    }

    fn set_balance(&mut self, number: AccountNumber, balance: Cents) -> Result<(), AppError> {
        let account = self
            .accounts
            .find_mut(number)
            .ok_or(AppError::AccountNotFound(number))?;
        account.balance = balance;
        Ok(())
    }

    // ========================
    // Integrity
    // ========================

    /// Replay the log from all-zero balances and compare with the stored ones.
    pub fn verify(&self) -> IntegrityReport {
        build_integrity_report(self.accounts.iter(), self.log.all())
    }
}

fn ensure_positive(amount: Cents) -> Result<(), AppError> {
    if amount <= 0 {
        return Err(AppError::InvalidAmount(
            "Amount must be positive".to_string(),
        ));
    }
    Ok(())
}

fn ensure_covered(account: &Account, amount: Cents) -> Result<(), AppError> {
    if !account.can_cover(amount) {
        return Err(AppError::InsufficientFunds {
            account: account.number,
            balance: account.balance,
            requested: amount,
        });
    }
    Ok(())
}

fn log_outcome(operation: &str, number: AccountNumber, amount: Cents, result: &Result<Receipt, AppError>) {
    match result {
        Ok(receipt) => info!(
            account = number,
            amount = %format_cents(amount),
            balance = %format_cents(receipt.balance),
            "{} recorded",
            operation
        ),
        Err(err) => warn!(
            account = number,
            amount = %format_cents(amount),
            error = %err,
            "{} rejected",
            operation
        ),
    }
}
