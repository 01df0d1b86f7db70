use crate::application::AppError;
use crate::domain::{AccountNumber, Cents, Transaction, TransactionKind};

/// Append-only, insertion-ordered record of balance changes.
///
/// Unbounded by default. With a capacity set, appends past it fail with
/// [`AppError::LogCapacityExceeded`] and leave the log untouched.
#[derive(Debug, Clone, Default)]
pub struct TransactionLog {
    entries: Vec<Transaction>,
    capacity: Option<usize>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the log at `capacity` entries. Storage still grows on demand.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: Some(capacity),
        }
    }

    /// Free entries left, or `None` when unbounded.
    pub fn remaining(&self) -> Option<usize> {
        self.capacity.map(|cap| cap.saturating_sub(self.entries.len()))
    }

    /// Fail unless `count` more entries fit.
    pub fn ensure_room(&self, count: usize) -> Result<(), AppError> {
        match (self.capacity, self.remaining()) {
            (Some(capacity), Some(remaining)) if remaining < count => {
                Err(AppError::LogCapacityExceeded { capacity })
            }
            _ => Ok(()),
        }
    }

    /// Record one entry, assigning the next sequence number.
    pub fn append(
        &mut self,
        account: AccountNumber,
        kind: TransactionKind,
        amount: Cents,
    ) -> Result<&Transaction, AppError> {
        self.ensure_room(1)?;
        let sequence = self.entries.len() as u64 + 1;
        self.entries.push(Transaction::new(sequence, account, kind, amount));
        Ok(&self.entries[self.entries.len() - 1])
    }

    pub fn all(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.entries.iter()
    }

    pub fn for_account(&self, account: AccountNumber) -> impl Iterator<Item = &Transaction> + '_ {
        self.entries.iter().filter(move |t| t.account == account)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
