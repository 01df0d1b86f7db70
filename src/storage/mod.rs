// In-memory tables owned by the ledger service. Nothing here outlives the process.

mod accounts;
mod transactions;

pub use accounts::*;
pub use transactions::*;
