pub mod application;
pub mod cli;
pub mod domain;
pub mod storage;

pub use application::{AppError, LedgerConfig, LedgerService};
pub use domain::*;
pub use storage::{AccountStore, TransactionLog};
