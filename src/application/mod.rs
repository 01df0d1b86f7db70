// Application layer: ledger operations, errors and read-only views.

pub mod error;
pub mod reporting;
mod service;

pub use error::*;
pub use service::*;
